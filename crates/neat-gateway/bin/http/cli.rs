use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use jiff::SignedDuration;
use neat_feed::FeedSettings;
use neat_feed::settings::DEFAULT_SHORT_LINK_BASE;

pub const LISTEN_ADDR_ENV: &str = "NEAT_LISTEN_ADDR";
pub const STORAGE_FILE_ENV: &str = "NEAT_STORAGE_FILE";
pub const ADMIN_KEY_FILE_ENV: &str = "NEAT_ADMIN_KEY_FILE";
pub const STATIC_DIR_ENV: &str = "NEAT_STATIC_DIR";
pub const SHORT_LINK_BASE_ENV: &str = "NEAT_SHORT_LINK_BASE";
pub const PUBLIC_LINKS_ENV: &str = "NEAT_PUBLIC_LINKS";
pub const PUBLIC_SHORTS_ENV: &str = "NEAT_PUBLIC_SHORTS";
pub const SHORTS_REFRESH_SECS_ENV: &str = "NEAT_SHORTS_REFRESH_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STORAGE_FILE: &str = "./neatStuff.json";
pub const DEFAULT_ADMIN_KEY_FILE: &str = "./admin.key";
pub const DEFAULT_STATIC_DIR: &str = "./static";

#[derive(Debug, Parser)]
#[command(name = "neat", about = "Serves a curated feed of links and shorts")]
pub struct Cli {
    /// Port to listen on. Overrides the port of `--listen-addr`.
    pub port: Option<u16>,

    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = STORAGE_FILE_ENV, default_value = DEFAULT_STORAGE_FILE)]
    pub storage_file: PathBuf,

    /// File whose first line is the admin password.
    #[arg(long, env = ADMIN_KEY_FILE_ENV, default_value = DEFAULT_ADMIN_KEY_FILE)]
    pub admin_key_file: PathBuf,

    #[arg(long, env = STATIC_DIR_ENV, default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    #[arg(long, env = SHORT_LINK_BASE_ENV, default_value = DEFAULT_SHORT_LINK_BASE)]
    pub short_link_base: String,

    #[arg(long, env = PUBLIC_LINKS_ENV, default_value_t = 5)]
    pub public_links: usize,

    #[arg(long, env = PUBLIC_SHORTS_ENV, default_value_t = 10)]
    pub public_shorts: usize,

    /// Maximum age of the cached shorts page, in seconds.
    #[arg(long, env = SHORTS_REFRESH_SECS_ENV, default_value_t = 3600)]
    pub shorts_refresh_secs: u64,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        let mut addr = self.listen_addr;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        addr
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings::builder()
            .public_links(self.public_links)
            .public_shorts(self.public_shorts)
            .shorts_staleness(SignedDuration::from_secs(
                i64::try_from(self.shorts_refresh_secs).unwrap_or(i64::MAX),
            ))
            .short_link_base(self.short_link_base.clone())
            .build()
    }
}
