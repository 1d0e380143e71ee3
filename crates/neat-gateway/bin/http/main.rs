mod cli;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use neat_core::Feed;
use neat_feed::FeedService;
use neat_gateway::{AdminKey, App, AppState, Shutdown};
use neat_generator::RandomGenerator;
use neat_storage::JsonFileStore;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let listen_addr = cli.listen_addr();

    let admin_key = AdminKey::load(&cli.admin_key_file)
        .context("an admin key is required to add content")?;
    info!(path = %cli.admin_key_file.display(), "found admin key");

    let feed = FeedService::new(
        JsonFileStore::new(&cli.storage_file),
        RandomGenerator::new(),
        cli.feed_settings(),
    );
    feed.verify()
        .await
        .with_context(|| format!("couldn't load {}", cli.storage_file.display()))?;

    let shutdown = Arc::new(Shutdown::default());
    let state = AppState::builder()
        .feed(Arc::new(feed))
        .admin_key(Arc::new(admin_key))
        .static_dir(cli.static_dir.clone())
        .shutdown(Arc::clone(&shutdown))
        .build();

    let app = App::router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        storage_file = %cli.storage_file.display(),
        static_dir = %cli.static_dir.display(),
        "starting neat server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = Arc::clone(&shutdown);
            async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("received ctrl-c, shutting down"),
                    _ = shutdown.tripped() => {}
                }
            }
        })
        .await?;

    if shutdown.is_tripped() {
        bail!("stopped after finding a corrupt store");
    }
    Ok(())
}
