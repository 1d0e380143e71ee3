use jiff::SignedDuration;
use typed_builder::TypedBuilder;

pub const DEFAULT_SHORT_LINK_BASE: &str = "https://links.ethohampton.com/";

/// Tunables for [`FeedService`](crate::FeedService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct FeedSettings {
    /// How many of the most recently added links are public.
    #[builder(default = 5)]
    pub public_links: usize,
    /// How many released shorts are public.
    #[builder(default = 10)]
    pub public_shorts: usize,
    /// Maximum age of the cached shorts view. Shorts become public by the
    /// passage of time, not by writes, so the view must be recomputed
    /// periodically.
    #[builder(default = SignedDuration::from_hours(1))]
    pub shorts_staleness: SignedDuration,
    /// Minimum gap between two shorts' release times.
    #[builder(default = SignedDuration::from_hours(24))]
    pub release_separation: SignedDuration,
    /// Upper bound (exclusive) of the random delay, in seconds, added to a
    /// release time pushed back by the separation rule.
    #[builder(default = 300)]
    pub release_jitter_secs: u32,
    /// Prefix for links that carry a short link.
    #[builder(default = DEFAULT_SHORT_LINK_BASE.to_string(), setter(into))]
    pub short_link_base: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
