//! Release scheduling, visibility caching and request coordination.
//!
//! [`FeedService`] is the [`Feed`](neat_core::Feed) implementation. It owns a
//! [`ContentStore`](neat_core::ContentStore), one process-wide read/write lock
//! guarding every load-modify-save sequence on it, and a [`VisibilityCache`]
//! of the views served to the public.
//!
//! # Example
//!
//! ```rust
//! use neat_core::{Feed, NewLink};
//! use neat_feed::{FeedService, FeedSettings};
//! use neat_generator::RandomGenerator;
//! use neat_storage::InMemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let feed = FeedService::new(
//!     InMemoryStore::new(),
//!     RandomGenerator::new(),
//!     FeedSettings::builder().build(),
//! );
//!
//! feed.add_link(NewLink::new("A neat thing", "https://example.com")?).await?;
//! let links = feed.public_links().await?;
//! assert_eq!(links.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod scheduler;
pub mod service;
pub mod settings;
pub mod visibility;

pub use scheduler::ReleaseScheduler;
pub use service::FeedService;
pub use settings::FeedSettings;
pub use visibility::VisibilityCache;
