//! Core types and traits for the Neat content service.
//!
//! This crate provides the domain model (links, shorts and the persisted
//! aggregate), the storage and feed contracts, and the clock seam shared by
//! the storage, feed and gateway crates.

pub mod clock;
pub mod content;
pub mod error;
pub mod feed;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use content::{ContentStorage, Link, PublicLink, Short, ShortId};
pub use error::{CoreError, FeedError, StoreError};
pub use feed::{Feed, NewLink, NewShort};
pub use store::ContentStore;
