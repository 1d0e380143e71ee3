//! HTTP surface of the Neat content service.
//!
//! # Architecture
//!
//! - **App**: the axum router and its routes
//! - **AppState**: the shared [`Feed`](neat_core::Feed), admin key, shorts
//!   renderer and shutdown trigger handed to every handler
//! - **Handlers**: one module per endpoint group
//! - **Render**: the HTML page for released shorts

pub mod admin;
pub mod app;
pub mod error;
mod handlers;
pub mod model;
pub mod render;
pub mod state;

pub use self::admin::AdminKey;
pub use self::app::App;
pub use self::error::AppError;
pub use self::render::{RenderError, ShortsPage, ShortsRenderer};
pub use self::state::{AppState, Shutdown};
