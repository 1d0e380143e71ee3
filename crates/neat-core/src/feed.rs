use crate::content::{ContentStorage, Link, PublicLink, Short};
use crate::error::{CoreError, FeedError};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, FeedError>;

/// A validated request to add a [`Link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub description: String,
    pub url: String,
}

impl NewLink {
    /// Validates the raw form values. Both fields are required.
    pub fn new(
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> std::result::Result<Self, CoreError> {
        let description = required("description", description.into())?;
        let url = required("url", url.into())?;
        Ok(Self { description, url })
    }
}

/// A validated request to add a [`Short`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShort {
    pub title: String,
    pub content: String,
    /// Hours from the start of the current hour until release. `0` means now.
    pub release_hours: u64,
}

impl NewShort {
    /// Validates the raw form values. `release_hours` must parse as a
    /// non-negative integer.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        release_hours: &str,
    ) -> std::result::Result<Self, CoreError> {
        let title = required("title", title.into())?;
        let content = required("content", content.into())?;
        let release_hours = required("releaseHours", release_hours.to_string())?;

        let release_hours = release_hours
            .parse::<u64>()
            .map_err(|_| CoreError::InvalidReleaseHours(release_hours.clone()))?;

        Ok(Self {
            title,
            content,
            release_hours,
        })
    }
}

fn required(field: &'static str, value: String) -> std::result::Result<String, CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field));
    }
    Ok(value)
}

/// The read and write paths of the service.
#[async_trait]
pub trait Feed: Send + Sync + 'static {
    /// The most recently added links, oldest of the window first.
    async fn public_links(&self) -> Result<Vec<PublicLink>>;

    /// Released shorts, most recently released first.
    async fn visible_shorts(&self) -> Result<Vec<Short>>;

    /// Appends a link and returns it as stored.
    async fn add_link(&self, link: NewLink) -> Result<Link>;

    /// Schedules and appends a short and returns it as stored.
    async fn add_short(&self, short: NewShort) -> Result<Short>;

    /// The full stored document, for admin export.
    async fn export(&self) -> Result<ContentStorage>;

    /// Loads the store once to check it is readable, without touching caches.
    async fn verify(&self) -> Result<()>;
}
