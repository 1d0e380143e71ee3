use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// A bookmark-style entry. Always public, subject to the "last N" window.
///
/// Field names on the wire match documents written by earlier releases of the
/// service, so existing storage files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Link {
    #[serde(rename = "URL")]
    pub url: String,
    pub description: String,
    /// Path on the short link host. Takes precedence over `url` when set.
    pub short_link: String,
    pub posted_on_twitter: bool,
    pub add_date: Timestamp,
}

/// A short text post that becomes public once `release_date` has passed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Short {
    pub title: String,
    pub content: String,
    #[serde(rename = "ID")]
    pub id: ShortId,
    pub release_date: Timestamp,
    /// Reserved for retention; not enforced yet.
    pub pinned: bool,
    /// Reserved for retention; not enforced yet.
    pub kept: u64,
    pub add_date: Timestamp,
}

impl Short {
    /// Whether the short is public at `now`.
    pub fn is_released(&self, now: Timestamp) -> bool {
        now >= self.release_date
    }
}

/// Human-referenceable identifier of a [`Short`].
///
/// Ids are random and short, so uniqueness is likely but not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortId(String);

impl ShortId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the service persists, as one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentStorage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<Link>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub shorts: Vec<Short>,
    /// Persisted for forward compatibility; visibility does not read it.
    #[serde(rename = "shortVisibilityDuration", default)]
    pub short_visibility_duration: u64,
}

/// The public shape of a [`Link`], as served on the JSON feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicLink {
    #[serde(rename = "URL")]
    pub url: String,
    pub description: String,
}

impl PublicLink {
    /// Projects a link, resolving `short_link` against `short_link_base`.
    pub fn from_link(link: &Link, short_link_base: &str) -> Self {
        let url = if link.short_link.is_empty() {
            link.url.clone()
        } else {
            format!("{}{}", short_link_base, link.short_link)
        };

        Self {
            url,
            description: link.description.clone(),
        }
    }
}

// Older documents store absent sequences as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
