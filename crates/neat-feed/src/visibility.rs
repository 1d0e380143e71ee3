use jiff::{SignedDuration, Timestamp};
use neat_core::{Link, PublicLink, Short};

/// The last `n` links in insertion order, projected to [`PublicLink`].
///
/// The result runs from the oldest link of the window to the newest. Fewer
/// than `n` links yields all of them.
pub fn latest_public_links(links: &[Link], n: usize, short_link_base: &str) -> Vec<PublicLink> {
    let start = links.len().saturating_sub(n);
    links[start..]
        .iter()
        .map(|link| PublicLink::from_link(link, short_link_base))
        .collect()
}

/// Shorts released at `now`, most recently released first, at most `m`.
pub fn visible_shorts(shorts: &[Short], now: Timestamp, m: usize) -> Vec<Short> {
    let mut visible: Vec<Short> = shorts
        .iter()
        .filter(|short| short.is_released(now))
        .cloned()
        .collect();
    visible.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    visible.truncate(m);
    visible
}

#[derive(Debug, Clone)]
struct CachedShorts {
    shorts: Vec<Short>,
    computed_at: Timestamp,
}

/// Derived views served to the public.
///
/// Each view is either present or absent. Absent means "recompute from the
/// store on next read"; losing a view never loses data.
#[derive(Debug, Clone, Default)]
pub struct VisibilityCache {
    links: Option<Vec<PublicLink>>,
    shorts: Option<CachedShorts>,
}

impl VisibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> Option<Vec<PublicLink>> {
        self.links.clone()
    }

    /// The cached shorts view, unless it was computed more than `staleness`
    /// before `now`.
    pub fn shorts(&self, now: Timestamp, staleness: SignedDuration) -> Option<Vec<Short>> {
        let cached = self.shorts.as_ref()?;
        let fresh_until = cached
            .computed_at
            .checked_add(staleness)
            .unwrap_or(Timestamp::MAX);
        (now <= fresh_until).then(|| cached.shorts.clone())
    }

    pub fn set_links(&mut self, links: Vec<PublicLink>) {
        self.links = Some(links);
    }

    pub fn set_shorts(&mut self, shorts: Vec<Short>, computed_at: Timestamp) {
        self.shorts = Some(CachedShorts {
            shorts,
            computed_at,
        });
    }

    pub fn invalidate_links(&mut self) {
        self.links = None;
    }

    pub fn invalidate_shorts(&mut self) {
        self.shorts = None;
    }
}
