use crate::scheduler::{truncate, ReleaseScheduler};
use crate::settings::FeedSettings;
use crate::visibility::{latest_public_links, visible_shorts, VisibilityCache};
use async_trait::async_trait;
use jiff::Unit;
use neat_core::{
    Clock, ContentStorage, ContentStore, Feed, FeedError, Link, NewLink, NewShort, PublicLink,
    Short, StoreError, SystemClock,
};
use neat_generator::Generator;
use parking_lot::Mutex;
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

type Result<T> = std::result::Result<T, FeedError>;

/// A concrete implementation of the [`Feed`] trait.
///
/// Locking discipline:
/// - `store_lock` guards the store. Readers take it shared only while they
///   reload a missing view; writers take it exclusively for the whole
///   load, mutate, save and invalidate sequence.
/// - `views` is never held across an await. A reader publishes its
///   recomputed view before releasing the shared lock, so a writer's
///   invalidation always lands after it.
///
/// Concurrent readers may both recompute the same view; the last one wins,
/// which is harmless because both computed it from the same store.
pub struct FeedService<S, G, C = SystemClock> {
    store: S,
    generator: G,
    clock: C,
    settings: FeedSettings,
    scheduler: ReleaseScheduler,
    store_lock: RwLock<()>,
    views: Mutex<VisibilityCache>,
}

impl<S: ContentStore, G: Generator> FeedService<S, G, SystemClock> {
    /// Creates a service backed by the real system clock.
    pub fn new(store: S, generator: G, settings: FeedSettings) -> Self {
        Self::with_clock(store, generator, settings, SystemClock)
    }
}

impl<S: ContentStore, G: Generator, C: Clock> FeedService<S, G, C> {
    pub fn with_clock(store: S, generator: G, settings: FeedSettings, clock: C) -> Self {
        Self {
            store,
            generator,
            clock,
            scheduler: ReleaseScheduler::from_settings(&settings),
            settings,
            store_lock: RwLock::new(()),
            views: Mutex::new(VisibilityCache::new()),
        }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// Loads the store for a public view. An unreadable document reads as
    /// `None` so the caller serves an empty, uncached view; writers never
    /// take this path.
    async fn load_for_read(&self) -> Result<Option<ContentStorage>> {
        match self.store.load().await {
            Ok(storage) => Ok(Some(storage)),
            Err(StoreError::Io(reason)) => {
                warn!(%reason, "Content store unreadable, serving an empty view");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn cached_shorts(&self) -> Option<Vec<Short>> {
        let now = self.clock.now();
        self.views.lock().shorts(now, self.settings.shorts_staleness)
    }
}

#[async_trait]
impl<S: ContentStore, G: Generator, C: Clock> Feed for FeedService<S, G, C> {
    async fn public_links(&self) -> Result<Vec<PublicLink>> {
        let cached = self.views.lock().links();
        if let Some(links) = cached {
            trace!(count = links.len(), "Public links served from cache");
            return Ok(links);
        }

        let _guard = self.store_lock.read().await;
        // Another reader may have filled the view while we waited.
        let cached = self.views.lock().links();
        if let Some(links) = cached {
            return Ok(links);
        }

        let Some(storage) = self.load_for_read().await? else {
            return Ok(Vec::new());
        };
        let links = latest_public_links(
            &storage.links,
            self.settings.public_links,
            &self.settings.short_link_base,
        );
        self.views.lock().set_links(links.clone());
        debug!(count = links.len(), "Recomputed public links");
        Ok(links)
    }

    async fn visible_shorts(&self) -> Result<Vec<Short>> {
        if let Some(shorts) = self.cached_shorts() {
            trace!(count = shorts.len(), "Visible shorts served from cache");
            return Ok(shorts);
        }

        let _guard = self.store_lock.read().await;
        if let Some(shorts) = self.cached_shorts() {
            return Ok(shorts);
        }

        let Some(storage) = self.load_for_read().await? else {
            return Ok(Vec::new());
        };
        let now = self.clock.now();
        let shorts = visible_shorts(&storage.shorts, now, self.settings.public_shorts);
        self.views.lock().set_shorts(shorts.clone(), now);
        debug!(count = shorts.len(), total = storage.shorts.len(), "Recomputed visible shorts");
        Ok(shorts)
    }

    async fn add_link(&self, new: NewLink) -> Result<Link> {
        let _guard = self.store_lock.write().await;

        let mut storage = self.store.load().await?;
        let link = Link {
            url: new.url,
            description: new.description,
            short_link: String::new(),
            posted_on_twitter: false,
            add_date: truncate(self.clock.now(), Unit::Millisecond),
        };
        storage.links.push(link.clone());

        let saved = self.store.save(&storage).await;
        // The document may have changed even if the save reported failure.
        self.views.lock().invalidate_links();
        saved?;

        info!(url = %link.url, total = storage.links.len(), "Added link");
        Ok(link)
    }

    async fn add_short(&self, new: NewShort) -> Result<Short> {
        let _guard = self.store_lock.write().await;

        let mut storage = self.store.load().await?;
        let now = self.clock.now();
        let candidate = self.scheduler.candidate_release(now, new.release_hours)?;
        let release_date = self
            .scheduler
            .next_valid_release_time(candidate, &storage.shorts);

        let short = Short {
            title: new.title,
            content: new.content,
            id: self.generator.generate(),
            release_date,
            pinned: false,
            kept: 0,
            add_date: truncate(now, Unit::Millisecond),
        };
        storage.shorts.push(short.clone());

        let saved = self.store.save(&storage).await;
        self.views.lock().invalidate_shorts();
        saved?;

        info!(id = %short.id, release_date = %short.release_date, "Added short");
        Ok(short)
    }

    async fn export(&self) -> Result<ContentStorage> {
        let _guard = self.store_lock.read().await;
        Ok(self.store.load().await?)
    }

    async fn verify(&self) -> Result<()> {
        let _guard = self.store_lock.read().await;
        let storage = self.store.load().await?;
        info!(
            links = storage.links.len(),
            shorts = storage.shorts.len(),
            "Content store verified"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use neat_core::{ManualClock, ShortId, StoreError};
    use neat_generator::seq::SeqGenerator;
    use neat_storage::InMemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type TestFeed = FeedService<InMemoryStore, SeqGenerator, ManualClock>;

    fn start() -> Timestamp {
        "2024-05-01T10:17:23.456Z".parse().unwrap()
    }

    fn link(url: &str) -> Link {
        Link {
            url: url.to_string(),
            description: "IDK".to_string(),
            ..Default::default()
        }
    }

    fn test_feed(storage: ContentStorage) -> (TestFeed, InMemoryStore, ManualClock) {
        let store = InMemoryStore::with_storage(storage);
        let clock = ManualClock::new(start());
        let feed = FeedService::with_clock(
            store.clone(),
            SeqGenerator::with_prefix("s"),
            FeedSettings::builder()
                .short_link_base("https://links.example.com/")
                .build(),
            clock.clone(),
        );
        (feed, store, clock)
    }

    fn with_links(n: usize) -> ContentStorage {
        ContentStorage {
            links: (1..=n).map(|i| link(&format!("testing{i}"))).collect(),
            ..Default::default()
        }
    }

    fn new_short(hours: &str) -> NewShort {
        NewShort::new("title", "content", hours).unwrap()
    }

    #[tokio::test]
    async fn public_links_window() {
        let (feed, _store, _clock) = test_feed(with_links(6));

        let links = feed.public_links().await.unwrap();
        assert_eq!(links.len(), 5);
        assert!(links.iter().all(|l| l.url != "testing1"));
        assert_eq!(links[4].url, "testing6");
    }

    #[tokio::test]
    async fn public_links_fewer_than_window() {
        let (feed, _store, _clock) = test_feed(with_links(3));
        assert_eq!(feed.public_links().await.unwrap().len(), 3);

        let (empty, _store, _clock) = test_feed(ContentStorage::default());
        assert!(empty.public_links().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn public_links_served_from_cache_until_write() {
        let (feed, store, _clock) = test_feed(with_links(2));
        assert_eq!(feed.public_links().await.unwrap().len(), 2);

        // Change the document behind the service's back: the cached view stays.
        store.save(&with_links(4)).await.unwrap();
        assert_eq!(feed.public_links().await.unwrap().len(), 2);

        // A write through the service invalidates and recomputes.
        feed.add_link(NewLink::new("new", "https://example.com").unwrap())
            .await
            .unwrap();
        let links = feed.public_links().await.unwrap();
        assert_eq!(links.len(), 5);
        assert_eq!(links[4].url, "https://example.com");
    }

    #[tokio::test]
    async fn add_link_appends_and_stamps() {
        let (feed, store, _clock) = test_feed(with_links(1));

        let added = feed
            .add_link(NewLink::new("somethingNew", "testing2").unwrap())
            .await
            .unwrap();

        assert_eq!(added.add_date, "2024-05-01T10:17:23.456Z".parse().unwrap());
        let stored = store.snapshot();
        assert_eq!(stored.links.len(), 2);
        assert_eq!(stored.links[1], added);
    }

    #[tokio::test]
    async fn immediate_short_is_visible() {
        let (feed, store, _clock) = test_feed(ContentStorage::default());
        assert!(feed.visible_shorts().await.unwrap().is_empty());

        let added = feed.add_short(new_short("0")).await.unwrap();
        assert_eq!(added.id, ShortId::new("s000000"));
        assert_eq!(added.release_date, "2024-05-01T10:17:23Z".parse().unwrap());
        assert!(!added.pinned);
        assert_eq!(added.kept, 0);

        let visible = feed.visible_shorts().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0], added);
        assert_eq!(store.snapshot().shorts.len(), 1);
    }

    #[tokio::test]
    async fn second_short_same_day_is_separated() {
        let (feed, _store, clock) = test_feed(ContentStorage::default());

        let first = feed.add_short(new_short("0")).await.unwrap();
        clock.advance(SignedDuration::from_hours(3));
        let second = feed.add_short(new_short("0")).await.unwrap();

        let lower = first.release_date + SignedDuration::from_hours(24);
        assert!(second.release_date >= lower);
        assert!(second.release_date < lower + SignedDuration::from_secs(300));

        // Only the first one is public.
        let visible = feed.visible_shorts().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, first.id);
    }

    #[tokio::test]
    async fn scheduled_short_appears_after_release_and_refresh() {
        let (feed, _store, clock) = test_feed(ContentStorage::default());

        let added = feed.add_short(new_short("1")).await.unwrap();
        assert_eq!(added.release_date, "2024-05-01T11:00:00Z".parse().unwrap());
        // Computed at 10:17:23.456, fresh until 11:17:23.456.
        assert!(feed.visible_shorts().await.unwrap().is_empty());

        // Released, but the cached view is still within its staleness budget.
        clock.set("2024-05-01T11:00:30Z".parse().unwrap());
        assert!(feed.visible_shorts().await.unwrap().is_empty());

        // Budget spent: the view is recomputed without any write.
        clock.set("2024-05-01T11:17:24Z".parse().unwrap());
        let visible = feed.visible_shorts().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, added.id);
    }

    #[tokio::test]
    async fn visible_shorts_newest_first_and_capped() {
        let storage = ContentStorage {
            shorts: (0..12)
                .map(|i| Short {
                    id: ShortId::new(format!("id{i:02}")),
                    release_date: start() - SignedDuration::from_hours(24 * (12 - i)),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let (feed, _store, _clock) = test_feed(storage);

        let visible = feed.visible_shorts().await.unwrap();
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].id.as_str(), "id11");
        assert_eq!(visible[9].id.as_str(), "id02");
    }

    #[tokio::test]
    async fn out_of_range_release_changes_nothing() {
        let (feed, store, _clock) = test_feed(ContentStorage::default());

        let err = feed
            .add_short(NewShort::new("t", "c", "999999999999").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Invalid(_)));
        assert!(store.snapshot().shorts.is_empty());
    }

    #[tokio::test]
    async fn export_returns_everything() {
        let (feed, _store, _clock) = test_feed(with_links(6));
        feed.add_short(new_short("0")).await.unwrap();

        let all = feed.export().await.unwrap();
        assert_eq!(all.links.len(), 6);
        assert_eq!(all.shorts.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_writers_lose_nothing() {
        let (feed, store, _clock) = test_feed(ContentStorage::default());
        let feed = Arc::new(feed);

        let mut handles = vec![];
        for i in 0..20 {
            let feed = Arc::clone(&feed);
            handles.push(tokio::spawn(async move {
                feed.add_link(NewLink::new("d", format!("https://example{i}.com")).unwrap())
                    .await
                    .unwrap();
                feed.public_links().await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.snapshot().links.len(), 20);
        assert_eq!(feed.public_links().await.unwrap().len(), 5);
    }

    /// A store whose document never parses.
    #[derive(Default)]
    struct CorruptStore {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ContentStore for CorruptStore {
        async fn load(&self) -> neat_core::store::Result<ContentStorage> {
            Err(StoreError::Corrupt("unexpected end of input".to_string()))
        }

        async fn save(&self, _storage: &ContentStorage) -> neat_core::store::Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn corrupt_store_is_fatal_and_never_saved_over() {
        let feed = FeedService::new(
            CorruptStore::default(),
            SeqGenerator::with_prefix("s"),
            FeedSettings::default(),
        );

        assert!(feed.verify().await.unwrap_err().is_fatal());
        assert!(feed.public_links().await.unwrap_err().is_fatal());
        assert!(feed.visible_shorts().await.unwrap_err().is_fatal());

        let err = feed
            .add_link(NewLink::new("d", "https://example.com").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        let err = feed.add_short(new_short("0")).await.unwrap_err();
        assert!(err.is_fatal());

        assert_eq!(feed.store().saves.load(Ordering::SeqCst), 0);
    }

    /// A store whose document exists but cannot be read.
    #[derive(Default)]
    struct UnreadableStore {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ContentStore for UnreadableStore {
        async fn load(&self) -> neat_core::store::Result<ContentStorage> {
            Err(StoreError::Io("permission denied".to_string()))
        }

        async fn save(&self, _storage: &ContentStorage) -> neat_core::store::Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn unreadable_store_serves_empty_views_but_refuses_writes() {
        let feed = FeedService::new(
            UnreadableStore::default(),
            SeqGenerator::with_prefix("s"),
            FeedSettings::default(),
        );

        assert!(feed.public_links().await.unwrap().is_empty());
        assert!(feed.visible_shorts().await.unwrap().is_empty());

        let err = feed
            .add_link(NewLink::new("d", "https://example.com").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Store(StoreError::Io(_))));
        assert!(!err.is_fatal());
        assert!(feed.add_short(new_short("0")).await.is_err());
        assert!(feed.export().await.is_err());
        assert!(feed.verify().await.is_err());

        assert_eq!(feed.store().saves.load(Ordering::SeqCst), 0);
    }
}
