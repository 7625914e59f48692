use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

/// Generated asset reference (data URI, URL or generated text).
pub type Asset = Arc<str>;

/// Result of an [`AssetCache::ensure`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// A value was already stored; the generator was not invoked.
    Cached(Asset),
    /// Another generation for this key is running; the generator was not invoked.
    InFlight,
    /// The generator ran and its value is now stored.
    Generated(Asset),
    /// The generator ran and produced nothing; the key stays absent.
    Failed,
}

impl EnsureOutcome {
    pub fn asset(&self) -> Option<&Asset> {
        match self {
            Self::Cached(asset) | Self::Generated(asset) => Some(asset),
            Self::InFlight | Self::Failed => None,
        }
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Asset>,
    in_flight: HashSet<String>,
}

/// Process-wide map from entity id to its generated asset.
///
/// Entries are written once and never replaced or evicted. At most one
/// generation per id runs at a time; a failed generation leaves the id absent
/// so a later `ensure` may retry. Clones share the same storage.
#[derive(Clone)]
pub struct AssetCache {
    label: &'static str,
    state: Arc<Mutex<CacheState>>,
}

/// Clears the in-flight mark for `id` when the generation finishes or is dropped.
struct InFlightGuard<'a> {
    cache: &'a AssetCache,
    id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.cache.lock().in_flight.remove(&self.id);
    }
}

impl AssetCache {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, id: &str) -> Option<Asset> {
        self.lock().entries.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().entries.contains_key(id)
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.lock().in_flight.contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Generate and store an asset for `id` unless one exists or is being made.
    pub async fn ensure<F, Fut>(&self, id: &str, generator: F) -> EnsureOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        {
            let mut state = self.lock();
            if let Some(asset) = state.entries.get(id) {
                return EnsureOutcome::Cached(Arc::clone(asset));
            }
            if !state.in_flight.insert(id.to_string()) {
                tracing::debug!(cache = self.label, id, "generation already in flight");
                return EnsureOutcome::InFlight;
            }
        }

        let _guard = InFlightGuard {
            cache: self,
            id: id.to_string(),
        };
        tracing::debug!(cache = self.label, id, "generating asset");

        match generator().await {
            Some(value) => {
                let asset = Arc::clone(
                    self.lock()
                        .entries
                        .entry(id.to_string())
                        .or_insert_with(|| Asset::from(value)),
                );
                tracing::info!(cache = self.label, id, bytes = asset.len(), "asset stored");
                EnsureOutcome::Generated(asset)
            }
            None => {
                tracing::debug!(cache = self.label, id, "generation produced nothing");
                EnsureOutcome::Failed
            }
        }
    }

    /// Run [`ensure`](Self::ensure) on a background task.
    pub fn spawn_ensure<F, Fut>(&self, id: impl Into<String>, generator: F) -> JoinHandle<EnsureOutcome>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Option<String>> + Send + 'static,
    {
        let cache = self.clone();
        let id = id.into();
        tokio::spawn(async move { cache.ensure(&id, generator).await })
    }
}

impl std::fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("AssetCache")
            .field("label", &self.label)
            .field("entries", &state.entries.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn ensure_stores_generated_value() {
        let cache = AssetCache::new("image");
        let outcome = cache
            .ensure("1", || async { Some("data:image/png;base64,AAAA".to_string()) })
            .await;
        assert_eq!(
            outcome,
            EnsureOutcome::Generated(Asset::from("data:image/png;base64,AAAA"))
        );
        assert_eq!(cache.get("1").as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(!cache.is_in_flight("1"));
    }

    #[tokio::test]
    async fn cached_value_skips_generator_and_never_changes() {
        let cache = AssetCache::new("image");
        cache.ensure("1", || async { Some("first".to_string()) }).await;

        let calls = AtomicUsize::new(0);
        let outcome = cache
            .ensure("1", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Some("second".to_string())
            })
            .await;

        assert_eq!(outcome, EnsureOutcome::Cached(Asset::from("first")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        for _ in 0..3 {
            assert_eq!(cache.get("1").as_deref(), Some("first"));
        }
    }

    #[tokio::test]
    async fn failed_generation_leaves_key_absent_for_retry() {
        let cache = AssetCache::new("image");
        assert_eq!(cache.ensure("7", || async { None }).await, EnsureOutcome::Failed);
        assert!(cache.get("7").is_none());
        assert!(!cache.is_in_flight("7"));

        let retried = cache.ensure("7", || async { Some("ok".to_string()) }).await;
        assert!(matches!(retried, EnsureOutcome::Generated(_)));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_ensure_invokes_generator_once() {
        let cache = AssetCache::new("image");
        let calls = Arc::new(AtomicUsize::new(0));

        let make_generator = |calls: Arc<AtomicUsize>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(500)).await;
                Some("asset".to_string())
            }
        };

        let first = cache.spawn_ensure("3", make_generator(Arc::clone(&calls)));
        tokio::task::yield_now().await;
        assert!(cache.is_in_flight("3"));

        let second = cache.ensure("3", make_generator(Arc::clone(&calls))).await;
        assert_eq!(second, EnsureOutcome::InFlight);

        let first = first.await.unwrap();
        assert!(matches!(first, EnsureOutcome::Generated(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get("3").as_deref(), Some("asset"));
    }

    #[tokio::test]
    async fn dropped_generation_clears_in_flight_mark() {
        let cache = AssetCache::new("bio");
        let pending = cache.ensure("x", || std::future::pending::<Option<String>>());
        tokio::select! {
            _ = pending => unreachable!("pending future never resolves"),
            () = tokio::task::yield_now() => {}
        }
        assert!(!cache.is_in_flight("x"));
        assert!(cache.get("x").is_none());
    }

    #[tokio::test]
    async fn keys_are_independent_and_clones_share_storage() {
        let cache = AssetCache::new("image");
        let view = cache.clone();
        cache.ensure("a", || async { Some("A".to_string()) }).await;
        cache.ensure("b", || async { None }).await;

        assert_eq!(view.get("a").as_deref(), Some("A"));
        assert!(view.get("b").is_none());
        assert_eq!(view.len(), 1);
        assert!(!view.is_empty());
        assert!(view.contains("a"));
    }
}
