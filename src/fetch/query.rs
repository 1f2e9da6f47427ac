use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const GENERIC_ERROR: &str = "Une erreur est survenue";

/// Loads one resource for a key.
///
/// `default_error` is shown when the failure carries no message of its own.
#[async_trait]
pub trait Fetcher<K: Send + Sync, T: Send>: Send + Sync {
    async fn fetch(&self, key: &K) -> Result<T>;

    fn default_error(&self) -> &'static str {
        GENERIC_ERROR
    }

    /// Keys that should leave the query idle instead of hitting the source
    fn should_fetch(&self, _key: &K) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Point-in-time view of a query, as rendered by a page
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub status: FetchStatus,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Snapshot<T> {
    fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// Keyed fetch lifecycle: idle, loading, then ready or failed.
///
/// Every fetch takes a generation number; a response is only applied while
/// its generation is still the latest, so a slow answer for an old key can
/// never overwrite the state of a newer one. Locks are never held across the
/// fetch itself.
pub struct Query<K: Send + Sync, T: Send> {
    fetcher: Arc<dyn Fetcher<K, T>>,
    key: Mutex<K>,
    state: Mutex<Snapshot<T>>,
    generation: AtomicU64,
}

impl<K, T> Query<K, T>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + 'static,
{
    /// Idle query; nothing is fetched until `refetch` or `set_key`
    pub fn new(fetcher: impl Fetcher<K, T> + 'static, key: K) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            key: Mutex::new(key),
            state: Mutex::new(Snapshot::idle()),
            generation: AtomicU64::new(0),
        }
    }

    /// Query that has already run its first fetch
    pub async fn start(fetcher: impl Fetcher<K, T> + 'static, key: K) -> Self {
        let query = Self::new(fetcher, key);
        query.refetch().await;
        query
    }

    /// Switch to `key`, refetching only if it differs from the current one
    pub async fn set_key(&self, key: K) -> bool {
        let generation = {
            let mut current = self.key.lock().await;
            if *current == key {
                return false;
            }
            *current = key.clone();
            self.next_generation()
        };

        self.run(key, generation).await;
        true
    }

    pub async fn key(&self) -> K {
        self.key.lock().await.clone()
    }

    /// Run the fetch again for the current key
    pub async fn refetch(&self) {
        let (key, generation) = {
            let current = self.key.lock().await;
            (current.clone(), self.next_generation())
        };

        self.run(key, generation).await;
    }

    /// Key and generation are always taken under the key lock, so the
    /// newest generation belongs to the key `key()` reports.
    async fn run(&self, key: K, generation: u64) {
        if !self.fetcher.should_fetch(&key) {
            let mut state = self.state.lock().await;
            if self.is_current(generation) {
                *state = Snapshot::idle();
            }
            return;
        }

        {
            // Previous data stays visible while loading
            let mut state = self.state.lock().await;
            if self.is_current(generation) {
                state.status = FetchStatus::Loading;
                state.error = None;
            }
        }

        let result = self.fetcher.fetch(&key).await;

        let mut state = self.state.lock().await;
        if !self.is_current(generation) {
            debug!("Discarding stale response (generation {})", generation);
            return;
        }

        *state = match result {
            Ok(data) => Snapshot {
                status: FetchStatus::Ready,
                data: Some(data),
                error: None,
            },
            Err(err) => {
                let mut message = err.to_string();
                if message.trim().is_empty() {
                    message = self.fetcher.default_error().to_string();
                }
                warn!("Fetch failed: {}", message);
                Snapshot {
                    status: FetchStatus::Failed,
                    data: None,
                    error: Some(message),
                }
            }
        };
    }

    /// Back to idle; responses still in flight are dropped
    pub async fn reset(&self) {
        {
            let _key = self.key.lock().await;
            self.next_generation();
        }
        *self.state.lock().await = Snapshot::idle();
    }

    pub async fn snapshot(&self) -> Snapshot<T> {
        self.state.lock().await.clone()
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
