//! Keyed result cache for page queries.
//!
//! Each `QueryCache` owns one slot behind an async mutex. The mutex is held
//! for the whole fetch, so at most one fetch per key is in flight and callers
//! arriving meanwhile wait for it, then share its outcome: the fresh value,
//! or the error of that same attempt. A failure is never served to callers
//! that arrive after the failing attempt finished; they fetch again.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::backend::BackendError;

/// Outcome of a page query as the page sees it.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// The fetch did not finish within the page's wait budget; it keeps
    /// running and will populate the cache.
    Loading,
    Ready(Arc<T>),
    Failed(BackendError),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&BackendError> {
        match self {
            QueryState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

struct Cached<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

struct Slot<T> {
    cached: Option<Cached<T>>,
    /// Attempt number and error of the last fetch, when it failed.
    failed: Option<(u64, BackendError)>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { cached: None, failed: None }
    }
}

pub struct QueryCache<T> {
    key: &'static str,
    stale_after: Duration,
    slot: Arc<Mutex<Slot<T>>>,
    /// Number of fetch attempts that have finished. Read before queueing on
    /// the slot so a caller can tell which attempts it waited behind.
    finished: Arc<AtomicU64>,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            stale_after: self.stale_after,
            slot: Arc::clone(&self.slot),
            finished: Arc::clone(&self.finished),
        }
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    pub fn new(key: &'static str, stale_after: Duration) -> Self {
        Self {
            key,
            stale_after,
            slot: Arc::new(Mutex::new(Slot::default())),
            finished: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return the cached value if it is fresh, otherwise run `producer` and
    /// cache its result. Callers that queued behind a failed attempt get its
    /// error instead of running `producer` again.
    pub async fn fetch<F, Fut>(&self, producer: F) -> Result<Arc<T>, BackendError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let arrived_after = self.finished.load(Ordering::Acquire);
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.cached.as_ref() {
            if cached.fetched_at.elapsed() < self.stale_after {
                log::debug!("query '{}': cache hit", self.key);
                return Ok(Arc::clone(&cached.value));
            }
        }
        if let Some((attempt, e)) = &slot.failed {
            if *attempt > arrived_after {
                log::debug!("query '{}': sharing failure of attempt {attempt}", self.key);
                return Err(e.clone());
            }
        }

        // Only the lock holder advances the counter.
        let attempt = self.finished.load(Ordering::Acquire) + 1;
        log::debug!("query '{}': fetching (attempt {attempt})", self.key);
        let started = Instant::now();
        let outcome = match producer().await {
            Ok(value) => {
                let value = Arc::new(value);
                slot.cached = Some(Cached { value: Arc::clone(&value), fetched_at: Instant::now() });
                slot.failed = None;
                log::debug!("query '{}': fetched in {:?}", self.key, started.elapsed());
                Ok(value)
            }
            Err(e) => {
                log::warn!("query '{}' failed: {e}", self.key);
                slot.failed = Some((attempt, e.clone()));
                Err(e)
            }
        };
        self.finished.store(attempt, Ordering::Release);
        outcome
    }

    /// Run the fetch as its own task and wait at most `wait` for it.
    ///
    /// On timeout the page gets `Loading`; the task is detached and still
    /// stores its result, so a reload shortly after is served from cache.
    pub async fn load<F, Fut>(&self, producer: F, wait: Duration) -> QueryState<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, BackendError>> + Send + 'static,
    {
        let cache = self.clone();
        let task = tokio::spawn(async move { cache.fetch(producer).await });
        match tokio::time::timeout(wait, task).await {
            Ok(Ok(Ok(value))) => QueryState::Ready(value),
            Ok(Ok(Err(e))) => QueryState::Failed(e),
            Ok(Err(join_err)) => {
                log::error!("query '{}': fetch task failed: {join_err}", self.key);
                QueryState::Failed(BackendError::Task(join_err.to_string()))
            }
            Err(_) => {
                log::debug!("query '{}': still loading after {:?}", self.key, wait);
                QueryState::Loading
            }
        }
    }

    /// Drop the cached value; the next fetch goes to the backend.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = Slot::default();
    }
}
