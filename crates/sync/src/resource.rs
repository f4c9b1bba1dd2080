//! Generic asynchronous resource primitive.
//!
//! Manages the idle -> loading -> success/error lifecycle of one remote
//! collection and publishes every transition through a watch channel.
//! Overlapping invocations are sequenced with a generation counter: only
//! the most recently initiated invocation may write state at settlement,
//! so a slow superseded fetch can never clobber a newer result.

use async_trait::async_trait;
use sprintdeck_client::ApiError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Consumer-visible view of a remote collection.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Last successfully fetched snapshot; `None` until the first success.
    /// A failed fetch leaves the previous snapshot in place.
    pub data: Option<Vec<T>>,

    /// Whether a fetch is in flight.
    pub loading: bool,

    /// Message from the most recent failed fetch; cleared when a new
    /// fetch starts.
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// Snapshot rows, or an empty slice before the first successful load.
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// A zero-argument fetch operation the primitive can re-run at will.
#[async_trait]
pub trait FetchOperation<T>: Send + Sync {
    /// Fetch a fresh snapshot of the collection.
    async fn fetch(&self) -> Result<Vec<T>, ApiError>;
}

struct Inner<T> {
    op: Arc<dyn FetchOperation<T>>,
    state: watch::Sender<ResourceState<T>>,
    generation: AtomicU64,
}

/// An asynchronously synchronized remote collection.
///
/// Cloning is cheap and shares the underlying state; all clones observe
/// and drive the same collection.
pub struct Resource<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle resource over the given fetch operation.
    pub fn new(op: Arc<dyn FetchOperation<T>>) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            inner: Arc::new(Inner {
                op,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Run one full fetch cycle and wait for it to settle.
    ///
    /// `loading` is set and `error` cleared before the operation is
    /// polled. A fetch that fails leaves `data` untouched and records the
    /// failure message instead; the error is never re-raised from here.
    pub async fn refetch(&self) {
        let generation = self.begin();
        let result = self.inner.op.fetch().await;
        self.settle(generation, result);
    }

    /// Request a refetch without waiting for it.
    ///
    /// Used by mutations, which must not settle on behalf of the caller.
    /// The invocation is opened before this returns, so `loading` is
    /// already flagged; only the operation itself runs in the background.
    pub fn invalidate(&self) {
        let generation = self.begin();
        let resource = self.clone();
        tokio::spawn(async move {
            let result = resource.inner.op.fetch().await;
            resource.settle(generation, result);
        });
    }

    /// Fetch now, then refetch whenever the watched dependency changes
    /// value. Changes are judged by value equality, so re-publishing an
    /// equal dependency does not trigger a fetch.
    ///
    /// The subscription ends when the sender side is dropped; aborting
    /// the returned handle cancels it early for a consumer that has lost
    /// interest.
    pub fn watch_dependency<D>(&self, mut rx: watch::Receiver<D>) -> JoinHandle<()>
    where
        D: Clone + PartialEq + Send + Sync + 'static,
    {
        let resource = self.clone();
        tokio::spawn(async move {
            let mut seen = rx.borrow().clone();
            resource.refetch().await;
            while rx.changed().await.is_ok() {
                let current = rx.borrow_and_update().clone();
                if current != seen {
                    seen = current;
                    resource.refetch().await;
                }
            }
        })
    }

    /// Open a new invocation: bump the generation, flag loading, clear
    /// the previous error. Runs before the operation is polled.
    fn begin(&self) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        generation
    }

    /// Apply a settled result, unless a newer invocation superseded this
    /// one. A superseded invocation writes nothing at all; the newest
    /// invocation owns the `loading` flag.
    fn settle(&self, generation: u64, result: Result<Vec<T>, ApiError>) {
        self.inner.state.send_if_modified(|state| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                debug!("discarding superseded fetch (generation {})", generation);
                return false;
            }

            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(err) => {
                    warn!("collection fetch failed: {}", err);
                    state.error = Some(fetch_error_message(&err));
                }
            }
            state.loading = false;
            true
        });
    }
}

/// Fallback when a failure carries no usable message.
const GENERIC_ERROR: &str = "An error occurred";

fn fetch_error_message(err: &ApiError) -> String {
    let message = err.message();
    if message.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Fetch operation replaying a script of (delay, result) entries.
    struct ScriptedFetch {
        script: Mutex<VecDeque<(u64, Result<Vec<u32>, ApiError>)>>,
    }

    impl ScriptedFetch {
        fn new(entries: Vec<(u64, Result<Vec<u32>, ApiError>)>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(entries.into()),
            })
        }
    }

    #[async_trait]
    impl FetchOperation<u32> for ScriptedFetch {
        async fn fetch(&self) -> Result<Vec<u32>, ApiError> {
            let (delay_ms, result) = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetch script exhausted");
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            result
        }
    }

    fn server_error(detail: &str) -> ApiError {
        ApiError::Status {
            status: 500,
            detail: Some(detail.to_string()),
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![]));
        let state = resource.state();
        assert!(state.data.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.items().is_empty());
    }

    #[tokio::test]
    async fn fetch_populates_data_and_clears_loading() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![(0, Ok(vec![1, 2]))]));
        resource.refetch().await;

        let state = resource.state();
        assert_eq!(state.data, Some(vec![1, 2]));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_is_flagged_before_the_operation_settles() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![(100, Ok(vec![1]))]));
        let mut rx = resource.subscribe();

        let runner = {
            let resource = resource.clone();
            tokio::spawn(async move { resource.refetch().await })
        };

        rx.changed().await.unwrap();
        assert!(rx.borrow().loading);

        runner.await.unwrap();
        assert!(!resource.state().loading);
    }

    #[tokio::test]
    async fn failed_fetch_preserves_previous_data() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![
            (0, Ok(vec![7])),
            (0, Err(server_error("backend down"))),
        ]));

        resource.refetch().await;
        resource.refetch().await;

        let state = resource.state();
        assert_eq!(state.data, Some(vec![7]));
        assert_eq!(state.error.as_deref(), Some("backend down"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn new_fetch_clears_previous_error() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![
            (0, Err(server_error("flake"))),
            (0, Ok(vec![3])),
        ]));

        resource.refetch().await;
        assert!(resource.state().error.is_some());

        resource.refetch().await;
        let state = resource.state();
        assert!(state.error.is_none());
        assert_eq!(state.data, Some(vec![3]));
    }

    #[tokio::test(start_paused = true)]
    async fn latest_invocation_wins_the_race() {
        // First invocation is slow, second is fast: the second settles
        // first and the first must be discarded when it finally lands.
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![
            (300, Ok(vec![1])),
            (50, Ok(vec![2])),
        ]));

        let slow = {
            let resource = resource.clone();
            tokio::spawn(async move { resource.refetch().await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let fast = {
            let resource = resource.clone();
            tokio::spawn(async move { resource.refetch().await })
        };

        slow.await.unwrap();
        fast.await.unwrap();

        let state = resource.state();
        assert_eq!(state.data, Some(vec![2]));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_failure_does_not_surface() {
        // A slow failing fetch must not overwrite the error/data of the
        // fast success that superseded it.
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![
            (300, Err(server_error("stale failure"))),
            (50, Ok(vec![9])),
        ]));

        let slow = {
            let resource = resource.clone();
            tokio::spawn(async move { resource.refetch().await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let fast = {
            let resource = resource.clone();
            tokio::spawn(async move { resource.refetch().await })
        };

        slow.await.unwrap();
        fast.await.unwrap();

        let state = resource.state();
        assert_eq!(state.data, Some(vec![9]));
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_refetches_in_the_background() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![(0, Ok(vec![4]))]));

        resource.invalidate();
        assert!(resource.state().loading);

        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = resource.state();
        assert_eq!(state.data, Some(vec![4]));
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn dependency_subscription_refetches_on_value_change_only() {
        let resource: Resource<u32> = Resource::new(ScriptedFetch::new(vec![
            (0, Ok(vec![1])),
            (0, Ok(vec![2])),
        ]));
        let (tx, rx) = watch::channel(0u32);

        let handle = resource.watch_dependency(rx);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(resource.state().data, Some(vec![1]));

        // Same value republished: no refetch.
        tx.send(0).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(resource.state().data, Some(vec![1]));

        // Value actually changes: refetch.
        tx.send(7).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(resource.state().data, Some(vec![2]));

        handle.abort();
    }
}
