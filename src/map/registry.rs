//! Process-wide load status of the map library.
//!
//! Every map view asks the same registry for the library. The first request
//! starts the one fetch; requests made while it is in flight subscribe to it
//! instead of fetching again. The check and the subscribe happen under one
//! lock, so concurrent mounts cannot both start a fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, info, warn};

use super::provider::{LoadError, LoadResult, MapLibrary, MapProvider};

/// Coarse view of the registry state
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Handle for a subscription to an in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

enum LoadState {
    NotLoaded,
    Loading {
        listeners: Vec<(ListenerId, oneshot::Sender<LoadResult>)>,
    },
    Loaded(Arc<dyn MapLibrary>),
    Failed(LoadError),
}

struct Inner {
    state: LoadState,
    next_listener: u64,
    fetches: u64,
}

impl Inner {
    fn next_id(&mut self) -> ListenerId {
        self.next_listener += 1;
        ListenerId(self.next_listener)
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Answer to a library request
pub enum LoadRequest {
    /// The library is already resident
    Ready(Arc<dyn MapLibrary>),
    /// Subscribed to the fetch in flight
    Pending(PendingLoad),
}

/// One-time subscription to an in-flight load
pub struct PendingLoad {
    id: ListenerId,
    rx: oneshot::Receiver<LoadResult>,
}

impl PendingLoad {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Non-blocking check, for the UI loop. `None` while still loading.
    pub fn try_take(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(LoadError::Aborted)),
        }
    }

    #[cfg(test)]
    pub async fn wait(self) -> LoadResult {
        self.rx.await.unwrap_or(Err(LoadError::Aborted))
    }
}

/// Shared map library registry; clones share state
#[derive(Clone)]
pub struct LibraryRegistry {
    provider: Arc<dyn MapProvider>,
    runtime: Handle,
    inner: Arc<Mutex<Inner>>,
}

impl LibraryRegistry {
    pub fn new(provider: Arc<dyn MapProvider>, runtime: Handle) -> Self {
        Self {
            provider,
            runtime,
            inner: Arc::new(Mutex::new(Inner {
                state: LoadState::NotLoaded,
                next_listener: 0,
                fetches: 0,
            })),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> LibraryStatus {
        match lock(&self.inner).state {
            LoadState::NotLoaded => LibraryStatus::NotLoaded,
            LoadState::Loading { .. } => LibraryStatus::Loading,
            LoadState::Loaded(_) => LibraryStatus::Loaded,
            LoadState::Failed(_) => LibraryStatus::Failed,
        }
    }

    /// Number of fetches started over the registry's lifetime
    #[cfg(test)]
    pub fn fetch_count(&self) -> u64 {
        lock(&self.inner).fetches
    }

    /// Number of views waiting on the in-flight load
    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        match &lock(&self.inner).state {
            LoadState::Loading { listeners } => listeners.len(),
            _ => 0,
        }
    }

    /// Get the library, starting or joining a fetch if needed. A previous
    /// failure is forgotten and the fetch started again.
    pub fn request(&self, api_key: &str) -> LoadRequest {
        let mut guard = lock(&self.inner);
        let inner = &mut *guard;

        if let LoadState::Loaded(library) = &inner.state {
            debug!("map library already loaded");
            return LoadRequest::Ready(Arc::clone(library));
        }

        let id = inner.next_id();
        let (tx, rx) = oneshot::channel();

        match &mut inner.state {
            LoadState::Loading { listeners } => {
                debug!(listener = id.0, "map library already loading, waiting for it");
                listeners.push((id, tx));
            }
            _ => {
                if let LoadState::Failed(err) = &inner.state {
                    info!(%err, "retrying map library load");
                }
                inner.state = LoadState::Loading {
                    listeners: vec![(id, tx)],
                };
                inner.fetches += 1;
                info!(fetch = inner.fetches, "starting map library load");
                self.spawn_fetch(api_key);
            }
        }

        LoadRequest::Pending(PendingLoad { id, rx })
    }

    /// Drop a subscription. The fetch itself keeps running.
    pub fn detach(&self, id: ListenerId) -> bool {
        let mut guard = lock(&self.inner);
        if let LoadState::Loading { listeners } = &mut guard.state {
            let before = listeners.len();
            listeners.retain(|(listener, _)| *listener != id);
            if listeners.len() != before {
                debug!(listener = id.0, "detached from map library load");
                return true;
            }
        }
        false
    }

    fn spawn_fetch(&self, api_key: &str) {
        let fetch = self.provider.fetch(api_key);
        let completion = FetchCompletion {
            inner: Some(Arc::clone(&self.inner)),
        };

        self.runtime.spawn(async move {
            let result = fetch.await;
            completion.finish(result);
        });
    }
}

/// Settles the registry when the fetch task ends. Dropped without
/// `finish` (the fetch panicked or the runtime went away), it records
/// `Aborted` so the load can never stay in flight forever.
struct FetchCompletion {
    inner: Option<Arc<Mutex<Inner>>>,
}

impl FetchCompletion {
    fn finish(mut self, result: LoadResult) {
        if let Some(inner) = self.inner.take() {
            settle(&inner, result);
        }
    }
}

impl Drop for FetchCompletion {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            warn!("map library fetch ended without a result");
            settle(&inner, Err(LoadError::Aborted));
        }
    }
}

/// Record the outcome and hand it to everyone still listening
fn settle(inner: &Mutex<Inner>, result: LoadResult) {
    let listeners = {
        let mut guard = lock(inner);
        let listeners = match std::mem::replace(&mut guard.state, LoadState::NotLoaded) {
            LoadState::Loading { listeners } => listeners,
            _ => Vec::new(),
        };
        guard.state = match &result {
            Ok(library) => LoadState::Loaded(Arc::clone(library)),
            Err(err) => {
                warn!(%err, "map library load failed");
                LoadState::Failed(err.clone())
            }
        };
        listeners
    };

    for (_, tx) in listeners {
        // Receiver gone means the view went away without detaching
        let _ = tx.send(result.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::testing::{FailingProvider, GatedProvider, PanickingProvider};

    #[tokio::test]
    async fn test_first_request_starts_fetch() {
        let provider = GatedProvider::new();
        let registry = LibraryRegistry::new(provider.clone(), Handle::current());
        assert_eq!(registry.status(), LibraryStatus::NotLoaded);

        let request = registry.request("key");
        assert!(matches!(request, LoadRequest::Pending(_)));
        assert_eq!(registry.status(), LibraryStatus::Loading);
        assert_eq!(registry.fetch_count(), 1);
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let provider = GatedProvider::new();
        let registry = LibraryRegistry::new(provider.clone(), Handle::current());

        let first = registry.request("key");
        let second = registry.request("key");
        assert_eq!(registry.fetch_count(), 1);
        assert_eq!(registry.listener_count(), 2);

        provider.release();
        let (LoadRequest::Pending(first), LoadRequest::Pending(second)) = (first, second) else {
            panic!("expected pending loads");
        };
        assert!(first.wait().await.is_ok());
        assert!(second.wait().await.is_ok());
        assert_eq!(registry.status(), LibraryStatus::Loaded);
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_loaded_library_is_returned_immediately() {
        let provider = GatedProvider::new();
        let registry = LibraryRegistry::new(provider.clone(), Handle::current());
        provider.release();
        let LoadRequest::Pending(pending) = registry.request("key") else {
            panic!("expected pending load");
        };
        pending.wait().await.unwrap();

        assert!(matches!(registry.request("key"), LoadRequest::Ready(_)));
        assert_eq!(registry.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_detached_listener_is_not_notified() {
        let provider = GatedProvider::new();
        let registry = LibraryRegistry::new(provider.clone(), Handle::current());
        let LoadRequest::Pending(mut detached) = registry.request("key") else {
            panic!("expected pending load");
        };
        let LoadRequest::Pending(kept) = registry.request("key") else {
            panic!("expected pending load");
        };

        assert!(registry.detach(detached.id()));
        assert!(!registry.detach(detached.id()));
        assert_eq!(registry.listener_count(), 1);

        provider.release();
        assert!(kept.wait().await.is_ok());
        assert!(matches!(
            detached.try_take(),
            Some(Err(LoadError::Aborted))
        ));
    }

    #[tokio::test]
    async fn test_failure_is_reported_and_retried_on_next_request() {
        let provider = FailingProvider::new(LoadError::Status(403));
        let registry = LibraryRegistry::new(provider.clone(), Handle::current());

        let LoadRequest::Pending(pending) = registry.request("key") else {
            panic!("expected pending load");
        };
        assert_eq!(pending.wait().await.unwrap_err(), LoadError::Status(403));
        assert_eq!(registry.status(), LibraryStatus::Failed);

        let LoadRequest::Pending(retry) = registry.request("key") else {
            panic!("expected a new fetch after failure");
        };
        assert_eq!(registry.fetch_count(), 2);
        assert!(retry.wait().await.is_err());
    }

    #[tokio::test]
    async fn test_panicked_fetch_settles_as_aborted() {
        let registry = LibraryRegistry::new(Arc::new(PanickingProvider), Handle::current());

        let LoadRequest::Pending(pending) = registry.request("key") else {
            panic!("expected pending load");
        };
        assert_eq!(pending.wait().await.unwrap_err(), LoadError::Aborted);
        assert_eq!(registry.status(), LibraryStatus::Failed);
        assert_eq!(registry.listener_count(), 0);

        // A later mount starts over instead of joining a dead load
        assert!(matches!(registry.request("key"), LoadRequest::Pending(_)));
        assert_eq!(registry.fetch_count(), 2);
    }
}
