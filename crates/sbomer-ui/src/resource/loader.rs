//! Parameterized async loaders with `{value, loading, error}` state.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::api::{self, ApiError};

/// Snapshot of a loader's state.
///
/// While a new request is in flight the previous `value` stays visible with
/// `loading` set. A failed request clears `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncState<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> AsyncState<T> {
    pub fn is_idle(&self) -> bool {
        !self.loading && self.value.is_none() && self.error.is_none()
    }
}

type FetchFn<P, T> = Arc<dyn Fn(P) -> BoxFuture<'static, api::Result<T>> + Send + Sync>;

struct Inner<P, T> {
    params: Option<P>,
    /// Sequence number of the most recently issued request.
    issued: u64,
    state: AsyncState<T>,
}

/// Issues one fetch per parameter change and keeps the latest result.
///
/// Every request is tagged with a sequence number. A response that is not for
/// the most recently issued request is dropped, so a slow, superseded request
/// can never overwrite newer data.
pub struct ResourceLoader<P, T> {
    name: &'static str,
    fetch: FetchFn<P, T>,
    inner: Arc<Mutex<Inner<P, T>>>,
}

impl<P, T> Clone for ResourceLoader<P, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            fetch: Arc::clone(&self.fetch),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, T> ResourceLoader<P, T>
where
    P: Clone + PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new<F, Fut>(name: &'static str, fetch: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = api::Result<T>> + Send + 'static,
    {
        Self {
            name,
            fetch: Arc::new(move |params| fetch(params).boxed()),
            inner: Arc::new(Mutex::new(Inner {
                params: None,
                issued: 0,
                state: AsyncState::default(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lock(&self) -> MutexGuard<'_, Inner<P, T>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Loader '{}' state lock was poisoned, recovering", self.name);
                poisoned.into_inner()
            }
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AsyncState<T> {
        self.lock().state.clone()
    }

    /// Parameters of the most recently issued request.
    pub fn params(&self) -> Option<P> {
        self.lock().params.clone()
    }

    /// Issues a request for `params` and waits for it.
    ///
    /// Returns the state after the response was applied, or the current state
    /// if the response was superseded in the meantime.
    pub async fn load(&self, params: P) -> AsyncState<T> {
        let seq = {
            let mut inner = self.lock();
            inner.issued += 1;
            inner.params = Some(params.clone());
            inner.state.loading = true;
            inner.state.error = None;
            inner.issued
        };

        tracing::debug!("Loader '{}' issued request #{}", self.name, seq);
        let result = (self.fetch)(params).await;

        let mut inner = self.lock();
        if seq != inner.issued {
            tracing::debug!(
                "Loader '{}' discarded stale response #{} (latest is #{})",
                self.name,
                seq,
                inner.issued
            );
            return inner.state.clone();
        }

        inner.state.loading = false;
        match result {
            Ok(value) => {
                inner.state.value = Some(value);
                inner.state.error = None;
            }
            Err(e) => {
                tracing::debug!("Loader '{}' request #{} failed: {}", self.name, seq, e);
                inner.state.value = None;
                inner.state.error = Some(e);
            }
        }
        inner.state.clone()
    }

    /// Loads only when `params` differ from the last issued request.
    pub async fn set_params(&self, params: P) -> AsyncState<T> {
        let unchanged = self.lock().params.as_ref() == Some(&params);
        if unchanged {
            return self.state();
        }
        self.load(params).await
    }

    /// Re-issues the last request with the same parameters.
    ///
    /// Returns `None` when nothing has been requested yet.
    pub async fn retry(&self) -> Option<AsyncState<T>> {
        let params = self.params()?;
        Some(self.load(params).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn counting_loader() -> (ResourceLoader<u32, String>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let loader = ResourceLoader::new("numbers", move |n: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(ApiError::Status {
                        resource: "numbers".to_string(),
                        status: 500,
                        body: "zero".to_string(),
                    })
                } else {
                    Ok(format!("value-{}", n))
                }
            }
        });
        (loader, calls)
    }

    #[tokio::test]
    async fn test_load_success_and_failure() {
        let (loader, _) = counting_loader();
        assert!(loader.state().is_idle());

        let state = loader.load(3).await;
        assert_eq!(state.value.as_deref(), Some("value-3"));
        assert!(!state.loading);
        assert!(state.error.is_none());

        let state = loader.load(0).await;
        assert!(state.value.is_none());
        assert_eq!(state.error.and_then(|e| e.status()), Some(500));
    }

    #[tokio::test]
    async fn test_set_params_skips_unchanged() {
        let (loader, calls) = counting_loader();
        loader.set_params(1).await;
        loader.set_params(1).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        loader.set_params(2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(loader.params(), Some(2));
    }

    #[tokio::test]
    async fn test_retry_reissues_current_params() {
        let (loader, calls) = counting_loader();
        assert!(loader.retry().await.is_none());

        loader.load(7).await;
        let state = loader.retry().await.unwrap();
        assert_eq!(state.value.as_deref(), Some("value-7"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (tx1, rx1) = oneshot::channel::<String>();
        let (tx2, rx2) = oneshot::channel::<String>();
        let pending: Arc<Mutex<HashMap<u32, oneshot::Receiver<String>>>> =
            Arc::new(Mutex::new([(1, rx1), (2, rx2)].into_iter().collect()));

        let loader = ResourceLoader::new("race", move |n: u32| {
            let rx = pending.lock().unwrap().remove(&n).unwrap();
            async move { Ok(rx.await.unwrap()) }
        });

        let older = loader.load(1);
        let newer = loader.load(2);
        let resolve = async {
            tx2.send("newer".to_string()).unwrap();
            tokio::task::yield_now().await;
            tx1.send("older".to_string()).unwrap();
        };

        let (older_state, newer_state, _) = futures_util::join!(older, newer, resolve);

        assert_eq!(newer_state.value.as_deref(), Some("newer"));
        assert_eq!(older_state.value.as_deref(), Some("newer"));
        assert_eq!(loader.state().value.as_deref(), Some("newer"));
        assert!(!loader.state().loading);
        assert_eq!(loader.params(), Some(2));
    }

    #[tokio::test]
    async fn test_previous_value_visible_while_loading() {
        let (tx, rx) = oneshot::channel::<String>();
        let slot = Arc::new(Mutex::new(Some(rx)));

        let loader = ResourceLoader::new("slow", move |n: u32| {
            let rx = if n == 2 { slot.lock().unwrap().take() } else { None };
            async move {
                match rx {
                    Some(rx) => Ok(rx.await.unwrap()),
                    None => Ok(format!("fast-{}", n)),
                }
            }
        });

        loader.load(1).await;

        let observer = loader.clone();
        let slow = loader.load(2);
        let check = async move {
            let state = observer.state();
            assert!(state.loading);
            assert_eq!(state.value.as_deref(), Some("fast-1"));
            tx.send("slow-2".to_string()).unwrap();
        };
        let (state, _) = futures_util::join!(slow, check);

        assert_eq!(state.value.as_deref(), Some("slow-2"));
        assert!(!state.loading);
    }
}
