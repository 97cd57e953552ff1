//! Async request state for views.
//!
//! A [`Fetcher`] wraps a zero-argument async function and tracks
//! `{ data, loading, error }` for it. Views read snapshots with
//! [`Fetcher::state`] or follow changes through [`Fetcher::subscribe`].
//!
//! Overlapping [`Fetcher::refetch`] calls are neither queued nor merged. Each
//! call writes its own outcome when it resolves, so the call that resolves
//! last wins even if it was issued first, and the first resolution clears
//! `loading` while later calls are still in flight.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

type FetchFn<T> = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
}

impl From<&anyhow::Error> for ErrorInfo {
    fn from(err: &anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Whether construction starts the first fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    Eager,
    #[default]
    Lazy,
}

pub struct Fetcher<T> {
    fetch: FetchFn<T>,
    state: Arc<watch::Sender<FetchState<T>>>,
}

impl<T> Clone for Fetcher<T> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Fetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wraps `fetch`. With [`FetchMode::Eager`] the first call is spawned on
    /// the current tokio runtime, so this must then run inside one.
    pub fn new<F, Fut>(fetch: F, mode: FetchMode) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let fetch: FetchFn<T> = Arc::new(move || fetch().boxed());
        let (state, _) = watch::channel(FetchState {
            loading: mode == FetchMode::Eager,
            ..FetchState::default()
        });

        let fetcher = Self {
            fetch,
            state: Arc::new(state),
        };

        if mode == FetchMode::Eager {
            let eager = fetcher.clone();
            tokio::spawn(async move { eager.resolve().await });
        }

        fetcher
    }

    #[must_use]
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Invokes the wrapped function again and records its outcome.
    ///
    /// On failure the previous `data` is kept alongside the new error.
    pub async fn refetch(&self) {
        self.state.send_modify(|state| state.loading = true);
        self.resolve().await;
    }

    /// Clears data and error without invoking the function.
    pub fn reset(&self) {
        self.state.send_modify(|state| *state = FetchState::default());
    }

    async fn resolve(&self) {
        let outcome = (self.fetch)().await;

        self.state.send_modify(|state| {
            match outcome {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(e) => state.error = Some(ErrorInfo::from(&e)),
            }
            state.loading = false;
        });
    }
}
