//! Domain service for search-term counters and the trending list derived
//! from them.

use crate::models::{Movie, SearchCounter};
use crate::store::StoreError;
use thiserror::Error;
use tracing::error;

/// Errors specific to search-count operations.
#[derive(Debug, Error)]
pub enum SearchCountError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Domain service trait for search counters.
#[async_trait::async_trait]
pub trait SearchCountService: Send + Sync {
    /// Increments the counter for `query`, creating it with a count of 1 on
    /// the first search. The returned counter is the document as written.
    ///
    /// The lookup and the write are separate store calls. Two concurrent
    /// first searches of the same term can both miss the lookup and create
    /// two counters; two concurrent repeat searches can both read count `n`
    /// and both write `n + 1`.
    async fn record_search(
        &self,
        query: &str,
        movie: &Movie,
    ) -> Result<SearchCounter, SearchCountError>;

    /// Most-searched counters first, capped at the configured limit.
    async fn try_fetch_trending(&self) -> Result<Vec<SearchCounter>, SearchCountError>;

    /// Best-effort variant of [`Self::try_fetch_trending`]: failures are
    /// logged and yield `None`.
    async fn fetch_trending(&self) -> Option<Vec<SearchCounter>> {
        match self.try_fetch_trending().await {
            Ok(counters) => Some(counters),
            Err(e) => {
                error!(error = %e, "Failed to fetch trending movies");
                metrics::counter!("store_read_failures_total", "operation" => "fetch_trending")
                    .increment(1);
                None
            }
        }
    }
}
