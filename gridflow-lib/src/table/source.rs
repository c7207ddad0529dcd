//! Row source trait.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::model::Listing;

/// One fetched page of rows plus the total match count.
///
/// Totals drive the pagination controls and the selection tri-state, so a
/// source must report the full match count even when returning one page.
#[derive(Debug, Clone)]
pub struct RowBatch<R> {
    /// The rows for the requested window.
    pub rows: Vec<R>,
    /// Total number of rows matching the current filters.
    pub total: u64,
}

impl<R> RowBatch<R> {
    /// Create a batch.
    pub fn new(rows: Vec<R>, total: u64) -> Self {
        Self { rows, total }
    }
}

/// Supplies rows for a table under the host's current filters.
///
/// Implementations must honor [`Listing::FETCH_ALL`] as "return every
/// matching row" and must cooperate with the cancellation token: when the
/// token fires, short-circuit instead of completing the request.
#[async_trait]
pub trait RowSource<R>: Send + Sync {
    /// Fetch the window described by `listing`.
    async fn fetch(
        &self,
        listing: &Listing,
        cancel: CancellationToken,
    ) -> Result<RowBatch<R>, FetchError>;
}
