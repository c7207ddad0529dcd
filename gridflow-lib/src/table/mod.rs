//! Table pagination/sort controller.
//!
//! Owns page index, page size, and sort state. Every change builds a
//! [`Listing`] and drives one fetch through the injected [`RowSource`],
//! with three guarantees:
//!
//! - redundant fetches are suppressed (same listing, data already loaded,
//!   no force),
//! - overlapping fetches never both write the displayed rows: starting a
//!   fetch cancels the in-flight one, and a late resolution of a cancelled
//!   request is inert,
//! - a failed fetch keeps the last good rows, clears the loading flag, and
//!   emits exactly one error notice.

mod source;

pub use source::RowBatch;
pub use source::RowSource;

use std::sync::Arc;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::model::CellComparator;
use crate::model::ColumnDescriptor;
use crate::model::Direction;
use crate::model::Listing;
use crate::notify::NoticeSender;

/// Snapshot of the controller's displayed state.
#[derive(Debug, Clone)]
pub struct TableSnapshot<R> {
    /// Rows for the current page. Replaced wholesale on every successful
    /// fetch, never merged.
    pub rows: Vec<R>,
    /// Total rows matching the current filters.
    pub total: u64,
    /// Whether a fetch is outstanding.
    pub loading: bool,
    /// Zero-based page index.
    pub page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Current sort column, if any.
    pub sort_column: Option<String>,
    /// Current sort direction.
    pub sort_direction: Direction,
}

struct Inner<R> {
    rows: Vec<R>,
    total: u64,
    loading: bool,
    /// Set once the first fetch has succeeded; an empty result still
    /// counts as loaded.
    loaded: bool,
    page: u64,
    page_size: u64,
    sort_column: Option<String>,
    sort_direction: Direction,
    /// Comparator of the active sort column, for sources that sort
    /// client-side.
    sort_comparator: Option<CellComparator>,
    last_listing: Option<Listing>,
}

impl<R> Inner<R> {
    fn listing(&self) -> Listing {
        let mut listing = Listing::page(self.page, self.page_size);
        if let Some(column) = &self.sort_column {
            listing = listing.order_by(column.clone(), self.sort_direction);
            if let Some(comparator) = self.sort_comparator {
                listing = listing.with_comparator(comparator);
            }
        }
        listing
    }
}

/// Coordinates paginated, sorted fetching for one table.
///
/// All methods take `&self`; the controller is safe to share behind an
/// `Arc` and drive from multiple tasks. Internal locks are never held
/// across a fetch await.
pub struct TableController<R> {
    source: Arc<dyn RowSource<R>>,
    notices: NoticeSender,
    columns: Vec<ColumnDescriptor>,
    state: Mutex<Inner<R>>,
    inflight: Mutex<Option<CancellationToken>>,
}

impl<R: Clone + Send + 'static> TableController<R> {
    /// Create a controller over a row source.
    pub fn new(source: Arc<dyn RowSource<R>>, notices: NoticeSender, page_size: u64) -> Self {
        Self {
            source,
            notices,
            columns: Vec::new(),
            state: Mutex::new(Inner {
                rows: Vec::new(),
                total: 0,
                loading: false,
                loaded: false,
                page: 0,
                page_size,
                sort_column: None,
                sort_direction: Direction::Asc,
                sort_comparator: None,
                last_listing: None,
            }),
            inflight: Mutex::new(None),
        }
    }

    /// Attach column descriptors so sort requests respect per-column
    /// settings.
    ///
    /// Without descriptors every column is sortable and no comparator is
    /// attached to the listing.
    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = columns;
        self
    }

    /// Snapshot the displayed state for rendering.
    pub fn snapshot(&self) -> TableSnapshot<R> {
        let inner = self.state.lock().expect("table state poisoned");
        TableSnapshot {
            rows: inner.rows.clone(),
            total: inner.total,
            loading: inner.loading,
            page: inner.page,
            page_size: inner.page_size,
            sort_column: inner.sort_column.clone(),
            sort_direction: inner.sort_direction,
        }
    }

    /// The listing the controller would fetch with right now.
    ///
    /// Select-all materialization widens this to [`Listing::FETCH_ALL`].
    pub fn current_listing(&self) -> Listing {
        self.state.lock().expect("table state poisoned").listing()
    }

    /// Move to a page and fetch it.
    pub async fn set_page(&self, page: u64) {
        {
            let mut inner = self.state.lock().expect("table state poisoned");
            inner.page = page;
        }
        self.refresh(false).await;
    }

    /// Change the page size and fetch. Returns to page 0 so the offset
    /// cannot point past the end of the result set.
    pub async fn set_page_size(&self, page_size: u64) {
        {
            let mut inner = self.state.lock().expect("table state poisoned");
            inner.page_size = page_size;
            inner.page = 0;
        }
        self.refresh(false).await;
    }

    /// Sort by a column and fetch.
    ///
    /// Sorting by the current column flips the direction; a new column
    /// starts ascending. Columns marked sort-disabled are ignored.
    pub async fn sort_by(&self, column: &str) {
        let descriptor = self.columns.iter().find(|c| c.key == column);
        if descriptor.is_some_and(|c| c.sort_disabled) {
            return;
        }
        {
            let mut inner = self.state.lock().expect("table state poisoned");
            if inner.sort_column.as_deref() == Some(column) {
                inner.sort_direction = inner.sort_direction.flipped();
            } else {
                inner.sort_column = Some(column.to_string());
                inner.sort_direction = Direction::Asc;
            }
            inner.sort_comparator = descriptor.and_then(|c| c.comparator);
        }
        self.refresh(false).await;
    }

    /// Reset to the first page and force a fetch.
    ///
    /// The filter layer calls this after an accepted filter change; `force`
    /// is implied because the listing may be identical while the filters
    /// behind it are not.
    pub async fn reset_to_first_page(&self) {
        {
            let mut inner = self.state.lock().expect("table state poisoned");
            inner.page = 0;
        }
        self.refresh(true).await;
    }

    /// Fetch the current listing.
    ///
    /// With `force == false`, a listing equal to the previous one is
    /// skipped when data is already loaded; unrelated re-renders can call
    /// this freely without duplicating requests.
    pub async fn refresh(&self, force: bool) {
        let listing = {
            let inner = self.state.lock().expect("table state poisoned");
            let listing = inner.listing();
            if !force && inner.loaded && inner.last_listing.as_ref() == Some(&listing) {
                log::debug!("skipping redundant fetch for unchanged listing");
                return;
            }
            listing
        };

        let token = CancellationToken::new();
        let previous = {
            let mut inflight = self.inflight.lock().expect("inflight lock poisoned");
            inflight.replace(token.clone())
        };
        if let Some(previous) = previous {
            previous.cancel();
        }

        self.state.lock().expect("table state poisoned").loading = true;

        let result = tokio::select! {
            result = self.source.fetch(&listing, token.clone()) => result,
            () = token.cancelled() => Err(FetchError::Cancelled),
        };

        let mut inner = self.state.lock().expect("table state poisoned");
        // Checked under the lock: a newer request may cancel this one at
        // any point up to here, and once it has, it owns the loading flag
        // and the displayed rows.
        if token.is_cancelled() {
            return;
        }
        inner.loading = false;
        match result {
            Ok(batch) => {
                inner.rows = batch.rows;
                inner.total = batch.total;
                inner.loaded = true;
                inner.last_listing = Some(listing);
            }
            Err(FetchError::Cancelled) => {}
            Err(err) => {
                log::warn!("table fetch failed: {err}");
                self.notices
                    .error(format!("Failed to load table data: {err}"));
            }
        }
    }
}
