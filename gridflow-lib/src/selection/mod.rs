//! Tri-state row selection.
//!
//! Selection is keyed on stable row ids and may span pages that are not
//! loaded: selecting "all" under the current filters materializes every
//! matching row id through the row source's [`Listing::FETCH_ALL`]
//! sentinel. Materialization is fail-closed: if the fetch fails, the
//! selection ends up empty, never silently partial.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use crate::model::Listing;
use crate::model::RowKey;
use crate::notify::NoticeSender;
use crate::table::RowSource;

/// Derived tri-state of a selection against the filtered total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected.
    None,
    /// Some but not all matching rows selected.
    Indeterminate,
    /// Every matching row selected.
    All,
}

/// Immutable selection snapshot for render seams.
///
/// Passed explicitly into per-row render callbacks so checkbox cells can
/// read selection without ambient context. `can_edit` comes from the host's
/// permission check; when false, checkboxes render disabled.
#[derive(Debug, Clone)]
pub struct SelectionView {
    selected: HashSet<String>,
    state: SelectionState,
    /// Whether the current user may change the selection.
    pub can_edit: bool,
    /// Whether a select-all materialization is in flight.
    pub materializing: bool,
}

impl SelectionView {
    /// Whether the given row is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// The derived tri-state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

struct Inner {
    selected: HashSet<String>,
    total: u64,
    materializing: bool,
    can_edit: bool,
}

impl Inner {
    fn state(&self) -> SelectionState {
        if self.selected.is_empty() {
            SelectionState::None
        } else if self.total > 0 && self.selected.len() as u64 == self.total {
            SelectionState::All
        } else {
            SelectionState::Indeterminate
        }
    }
}

/// Tracks selected row ids across pages for one table.
pub struct SelectionCoordinator<R> {
    source: Arc<dyn RowSource<R>>,
    notices: NoticeSender,
    inner: Mutex<Inner>,
}

impl<R: RowKey + Send + 'static> SelectionCoordinator<R> {
    /// Create an empty selection over a row source.
    ///
    /// The source is used only for select-all materialization and should
    /// be the same one backing the table.
    pub fn new(source: Arc<dyn RowSource<R>>, notices: NoticeSender) -> Self {
        Self {
            source,
            notices,
            inner: Mutex::new(Inner {
                selected: HashSet::new(),
                total: 0,
                materializing: false,
                can_edit: true,
            }),
        }
    }

    /// Sync the filtered total after a table fetch.
    pub fn set_total(&self, total: u64) {
        self.inner.lock().expect("selection state poisoned").total = total;
    }

    /// Set whether the current user may change the selection.
    pub fn set_can_edit(&self, can_edit: bool) {
        self.inner
            .lock()
            .expect("selection state poisoned")
            .can_edit = can_edit;
    }

    /// Symmetric-difference the given ids into the selection.
    ///
    /// Selected ids are removed, unselected ones added. Synchronous, no
    /// fetch.
    pub fn toggle_rows(&self, ids: &[String]) {
        let mut inner = self.inner.lock().expect("selection state poisoned");
        for id in ids {
            if !inner.selected.remove(id) {
                inner.selected.insert(id.clone());
            }
        }
    }

    /// The derived tri-state.
    pub fn state(&self) -> SelectionState {
        self.inner.lock().expect("selection state poisoned").state()
    }

    /// Sorted selected ids.
    pub fn selected(&self) -> Vec<String> {
        let inner = self.inner.lock().expect("selection state poisoned");
        let mut ids: Vec<_> = inner.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("selection state poisoned")
            .selected
            .len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot for render seams.
    pub fn view(&self) -> SelectionView {
        let inner = self.inner.lock().expect("selection state poisoned");
        SelectionView {
            selected: inner.selected.clone(),
            state: inner.state(),
            can_edit: inner.can_edit,
            materializing: inner.materializing,
        }
    }

    /// Clear the selection.
    ///
    /// Called on every accepted filter change, before the next fetch
    /// resolves, so the selection can never refer to rows outside the new
    /// filter's result set.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("selection state poisoned");
        inner.selected.clear();
        inner.materializing = false;
    }

    /// Header-checkbox behavior: clear when anything is selected,
    /// otherwise select everything matching the current filters.
    pub async fn header_toggle(&self, loaded: &[R], listing: &Listing) {
        match self.state() {
            SelectionState::All | SelectionState::Indeterminate => self.reset(),
            SelectionState::None => self.select_all(loaded, listing).await,
        }
    }

    /// Select every row matching the current filters.
    ///
    /// When the loaded page already holds every matching row, selects
    /// exactly those ids without a fetch. Otherwise widens `listing` to
    /// [`Listing::FETCH_ALL`] and replaces the selection with every
    /// returned id. On failure the selection is cleared and a distinct
    /// notice raised, so a partial selection is never left behind.
    pub async fn select_all(&self, loaded: &[R], listing: &Listing) {
        {
            let mut inner = self.inner.lock().expect("selection state poisoned");
            if loaded.len() as u64 == inner.total {
                inner.selected = loaded.iter().map(|r| r.row_id().to_string()).collect();
                return;
            }
            inner.materializing = true;
        }

        let widened = listing.widened();
        let result = self
            .source
            .fetch(&widened, CancellationToken::new())
            .await;

        let mut inner = self.inner.lock().expect("selection state poisoned");
        inner.materializing = false;
        match result {
            Ok(batch) => {
                inner.selected = batch
                    .rows
                    .iter()
                    .map(|r| r.row_id().to_string())
                    .collect();
                inner.total = batch.total;
            }
            Err(err) => {
                inner.selected.clear();
                log::warn!("select-all materialization failed: {err}");
                self.notices
                    .error("Cannot select all rows. Please try again later.");
            }
        }
    }
}
