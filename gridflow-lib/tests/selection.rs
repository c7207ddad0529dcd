use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use gridflow_lib::error::FetchError;
use gridflow_lib::model::Listing;
use gridflow_lib::model::NodeRow;
use gridflow_lib::notify::NoticeLevel;
use gridflow_lib::notify::notice_channel;
use gridflow_lib::selection::SelectionCoordinator;
use gridflow_lib::selection::SelectionState;
use gridflow_lib::table::RowBatch;
use gridflow_lib::table::RowSource;
use tokio_util::sync::CancellationToken;

/// Row source that serves a fixed universe of rows, windowed by listing.
struct FixedSource {
    rows: Vec<NodeRow>,
    fail: bool,
    seen: Mutex<Vec<Listing>>,
}

impl FixedSource {
    fn of(ids: &[&str]) -> Self {
        Self {
            rows: ids.iter().map(|id| NodeRow::new(*id, "sample")).collect(),
            fail: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn last_listing(&self) -> Listing {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl RowSource<NodeRow> for FixedSource {
    async fn fetch(
        &self,
        listing: &Listing,
        _cancel: CancellationToken,
    ) -> Result<RowBatch<NodeRow>, FetchError> {
        self.seen.lock().unwrap().push(listing.clone());
        if self.fail {
            return Err(FetchError::backend("unavailable"));
        }
        let total = self.rows.len() as u64;
        let rows = if listing.is_fetch_all() {
            self.rows.clone()
        } else {
            self.rows
                .iter()
                .skip(listing.offset as usize)
                .take(listing.first as usize)
                .cloned()
                .collect()
        };
        Ok(RowBatch::new(rows, total))
    }
}

fn coordinator(
    source: FixedSource,
) -> (
    Arc<SelectionCoordinator<NodeRow>>,
    Arc<FixedSource>,
    gridflow_lib::notify::NoticeReceiver,
) {
    let source = Arc::new(source);
    let (tx, rx) = notice_channel();
    let coordinator = Arc::new(SelectionCoordinator::new(
        source.clone() as Arc<dyn RowSource<NodeRow>>,
        tx,
    ));
    (coordinator, source, rx)
}

fn loaded(ids: &[&str]) -> Vec<NodeRow> {
    ids.iter().map(|id| NodeRow::new(*id, "sample")).collect()
}

#[test]
fn test_toggle_is_symmetric_difference() {
    let (selection, _source, _notices) = coordinator(FixedSource::of(&[]));
    selection.set_total(10);

    selection.toggle_rows(&["a".into(), "b".into()]);
    assert_eq!(selection.selected(), vec!["a".to_string(), "b".to_string()]);

    selection.toggle_rows(&["b".into(), "c".into()]);
    assert_eq!(selection.selected(), vec!["a".to_string(), "c".to_string()]);
}

#[test]
fn test_tri_state_derivation() {
    let (selection, _source, _notices) = coordinator(FixedSource::of(&[]));
    selection.set_total(2);

    assert_eq!(selection.state(), SelectionState::None);

    selection.toggle_rows(&["a".into()]);
    assert_eq!(selection.state(), SelectionState::Indeterminate);

    selection.toggle_rows(&["b".into()]);
    assert_eq!(selection.state(), SelectionState::All);
}

#[tokio::test]
async fn test_select_all_uses_loaded_page_when_complete() {
    let (selection, source, _notices) = coordinator(FixedSource::of(&["a", "b"]));
    selection.set_total(2);

    selection
        .select_all(&loaded(&["a", "b"]), &Listing::page(0, 10))
        .await;

    assert_eq!(selection.state(), SelectionState::All);
    // Everything was already loaded: no materialization fetch.
    assert!(source.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_select_all_materializes_beyond_loaded_page() {
    let (selection, source, _notices) = coordinator(FixedSource::of(&["a", "b", "c", "d"]));
    selection.set_total(4);

    selection
        .select_all(&loaded(&["a", "b"]), &Listing::page(0, 2))
        .await;

    assert_eq!(selection.len(), 4);
    assert_eq!(selection.state(), SelectionState::All);
    let listing = source.last_listing();
    assert!(listing.is_fetch_all());
    assert_eq!(listing.offset, 0);
}

#[tokio::test]
async fn test_select_all_failure_is_fail_closed() {
    let (selection, _source, mut notices) = coordinator(FixedSource::failing());
    selection.set_total(4);
    selection.toggle_rows(&["a".into()]);

    selection
        .select_all(&loaded(&["a", "b"]), &Listing::page(0, 2))
        .await;

    assert_eq!(selection.len(), 0);
    assert_eq!(selection.state(), SelectionState::None);

    let notice = notices.try_recv().expect("expected one notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("Cannot select all rows"));
    assert!(notices.try_recv().is_err(), "exactly one notice expected");
}

#[tokio::test]
async fn test_header_toggle_clears_without_fetch_when_selected() {
    let (selection, source, _notices) = coordinator(FixedSource::of(&["a", "b"]));
    selection.set_total(2);
    selection.toggle_rows(&["a".into()]);

    selection
        .header_toggle(&loaded(&["a", "b"]), &Listing::page(0, 10))
        .await;

    assert_eq!(selection.state(), SelectionState::None);
    assert!(source.seen.lock().unwrap().is_empty());
}

#[test]
fn test_view_snapshot_carries_permission_flag() {
    let (selection, _source, _notices) = coordinator(FixedSource::of(&[]));
    selection.set_total(1);
    selection.toggle_rows(&["a".into()]);
    selection.set_can_edit(false);

    let view = selection.view();
    assert!(view.is_selected("a"));
    assert!(!view.is_selected("b"));
    assert!(!view.can_edit);
    assert_eq!(view.state(), SelectionState::All);
}

#[test]
fn test_filter_change_resets_selection() {
    let (selection, _source, _notices) = coordinator(FixedSource::of(&[]));
    selection.set_total(2);
    selection.toggle_rows(&["a".into(), "b".into()]);
    assert_eq!(selection.state(), SelectionState::All);

    // The filter layer's dispatch hook clears selection before any fetch
    // for the new filters resolves.
    selection.reset();
    assert_eq!(selection.state(), SelectionState::None);
    assert!(selection.selected().is_empty());
}
