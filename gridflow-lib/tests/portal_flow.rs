//! End-to-end wiring of the engine's pieces the way a portal page uses
//! them: filter dispatch clears the selection and forces the table back to
//! page zero, while the selection overlays the fetched rows.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gridflow_lib::error::FetchError;
use gridflow_lib::filter::FieldSpec;
use gridflow_lib::filter::FilterForm;
use gridflow_lib::model::Listing;
use gridflow_lib::model::NodeRow;
use gridflow_lib::notify::notice_channel;
use gridflow_lib::selection::SelectionCoordinator;
use gridflow_lib::selection::SelectionState;
use gridflow_lib::table::RowBatch;
use gridflow_lib::table::RowSource;
use gridflow_lib::table::TableController;
use tokio_util::sync::CancellationToken;

struct SlowSource {
    rows: Vec<NodeRow>,
    delay: Duration,
}

#[async_trait]
impl RowSource<NodeRow> for SlowSource {
    async fn fetch(
        &self,
        listing: &Listing,
        cancel: CancellationToken,
    ) -> Result<RowBatch<NodeRow>, FetchError> {
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
        let total = self.rows.len() as u64;
        tokio::select! {
            () = tokio::time::sleep(self.delay) => Ok(RowBatch::new(rows, total)),
            () = cancel.cancelled() => Err(FetchError::Cancelled),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_clears_selection_before_fetch_resolves() {
    let source = Arc::new(SlowSource {
        rows: vec![
            NodeRow::new("n1", "sample").with_status("New"),
            NodeRow::new("n2", "sample").with_status("Passed"),
        ],
        delay: Duration::from_millis(50),
    });
    let (tx, _rx) = notice_channel();
    let table = Arc::new(TableController::new(
        source.clone() as Arc<dyn RowSource<NodeRow>>,
        tx.clone(),
        10,
    ));
    let selection = Arc::new(SelectionCoordinator::new(
        source.clone() as Arc<dyn RowSource<NodeRow>>,
        tx,
    ));

    // First load, then select both of the two loaded rows.
    table.refresh(true).await;
    selection.set_total(table.snapshot().total);
    selection.toggle_rows(&["n1".into(), "n2".into()]);
    assert_eq!(selection.state(), SelectionState::All);

    // The page wires filter dispatch to selection reset plus a forced
    // return to page zero.
    let mut form = FilterForm::new(vec![FieldSpec::immediate("status", "all")], {
        let selection = selection.clone();
        let table = table.clone();
        Arc::new(move |_name: &str, _value: &str| {
            selection.reset();
            let table = table.clone();
            tokio::spawn(async move { table.reset_to_first_page().await });
        })
    });

    form.set_value("status", "released");

    // The selection is already empty while the new fetch is in flight.
    assert_eq!(selection.state(), SelectionState::None);
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(table.snapshot().loading);
    assert!(selection.selected().is_empty());

    // Let the forced refresh land.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!table.snapshot().loading);
    assert_eq!(table.snapshot().rows.len(), 2);
    assert_eq!(selection.state(), SelectionState::None);
}
