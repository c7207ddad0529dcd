use gridflow_lib::model::ColumnDescriptor;
use gridflow_lib::prefs::MemoryBackend;
use gridflow_lib::prefs::PreferenceBackend;
use gridflow_lib::prefs::PreferenceStore;
use gridflow_lib::visibility;
use gridflow_lib::visibility::VisibilityController;
use gridflow_lib::visibility::VisibilityModel;

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").pinned(),
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("status", "Status"),
        ColumnDescriptor::new("notes", "Notes").hidden_by_default(),
    ]
}

#[test]
fn test_default_model_respects_default_hidden() {
    let model = visibility::compute_default(&columns());
    assert_eq!(model.get("id"), Some(true));
    assert_eq!(model.get("name"), Some(true));
    assert_eq!(model.get("notes"), Some(false));
}

#[test]
fn test_adjust_forces_pinned_columns_visible() {
    let cols = columns();
    let mut model = VisibilityModel::new();
    model.set("id", false);
    model.set("name", false);

    let adjusted = visibility::adjust(&model, &cols);
    assert_eq!(adjusted.get("id"), Some(true));
    assert_eq!(adjusted.get("name"), Some(false));
}

#[test]
fn test_adjust_fills_missing_keys_from_declared_defaults() {
    let cols = columns();
    let adjusted = visibility::adjust(&VisibilityModel::new(), &cols);
    assert_eq!(adjusted, visibility::compute_default(&cols));
}

#[test]
fn test_toggle_all_keeps_pinned_columns() {
    let cols = columns();
    let hidden = visibility::toggle_all(&cols, false);
    assert_eq!(hidden.get("id"), Some(true));
    assert_eq!(hidden.get("name"), Some(false));
    assert_eq!(hidden.get("notes"), Some(false));

    let shown = visibility::toggle_all(&cols, true);
    assert_eq!(shown.get("notes"), Some(true));
}

#[test]
fn test_visible_columns_never_omits_pinned() {
    let cols = columns();
    let all_hidden = visibility::toggle_all(&cols, false);
    let visible = visibility::visible_columns(&cols, &all_hidden, false);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].key, "id");
}

#[test]
fn test_visible_columns_alphabetical_order() {
    let cols = vec![
        ColumnDescriptor::new("z", "zebra"),
        ColumnDescriptor::new("a", "Apple"),
        ColumnDescriptor::new("m", "mango"),
    ];
    let model = visibility::compute_default(&cols);
    let visible = visibility::visible_columns(&cols, &model, true);
    let labels: Vec<&str> = visible.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Apple", "mango", "zebra"]);
}

#[test]
fn test_unlisted_group_drops_its_columns() {
    let cols = vec![
        ColumnDescriptor::new("a", "A").in_group("listed"),
        ColumnDescriptor::new("b", "B").in_group("missing"),
        ColumnDescriptor::new("c", "C"),
    ];
    let buckets = visibility::grouped(&cols, &["listed"]);
    assert_eq!(buckets.len(), 1);
    let keys: Vec<&str> = buckets[0].1.iter().map(|c| c.key.as_str()).collect();
    // "b" (group not listed) and "c" (no group) do not render at all.
    assert_eq!(keys, vec!["a"]);
}

#[tokio::test]
async fn test_toggles_then_reset_restores_default() {
    let store = PreferenceStore::in_memory();
    let mut controller =
        VisibilityController::load(store, "submitted-data", "mine", columns()).await;

    controller.toggle("name").await;
    controller.toggle("notes").await;
    controller.toggle("name").await;
    controller.toggle_all(false).await;
    controller.reset().await;

    assert_eq!(controller.model(), &visibility::compute_default(&columns()));
}

#[tokio::test]
async fn test_controller_persists_and_reloads() {
    let store = PreferenceStore::in_memory();
    {
        let mut controller =
            VisibilityController::load(store.clone(), "submitted-data", "mine", columns()).await;
        controller.toggle("name").await;
    }

    let reloaded = VisibilityController::load(store, "submitted-data", "mine", columns()).await;
    assert_eq!(reloaded.model().get("name"), Some(false));
    assert_eq!(reloaded.model().get("id"), Some(true));
}

#[tokio::test]
async fn test_contexts_remember_visibility_independently() {
    let store = PreferenceStore::in_memory();
    let mut first =
        VisibilityController::load(store.clone(), "submitted-data", "released", columns()).await;
    first.toggle("name").await;

    let second = VisibilityController::load(store, "submitted-data", "all", columns()).await;
    assert_eq!(second.model().get("name"), Some(true));
}

#[tokio::test]
async fn test_corrupt_store_falls_back_to_defaults() {
    let backend = MemoryBackend::new();
    backend
        .save("submitted-data", "mine", vec![0xFF, 0xFF, 0xFF])
        .await
        .unwrap();
    let store = PreferenceStore::new(backend);

    let controller =
        VisibilityController::load(store, "submitted-data", "mine", columns()).await;
    assert_eq!(controller.model(), &visibility::compute_default(&columns()));
}

#[tokio::test]
async fn test_persisted_model_cannot_hide_pinned_column() {
    let store = PreferenceStore::in_memory();
    let mut hostile = VisibilityModel::new();
    hostile.set("id", false);
    store.set("submitted-data", "mine", &hostile).await.unwrap();

    let controller =
        VisibilityController::load(store, "submitted-data", "mine", columns()).await;
    assert_eq!(controller.model().get("id"), Some(true));
}
