//! Per-table visibility controller with write-through persistence.

use super::adjust;
use super::compute_default;
use super::toggle_all;
use super::visible_columns;
use super::VisibilityModel;
use crate::model::TableColumn;
use crate::prefs::PreferenceStore;

/// Owns one table's visibility model and keeps it in sync with the
/// preference store.
///
/// State is keyed by table identity plus a filter context, so different
/// contexts of the same table remember their visibility independently.
/// Concurrent instances sharing a table and context are last-write-wins.
pub struct VisibilityController<C: TableColumn> {
    columns: Vec<C>,
    model: VisibilityModel,
    table_id: String,
    context: String,
    store: PreferenceStore,
}

impl<C: TableColumn> VisibilityController<C> {
    /// Seed a controller from persisted state.
    ///
    /// A missing, unavailable, or corrupt store entry falls back to the
    /// columns' declared defaults. Persisted state is normalized on read,
    /// so a stored model can never hide a pinned column.
    pub async fn load(
        store: PreferenceStore,
        table_id: impl Into<String>,
        context: impl Into<String>,
        columns: Vec<C>,
    ) -> Self {
        let table_id = table_id.into();
        let context = context.into();
        let model = match store
            .get_or_empty::<VisibilityModel>(&table_id, &context)
            .await
        {
            Some(persisted) => adjust(&persisted, &columns),
            None => compute_default(&columns),
        };
        Self {
            columns,
            model,
            table_id,
            context,
            store,
        }
    }

    /// The current (normalized) model.
    pub fn model(&self) -> &VisibilityModel {
        &self.model
    }

    /// The column list this controller governs.
    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    /// The currently visible columns, in declaration or label order.
    pub fn visible(&self, sort_alphabetically: bool) -> Vec<&C> {
        visible_columns(&self.columns, &self.model, sort_alphabetically)
    }

    /// Accept a caller-supplied model, normalized and persisted.
    pub async fn set_model(&mut self, model: VisibilityModel) {
        self.model = adjust(&model, &self.columns);
        self.persist().await;
    }

    /// Toggle a single column and persist.
    ///
    /// Toggling a pinned or unknown key is a no-op.
    pub async fn toggle(&mut self, key: &str) {
        let mut next = self.model.clone();
        next.set(key, !next.is_visible(key));
        self.set_model(next).await;
    }

    /// Set every hideable column to `checked` and persist.
    pub async fn toggle_all(&mut self, checked: bool) {
        self.model = toggle_all(&self.columns, checked);
        self.persist().await;
    }

    /// Restore the columns' declared defaults and persist.
    pub async fn reset(&mut self) {
        self.model = compute_default(&self.columns);
        self.persist().await;
    }

    async fn persist(&self) {
        if let Err(err) = self
            .store
            .set(&self.table_id, &self.context, &self.model)
            .await
        {
            log::warn!(
                "failed to persist column visibility for {} ({}): {err}",
                self.table_id,
                self.context
            );
        }
    }
}
