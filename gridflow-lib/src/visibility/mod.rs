//! Column visibility engine.
//!
//! Derives a per-column visibility model from a column list and whatever
//! state was persisted (or supplied by a caller), with one hard rule: a
//! non-hideable column is visible, no matter what any stored or supplied
//! model says.

mod controller;

pub use controller::VisibilityController;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::TableColumn;

/// Per-column-key visibility map.
///
/// Only mutated through the engine's operations; every accepted change is
/// normalized with [`adjust`] first, so callers can never hide a pinned
/// column by writing the map directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityModel {
    entries: BTreeMap<String, bool>,
}

impl VisibilityModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored visibility for a key, if any.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// Returns `true` unless the key is explicitly hidden.
    pub fn is_visible(&self, key: &str) -> bool {
        self.get(key).unwrap_or(true)
    }

    /// Sets the visibility for a key.
    pub fn set(&mut self, key: impl Into<String>, visible: bool) {
        self.entries.insert(key.into(), visible);
    }

    /// Number of keys with an explicit entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the model has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, bool)> for VisibilityModel {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Compute the default model: every column visible unless it declares
/// `default_hidden`.
pub fn compute_default<C: TableColumn>(columns: &[C]) -> VisibilityModel {
    columns
        .iter()
        .map(|c| (c.key().to_string(), !c.default_hidden()))
        .collect()
}

/// Normalize a model against a column list.
///
/// Hideable columns take the model's value, falling back to
/// `!default_hidden` when the model has no entry (a freshly added column
/// picks up its declared default). Non-hideable columns are forced `true`.
/// Entries for keys not in the column list are dropped.
///
/// Applied both when reading persisted state and when accepting
/// caller-supplied updates.
pub fn adjust<C: TableColumn>(model: &VisibilityModel, columns: &[C]) -> VisibilityModel {
    columns
        .iter()
        .map(|c| {
            let visible = if c.hideable() {
                model.get(c.key()).unwrap_or(!c.default_hidden())
            } else {
                true
            };
            (c.key().to_string(), visible)
        })
        .collect()
}

/// Set every hideable column to `checked`; non-hideable columns stay
/// `true`. Backs the "Show All"/"Hide All" toggle.
pub fn toggle_all<C: TableColumn>(columns: &[C], checked: bool) -> VisibilityModel {
    columns
        .iter()
        .map(|c| {
            let visible = if c.hideable() { checked } else { true };
            (c.key().to_string(), visible)
        })
        .collect()
}

/// Filter columns down to the visible ones.
///
/// Preserves input order, or sorts by case-insensitive label when
/// `sort_alphabetically` is set.
pub fn visible_columns<'a, C: TableColumn>(
    columns: &'a [C],
    model: &VisibilityModel,
    sort_alphabetically: bool,
) -> Vec<&'a C> {
    let mut visible: Vec<&C> = columns
        .iter()
        .filter(|c| !c.hideable() || model.is_visible(c.key()))
        .collect();
    if sort_alphabetically {
        visible.sort_by(|a, b| {
            a.label()
                .to_lowercase()
                .cmp(&b.label().to_lowercase())
        });
    }
    visible
}

/// Bucket columns into the supplied display groups, in group order.
///
/// A column whose group is not present in `groups` is dropped from the
/// output entirely, as is a column with no group at all. Tables that use
/// grouping rely on this to scope the toggle panel to the groups they
/// declare.
pub fn grouped<'a, C: TableColumn>(
    columns: &'a [C],
    groups: &[&str],
) -> Vec<(String, Vec<&'a C>)> {
    groups
        .iter()
        .map(|&group| {
            let members: Vec<&C> = columns
                .iter()
                .filter(|c| c.group() == Some(group))
                .collect();
            (group.to_string(), members)
        })
        .collect()
}
