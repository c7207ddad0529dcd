//! Bidirectional query-string sync for filter state.

use url::form_urlencoded;

use super::FilterForm;

/// Serialize the form's non-default values as a query string.
///
/// Fields holding their default are omitted entirely, so a pristine form
/// produces an empty string and clean URLs.
pub fn to_query_string(form: &FilterForm) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for field in form.fields() {
        let value = form.value(&field.name);
        if value != field.default {
            serializer.append_pair(&field.name, value);
        }
    }
    serializer.finish()
}

/// Restore form values from a query string.
///
/// Known parameters override in-form defaults; a value outside a field's
/// allowed set (e.g. a stale node type that no longer exists) is silently
/// ignored and the field keeps its default. Restored values are written
/// without dispatching, so a route re-entry never re-fires filter
/// callbacks with a different value.
///
/// Returns the `(name, value)` pairs actually applied; callers typically
/// force one table refresh when the list is non-empty.
pub fn apply_query_string(form: &mut FilterForm, query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut applied = Vec::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if !form.accepts(&name, &value) {
            log::debug!("ignoring query-string value for {name}: not an allowed value");
            continue;
        }
        form.restore_value(&name, &value);
        applied.push((name.into_owned(), value.into_owned()));
    }
    applied
}
