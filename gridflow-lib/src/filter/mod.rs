//! Filter dispatch layer.
//!
//! Normalizes form-driven filter state and dispatches changes to a
//! caller-supplied callback: most fields dispatch immediately, free-text
//! fields debounce behind a minimum length, and clearing a debounced field
//! dispatches at once so clearing never feels laggy.
//!
//! The dispatch callback is the filter-change hook: hosts wire it to clear
//! the selection and reset the table to page zero with a forced fetch.
//! Filter values also sync bidirectionally with the URL query string via
//! [`to_query_string`] and [`apply_query_string`].

mod debounce;
mod query_string;

pub use debounce::Debouncer;
pub use query_string::apply_query_string;
pub use query_string::to_query_string;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Product-default debounce delay for free-text fields.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Product-default minimum free-text length before dispatch.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// When a field change reaches the dispatch callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Dispatch synchronously on every change.
    Immediate,
    /// Buffer changes and flush after `delay`, but only once the value is
    /// at least `min_len` characters. Below the threshold nothing is
    /// dispatched at all; clearing to empty dispatches immediately.
    Debounced {
        /// Minimum character count before any dispatch happens.
        min_len: usize,
        /// Quiet period before the buffered value flushes.
        delay: Duration,
    },
}

impl DispatchPolicy {
    /// The debounced policy with product defaults (3 chars, 500 ms).
    pub fn debounced() -> Self {
        Self::Debounced {
            min_len: DEFAULT_MIN_LENGTH,
            delay: DEFAULT_DEBOUNCE_DELAY,
        }
    }
}

/// One named filter field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field (and query-string parameter) name.
    pub name: String,
    /// Default value; defaults are omitted from the query string.
    pub default: String,
    /// Allowed values, if the field is an enumeration. Query-string values
    /// outside this set are silently ignored.
    pub allowed: Option<Vec<String>>,
    /// Dispatch policy for this field.
    pub policy: DispatchPolicy,
}

impl FieldSpec {
    /// An immediately dispatched field.
    pub fn immediate(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            allowed: None,
            policy: DispatchPolicy::Immediate,
        }
    }

    /// A debounced free-text field with product-default gating.
    pub fn debounced(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            allowed: None,
            policy: DispatchPolicy::debounced(),
        }
    }

    /// Restrict the field to a set of allowed values.
    pub fn allow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Override the dispatch policy.
    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn accepts(&self, value: &str) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.iter().any(|v| v == value),
            None => true,
        }
    }
}

/// Dispatch callback invoked with `(field_name, value)` on every accepted
/// change.
pub type OnChange = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Form-driven filter state with per-field dispatch policies.
pub struct FilterForm {
    fields: Vec<FieldSpec>,
    values: HashMap<String, String>,
    debouncer: Debouncer,
    on_change: OnChange,
}

impl FilterForm {
    /// Create a form over the given fields.
    pub fn new(fields: Vec<FieldSpec>, on_change: OnChange) -> Self {
        Self {
            fields,
            values: HashMap::new(),
            debouncer: Debouncer::new(),
            on_change,
        }
    }

    /// The field specs, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The current value of a field (its default when untouched).
    pub fn value(&self, name: &str) -> &str {
        if let Some(value) = self.values.get(name) {
            return value;
        }
        self.field(name).map(|f| f.default.as_str()).unwrap_or("")
    }

    /// Whether a field currently holds its default.
    pub fn is_default(&self, name: &str) -> bool {
        match self.field(name) {
            Some(field) => self.value(name) == field.default,
            None => true,
        }
    }

    /// Record a field change and dispatch it per the field's policy.
    ///
    /// Unknown field names are ignored.
    pub fn set_value(&mut self, name: &str, value: &str) {
        let Some(field) = self.field(name).cloned() else {
            log::debug!("ignoring change for unknown filter field {name}");
            return;
        };
        self.values.insert(field.name.clone(), value.to_string());

        match field.policy {
            DispatchPolicy::Immediate => (self.on_change)(&field.name, value),
            DispatchPolicy::Debounced { min_len, delay } => {
                if value.is_empty() {
                    // Clearing must never be perceived as laggy.
                    self.debouncer.cancel(&field.name);
                    (self.on_change)(&field.name, value);
                } else if value.chars().count() < min_len {
                    self.debouncer.cancel(&field.name);
                } else {
                    let on_change = Arc::clone(&self.on_change);
                    let name = field.name.clone();
                    let value = value.to_string();
                    self.debouncer
                        .schedule(&field.name, delay, move || on_change(&name, &value));
                }
            }
        }
    }

    /// Set a value without dispatching.
    ///
    /// Used when restoring state from the query string, so a restore never
    /// re-dispatches a different value.
    pub(crate) fn restore_value(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub(crate) fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn accepts(&self, name: &str, value: &str) -> bool {
        self.field(name).is_some_and(|f| f.accepts(value))
    }
}
