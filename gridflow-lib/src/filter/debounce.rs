//! Keyed debounce timers.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Per-key debounce timers with explicit schedule/cancel semantics.
///
/// At most one timer is pending per key: scheduling a key aborts its
/// previous timer first, so a burst of keystrokes flushes once with the
/// final value. All timers are aborted on drop.
#[derive(Debug, Default)]
pub struct Debouncer {
    timers: HashMap<String, JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with no pending timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` after `delay`, replacing any pending timer for `key`.
    pub fn schedule(&mut self, key: &str, delay: Duration, f: impl FnOnce() + Send + 'static) {
        self.cancel(key);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        self.timers.insert(key.to_string(), handle);
    }

    /// Abort the pending timer for `key`, if any.
    pub fn cancel(&mut self, key: &str) {
        if let Some(handle) = self.timers.remove(key) {
            handle.abort();
        }
    }

    /// Whether a timer is pending for `key`.
    pub fn is_pending(&self, key: &str) -> bool {
        self.timers
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        for handle in self.timers.values() {
            handle.abort();
        }
    }
}
