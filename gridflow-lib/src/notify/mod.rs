//! User-facing notices.
//!
//! The engine never fails a page: every failure path degrades to a safe
//! state and emits at most one notice on an unbounded channel that the
//! host UI drains and renders however it likes.

use tokio::sync::mpsc;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A notice for the user.
///
/// # Example
///
/// ```
/// use gridflow_lib::notify::Notice;
///
/// let notice = Notice::error("Connection failed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Create an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Create a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Create a warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Create an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&str> for Notice {
    fn from(message: &str) -> Self {
        Notice::info(message)
    }
}

impl From<String> for Notice {
    fn from(message: String) -> Self {
        Notice::info(message)
    }
}

/// Sending half of a notice channel.
///
/// Cheap to clone; sending never blocks and never fails visibly. A closed
/// receiver (host shut down) just drops the notice.
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

impl NoticeSender {
    /// Send a notice, ignoring a closed receiver.
    pub fn send(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }

    /// Send an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.send(Notice::error(message));
    }
}

/// Receiving half of a notice channel.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Create a connected notice channel.
pub fn notice_channel() -> (NoticeSender, NoticeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}
