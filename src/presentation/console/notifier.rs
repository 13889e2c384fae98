//! User notifications raised by the console controllers.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Cancelled,
    Info,
}

impl NoticeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Success => "[SUCCESS]",
            Self::Error => "[ERROR]",
            Self::Cancelled => "[CANCELLED]",
            Self::Info => "[INFO]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.tag(), self.message)
    }
}

/// Sink for the outcome of a user action.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, message: &str) {
        self.notify(Notice {
            kind: NoticeKind::Success,
            message: message.to_owned(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notice {
            kind: NoticeKind::Error,
            message: message.to_owned(),
        });
    }

    fn cancelled(&self, message: &str) {
        self.notify(Notice {
            kind: NoticeKind::Cancelled,
            message: message.to_owned(),
        });
    }

    fn info(&self, message: &str) {
        self.notify(Notice {
            kind: NoticeKind::Info,
            message: message.to_owned(),
        });
    }
}

/// Prints every notice on its own line of stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(kind = notice.kind.tag(), message = %notice.message, "Notice");
        println!("{}", notice);
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    pub fn messages(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order_and_kind() {
        let notifier = RecordingNotifier::new();
        notifier.info("Editing news 1");
        notifier.error("Title cannot be empty");
        notifier.success("News updated successfully");

        assert_eq!(notifier.notices().len(), 3);
        assert_eq!(notifier.messages(NoticeKind::Error), vec!["Title cannot be empty"]);
        assert_eq!(
            notifier.last().map(|n| n.to_string()).as_deref(),
            Some("[SUCCESS] News updated successfully")
        );
    }
}
