//! Notification sink used by the desk to tell the user what happened.

use std::sync::Mutex;

use tracing::{info, warn};

/// Fire-and-forget presentation of a message (a toast, a status line, a log).
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, is_error: bool);
}

/// A single message shown through a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// Writes notices to the log: informational at `info`, errors at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, message: &str, is_error: bool) {
        if is_error {
            warn!(notice = message, "Notify");
        } else {
            info!(notice = message, "Notify");
        }
    }
}

/// Keeps every notice in memory, in the order shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|n| n.is_error)
            .map(|n| n.message.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.notices.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, is_error: bool) {
        self.lock().push(Notice {
            message: message.to_string(),
            is_error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order_and_severity() {
        let notifier = RecordingNotifier::new();
        notifier.show("Products loaded.", false);
        notifier.show("Error: name must not be empty.", true);

        assert_eq!(
            notifier.messages(),
            vec!["Products loaded.", "Error: name must not be empty."]
        );
        assert_eq!(notifier.errors(), vec!["Error: name must not be empty."]);
        assert!(!notifier.notices()[0].is_error);
    }
}
