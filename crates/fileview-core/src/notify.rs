//! User-facing notification boundary.

use serde::Serialize;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A toast to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Generic failure toast; details stay in the logs.
    #[must_use]
    pub fn fetch_failed() -> Self {
        Self {
            title: String::new(),
            message: "Error".to_string(),
            severity: Severity::Error,
        }
    }
}

/// Presents notifications to the user.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNotifier {
    notifications: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
