//! User-facing notifications produced by the sync controller

use chrono::{DateTime, Utc};

use crate::domain::PromptMode;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Successful mode change.
    ///
    /// The description follows what the user asked for (`requested`), not what
    /// the service reports back; the title is the service's own message.
    pub fn mode_switched(message: &str, requested: bool) -> Self {
        let description = match PromptMode::from_flag(requested) {
            PromptMode::Engineering => "Switched to Engineering Standards mode",
            PromptMode::General => "Switched to General Knowledge Graph mode",
        };
        let title = if message.trim().is_empty() {
            "Prompt mode updated"
        } else {
            message
        };

        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Failed mode change
    pub fn mode_switch_failed() -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Failed to update prompt mode".to_string(),
            description: "Please try again or restart the server".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// How long ago the notification was raised, relative to `now`
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let secs = (now - self.created_at).num_seconds().max(0);
        match secs {
            0..=4 => "just now".to_string(),
            5..=59 => format!("{}s ago", secs),
            _ => format!("{}m ago", secs / 60),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.description)
    }
}
