//! Operations notification feed

use serde::{Deserialize, Serialize};

/// Notification severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Warning,
    Alert,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "Info"),
            NotificationLevel::Warning => write!(f, "Warning"),
            NotificationLevel::Alert => write!(f, "Alert"),
        }
    }
}
