//! User-visible status line.

use std::fmt;

use tokio::sync::watch;

use crate::relay::Category;

/// What the status area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Analyzing,
    Moved { folder: String },
    Failed { message: String },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analyzing => f.write_str("Analyzing email..."),
            Self::Moved { folder } => write!(f, "Email moved to {folder}"),
            Self::Failed { message } => write!(f, "Error: {message}"),
        }
    }
}

/// Receives status updates as the workflow progresses.
pub trait StatusSink: Send + Sync {
    fn set_status(&self, status: &Status);
}

impl StatusSink for watch::Sender<Option<Status>> {
    fn set_status(&self, status: &Status) {
        self.send_replace(Some(status.clone()));
    }
}

/// Category names shown once when the pane loads.
pub fn folder_list() -> Vec<&'static str> {
    Category::ALL.iter().map(Category::as_str).collect()
}
