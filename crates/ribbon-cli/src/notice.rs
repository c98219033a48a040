//! User-facing notices
//!
//! Turns store outcomes into the short messages shown after an action, both
//! in the TUI status bar and on the command line.

use ribbon_core::{StoreError, ValidationError};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn added() -> Self {
        Self::success("Bookmark added successfully!")
    }

    pub fn deleted() -> Self {
        Self::success("Bookmark deleted successfully!")
    }
}

impl From<&StoreError> for Notice {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::Validation(ValidationError::EmptyField { .. }) => {
                Notice::error("Please fill in both title and URL fields")
            }
            StoreError::Validation(ValidationError::InvalidUrl { .. }) => {
                Notice::error("Please enter a valid URL")
            }
            StoreError::Index(_) => Notice::error("That bookmark no longer exists"),
            StoreError::Storage(e) => match e.recovery_suggestion() {
                Some(hint) => Notice::error(format!("Could not save bookmarks: {} {}", e, hint)),
                None => Notice::error(format!("Could not save bookmarks: {}", e)),
            },
        }
    }
}
