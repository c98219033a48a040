//! Error types for bookmark operations
//!
//! Every store-level failure is returned as a typed result. None of them is
//! fatal: the worst outcome of any failure is a no-op that the UI layer turns
//! into a message.

use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;

/// A required input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Url => write!(f, "url"),
        }
    }
}

/// Rejected user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty after trimming
    #[error("The {field} field must not be empty")]
    EmptyField { field: Field },

    /// The URL could not be parsed, even after scheme normalization
    #[error("'{url}' is not a valid URL: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A positional index that does not address an element of the collection
///
/// Positions are only valid for the sequence they were rendered from, so this
/// is what a stale delete looks like.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No bookmark at position {index} (collection has {len})")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Persisted bookmark state that could not be used
///
/// Never surfaced as a hard failure; the store recovers to an empty
/// collection and reports this through `LoadOutcome::Recovered`.
#[derive(Error, Debug)]
pub enum PersistenceReadError {
    /// The slot could not be read at all
    #[error("Saved bookmarks could not be read: {0}")]
    Unreadable(#[source] StorageError),

    /// The slot is not a JSON array of bookmarks
    #[error("Saved bookmarks are malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record parsed but breaks the collection invariants
    #[error("Saved bookmark at position {index} is invalid: {reason}")]
    InvalidRecord {
        index: usize,
        #[source]
        reason: ValidationError,
    },
}

/// Errors returned by `BookmarkStore` mutations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Index(#[from] IndexError),

    /// Persisting failed; the in-memory change was rolled back
    #[error("Failed to save bookmarks: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Validation failures are the user's to fix; everything else is the environment
    pub fn is_user_error(&self) -> bool {
        matches!(self, StoreError::Validation(_) | StoreError::Index(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SlotOp;

    #[test]
    fn test_empty_field_display() {
        let err = ValidationError::EmptyField {
            field: Field::Title,
        };
        assert_eq!(err.to_string(), "The title field must not be empty");
    }

    #[test]
    fn test_invalid_url_display() {
        let err = ValidationError::InvalidUrl {
            url: "https://".to_string(),
            source: url::ParseError::EmptyHost,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://"));
        assert!(msg.contains("not a valid URL"));
    }

    #[test]
    fn test_index_error_display() {
        let err = IndexError { index: 3, len: 1 };
        assert_eq!(
            err.to_string(),
            "No bookmark at position 3 (collection has 1)"
        );
    }

    #[test]
    fn test_store_error_classification() {
        let validation: StoreError = ValidationError::EmptyField { field: Field::Url }.into();
        assert!(validation.is_user_error());

        let index: StoreError = IndexError { index: 0, len: 0 }.into();
        assert!(index.is_user_error());

        let storage: StoreError = StorageError::slot(
            SlotOp::Read,
            "bookmarks",
            std::path::PathBuf::from("/data/bookmarks"),
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        )
        .into();
        assert!(!storage.is_user_error());
    }
}
