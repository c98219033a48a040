//! Storage errors
//!
//! Every failure on a slot records the operation, the slot name and the
//! backing path, plus a coarse `FailureKind` so callers can suggest a fix
//! without inspecting `io::Error` themselves.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Operation being performed on a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOp {
    Read,
    Write,
    Remove,
}

impl fmt::Display for SlotOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SlotOp::Read => "read",
            SlotOp::Write => "write",
            SlotOp::Remove => "remove",
        })
    }
}

/// Coarse cause of an I/O failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    DiskFull,
    Other,
}

impl FailureKind {
    /// Classify an I/O error
    pub fn of(error: &io::Error) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            return FailureKind::PermissionDenied;
        }
        let msg = error.to_string().to_lowercase();
        if ["no space left", "disk full", "quota exceeded", "not enough space"]
            .iter()
            .any(|needle| msg.contains(needle))
        {
            FailureKind::DiskFull
        } else {
            FailureKind::Other
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::PermissionDenied => "permission denied",
            FailureKind::DiskFull => "disk full",
            FailureKind::Other => "I/O error",
        })
    }
}

/// Errors from slot storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read, write or remove on one slot failed
    #[error("Could not {op} slot '{slot}' at '{path}' ({kind}): {source}")]
    Slot {
        op: SlotOp,
        slot: String,
        path: PathBuf,
        kind: FailureKind,
        #[source]
        source: io::Error,
    },

    /// Slot name cannot be mapped to a file
    #[error("Invalid slot name '{key}'")]
    InvalidSlot { key: String },

    /// The finished temp file could not be moved over the slot file
    #[error("Could not replace '{path}' with its new contents: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    /// A failed operation on `slot`, classified by its I/O error
    pub fn slot(op: SlotOp, slot: &str, path: PathBuf, source: io::Error) -> Self {
        StorageError::Slot {
            op,
            slot: slot.to_string(),
            path,
            kind: FailureKind::of(&source),
            source,
        }
    }

    /// Coarse cause of the failure
    pub fn kind(&self) -> FailureKind {
        match self {
            StorageError::Slot { kind, .. } => *kind,
            StorageError::CreateDirectory { source, .. }
            | StorageError::Replace { source, .. } => FailureKind::of(source),
            StorageError::InvalidSlot { .. } | StorageError::Serialize(_) => FailureKind::Other,
        }
    }

    /// A hint for the user, when there is an obvious fix
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match (self, self.kind()) {
            (_, FailureKind::DiskFull) => Some("Free up disk space and try again."),
            (_, FailureKind::PermissionDenied) => {
                Some("Check that you own the data directory and can write to it.")
            }
            (StorageError::CreateDirectory { .. }, FailureKind::Other) => {
                Some("Check that data_dir points somewhere writable (ribbon config show).")
            }
            _ => None,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
