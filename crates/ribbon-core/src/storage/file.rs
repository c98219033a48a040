//! File-backed slot storage
//!
//! Each slot is a plain text file named after the slot inside the data
//! directory. Uses atomic writes (write to temp file, then rename) to prevent
//! corruption.
//!
//! Storage location: `~/.local/share/ribbon/` (configurable via `Config`)
//!
//! Files:
//! - `bookmarks` - JSON array of bookmarks
//! - `theme` - `light` or `dark`
//! - `bookmarks.corrupt` - last unreadable bookmarks value, if any

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{SlotOp, StorageError, StorageResult};
use super::{SlotStorage, BOOKMARKS_BACKUP_SLOT, BOOKMARKS_SLOT, THEME_SLOT};

/// Slot storage rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage handle; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !is_valid_slot_name(key) {
            return Err(StorageError::InvalidSlot {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(key))
    }

    /// Collect on-disk sizes for the known slots
    pub fn stats(&self) -> StorageStats {
        let size_of = |key: &str| {
            self.slot_path(key)
                .ok()
                .and_then(|path| fs::metadata(path).ok())
                .map(|meta| meta.len())
        };

        let bookmarks = size_of(BOOKMARKS_SLOT);
        let theme = size_of(THEME_SLOT);
        let backup = size_of(BOOKMARKS_BACKUP_SLOT);

        StorageStats {
            bookmarks_exists: bookmarks.is_some(),
            theme_exists: theme.is_some(),
            backup_exists: backup.is_some(),
            bookmarks_size: bookmarks.unwrap_or(0),
            theme_size: theme.unwrap_or(0),
            backup_size: backup.unwrap_or(0),
        }
    }
}

impl SlotStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::slot(SlotOp::Read, key, path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        atomic_write(key, &path, value.as_bytes())?;
        debug!(slot = key, bytes = value.len(), "wrote slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::slot(SlotOp::Remove, key, path, e)),
        }
    }

    /// Byte-for-byte copy, so contents that are not valid UTF-8 survive
    fn backup(&mut self, key: &str, to: &str) -> StorageResult<()> {
        let source = self.slot_path(key)?;
        let target = self.slot_path(to)?;
        let data = match fs::read(&source) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::slot(SlotOp::Read, key, source, e)),
        };
        atomic_write(to, &target, &data)?;
        debug!(slot = key, backup = to, bytes = data.len(), "backed up slot");
        Ok(())
    }
}

/// Storage statistics for the data directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub bookmarks_exists: bool,
    pub theme_exists: bool,
    pub backup_exists: bool,
    pub bookmarks_size: u64,
    pub theme_size: u64,
    pub backup_size: u64,
}

impl StorageStats {
    /// Total bytes across all slots
    pub fn total_size(&self) -> u64 {
        self.bookmarks_size + self.theme_size + self.backup_size
    }

    /// Total size formatted for humans (B, KB, MB)
    pub fn total_size_human(&self) -> String {
        format_size(self.total_size())
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Slot names become file names, so keep them to a safe alphabet
fn is_valid_slot_name(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The target file is never left in a partially-written state.
fn atomic_write(key: &str, path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // `with_extension` would collide for dotted slot names
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!("{}.tmp", file_name));

    let result = write_temp(&temp_path, data)
        .map_err(|e| StorageError::slot(SlotOp::Write, key, temp_path.clone(), e))
        .and_then(|()| {
            fs::rename(&temp_path, path).map_err(|source| StorageError::Replace {
                path: path.to_path_buf(),
                source,
            })
        });

    if result.is_err() {
        // The temp file may or may not exist at this point
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(data)?;
    file.sync_all()
}
