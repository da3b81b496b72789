//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe writes of small JSON documents: every save
//! goes to a temporary file that is fsynced and renamed over the target while
//! an exclusive lock file is held.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use thiserror::Error;

use assist_core::AssistError;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug, Error)]
pub enum AtomicJsonError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// File locking error.
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicJsonError> for AssistError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Io(e) => e.into(),
            AtomicJsonError::Json(e) => e.into(),
            AtomicJsonError::Lock(message) => AssistError::storage(message),
        }
    }
}

/// A handle to a JSON file that is replaced atomically on every save.
///
/// - **Atomicity**: tmp file + rename, readers never see a half-written file
/// - **Isolation**: an exclusive lock file serializes writers across processes
/// - **Durability**: explicit fsync before rename
#[derive(Debug, Clone)]
pub struct AtomicJsonFile {
    path: PathBuf,
}

impl AtomicJsonFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw file bytes.
    ///
    /// The content is not decoded here, so bytes that are not UTF-8 reach the
    /// caller's decoder instead of surfacing as an I/O error.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))`: File exists and is not blank
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read the file
    pub fn load_raw(&self) -> Result<Option<Vec<u8>>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read(&self.path)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Saves an already serialized document atomically.
    pub fn save_str(&self, content: &str) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Removes the file. Removing a missing file succeeds.
    pub fn remove(&self) -> Result<(), AtomicJsonError> {
        if !self.path.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let invalid = |what: &str| {
            AtomicJsonError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Path has no {}", what),
            ))
        };
        let parent = self.path.parent().ok_or_else(|| invalid("parent directory"))?;
        let file_name = self.path.file_name().ok_or_else(|| invalid("file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicJsonError::Lock(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; the lock file itself is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_raw() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::new(temp_dir.path().join("doc.json"));

        let json = serde_json::to_string_pretty(&Doc {
            name: "test".to_string(),
            count: 42,
        })
        .unwrap();
        file.save_str(&json).unwrap();

        let raw = file.load_raw().unwrap().unwrap();
        let doc: Doc = serde_json::from_slice(&raw).unwrap();
        assert_eq!(doc.count, 42);
    }

    #[test]
    fn test_load_raw_returns_undecoded_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::write(&path, [0x5b, 0xff, 0xfe, 0x5d]).unwrap();

        let raw = AtomicJsonFile::new(path).load_raw().unwrap().unwrap();
        assert_eq!(raw, vec![0x5b, 0xff, 0xfe, 0x5d]);
    }

    #[test]
    fn test_load_raw_of_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::new(temp_dir.path().to_path_buf());
        assert!(file.load_raw().is_err());
    }

    #[test]
    fn test_load_missing_and_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicJsonFile::new(path.clone());
        assert!(file.load_raw().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load_raw().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("doc.json");
        let file = AtomicJsonFile::new(path.clone());

        file.save_str("[]").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".doc.json.tmp").exists());
        assert!(!temp_dir.path().join("nested").join("doc.lock").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicJsonFile::new(path.clone());

        file.save_str("{}").unwrap();
        file.remove().unwrap();
        assert!(!path.exists());
        file.remove().unwrap();
    }
}
