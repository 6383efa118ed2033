//! # Storage Backends
//!
//! A backend loads and saves the whole book list at once. There is no
//! incremental persistence: every save replaces the previous contents.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::book::{Book, BooksDocument};
use super::errors::{StoreError, StoreResult};

/// Whole-list persistence for the record store
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Load every stored book in store order.
    ///
    /// A backend with nothing stored yet returns an empty list.
    fn load(&self) -> StoreResult<Vec<Book>>;

    /// Replace the stored list with `books`
    fn save(&self, books: &[Book]) -> StoreResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// JSON file backend
///
/// The file holds `{"books": [...]}`. Saves write `<file>.tmp` and rename it
/// over the target, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json");
        self.path.with_extension(format!("{ext}.tmp"))
    }

    /// Write the empty document if the file is missing or blank.
    ///
    /// Returns true when the file was (re)initialized.
    pub fn ensure_initialized(&self) -> StoreResult<bool> {
        let blank = match fs::read(&self.path) {
            Ok(bytes) => bytes.iter().all(u8::is_ascii_whitespace),
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if blank {
            self.save(&[])?;
        }
        Ok(blank)
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Vec<Book>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let doc: BooksDocument =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::corrupt(&self.path, e))?;
        Ok(doc.books)
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        #[derive(serde::Serialize)]
        struct DocumentRef<'a> {
            books: &'a [Book],
        }

        let mut bytes = serde_json::to_vec_pretty(&DocumentRef { books })?;
        bytes.push(b'\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
