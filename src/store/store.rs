//! # Book Store
//!
//! The authoritative list of books. Reads are served from memory; every
//! mutation persists the full list through the backend before it becomes
//! visible.
//!
//! Mutations hold the write lock across the backend save, so writers are
//! serialized and the last write wins. A failed save leaves the in-memory list
//! untouched.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, info};

use super::backend::{JsonFileBackend, StorageBackend};
use super::book::{Book, BookPatch, NewBook};
use super::errors::{StoreError, StoreResult};
use super::id::generate_unique_id;

/// File-backed book collection
#[derive(Debug)]
pub struct BookStore {
    books: RwLock<Vec<Book>>,
    backend: Box<dyn StorageBackend>,
}

impl BookStore {
    /// Open a store over an arbitrary backend, loading its contents once
    pub fn open(backend: impl StorageBackend + 'static) -> StoreResult<Self> {
        let books = backend.load()?;
        info!(
            location = %backend.describe(),
            count = books.len(),
            "Book store loaded"
        );
        Ok(Self {
            books: RwLock::new(books),
            backend: Box::new(backend),
        })
    }

    /// Open the JSON file at `path`, writing `{"books": []}` if it is missing
    pub fn open_file(path: impl Into<std::path::PathBuf>) -> StoreResult<Self> {
        let backend = JsonFileBackend::new(path);
        if backend.ensure_initialized()? {
            info!(path = %backend.path().display(), "Initialized empty backing file");
        }
        Self::open(backend)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Persist `candidate` and, on success, make it the current list
    fn commit(&self, current: &mut Vec<Book>, candidate: Vec<Book>) -> StoreResult<()> {
        if let Err(e) = self.backend.save(&candidate) {
            error!(error = %e, location = %self.backend.describe(), "Failed to persist books");
            return Err(e);
        }
        *current = candidate;
        Ok(())
    }

    /// All books in insertion order
    pub fn list(&self) -> StoreResult<Vec<Book>> {
        Ok(self.read()?.clone())
    }

    /// First book whose id matches
    pub fn get(&self, id: &str) -> StoreResult<Option<Book>> {
        Ok(self.read()?.iter().find(|b| b.id == id).cloned())
    }

    /// Number of stored books
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Assign a fresh id to `new`, append it and persist
    pub fn create(&self, new: NewBook) -> StoreResult<Book> {
        let mut books = self.write()?;

        let id = generate_unique_id(|candidate| books.iter().any(|b| b.id == candidate));
        let book = new.into_book(id);

        let mut candidate = books.clone();
        candidate.push(book.clone());
        self.commit(&mut books, candidate)?;

        debug!(id = %book.id, "Book created");
        Ok(book)
    }

    /// Merge `patch` into the book with `id` and persist.
    ///
    /// Returns `None` without touching the backend when no book matches.
    pub fn update(&self, id: &str, patch: BookPatch) -> StoreResult<Option<Book>> {
        let mut books = self.write()?;

        let Some(index) = books.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        let mut candidate = books.clone();
        candidate[index].apply(patch);
        let updated = candidate[index].clone();
        self.commit(&mut books, candidate)?;

        debug!(id = %id, "Book updated");
        Ok(Some(updated))
    }

    /// Remove the first book with `id` and persist.
    ///
    /// Returns the removed book, or `None` when nothing matched.
    pub fn delete(&self, id: &str) -> StoreResult<Option<Book>> {
        let mut books = self.write()?;

        let Some(index) = books.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        let mut candidate = books.clone();
        let removed = candidate.remove(index);
        self.commit(&mut books, candidate)?;

        debug!(id = %id, "Book deleted");
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// In-memory backend whose saves can be made to fail
    #[derive(Debug, Default)]
    struct FlakyBackend {
        fail: Arc<AtomicBool>,
    }

    impl StorageBackend for FlakyBackend {
        fn load(&self) -> StoreResult<Vec<Book>> {
            Ok(Vec::new())
        }

        fn save(&self, _books: &[Book]) -> StoreResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(StoreError::Io {
                    path: "flaky".to_string(),
                    message: "disk full".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    fn flaky_store() -> (BookStore, Arc<AtomicBool>) {
        let backend = FlakyBackend::default();
        let fail = backend.fail.clone();
        (BookStore::open(backend).unwrap(), fail)
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let (store, _) = flaky_store();
        let a = store.create(NewBook::new("A", "x")).unwrap();
        let b = store.create(NewBook::new("B", "y")).unwrap();

        assert_eq!(a.id.len(), 8);
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let (store, _) = flaky_store();
        let result = store.update("missing", BookPatch::default().title("x")).unwrap();
        assert!(result.is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_delete_unknown_id_returns_none() {
        let (store, _) = flaky_store();
        store.create(NewBook::new("A", "x")).unwrap();
        assert!(store.delete("missing").unwrap().is_none());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_failed_create_leaves_memory_unchanged() {
        let (store, fail) = flaky_store();
        store.create(NewBook::new("A", "x")).unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(store.create(NewBook::new("B", "y")).is_err());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_failed_update_leaves_memory_unchanged() {
        let (store, fail) = flaky_store();
        let book = store.create(NewBook::new("Dune", "Herbert")).unwrap();

        fail.store(true, Ordering::SeqCst);
        let err = store
            .update(&book.id, BookPatch::default().author("Frank Herbert"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.get(&book.id).unwrap().unwrap().author, "Herbert");
    }

    #[test]
    fn test_failed_delete_leaves_memory_unchanged() {
        let (store, fail) = flaky_store();
        let book = store.create(NewBook::new("Dune", "Herbert")).unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(store.delete(&book.id).is_err());
        assert_eq!(store.get(&book.id).unwrap(), Some(book));
    }

    #[test]
    fn test_extra_fields_survive_update() {
        let (store, _) = flaky_store();
        let book = store
            .create(NewBook::new("Dune", "Herbert").with_field("year", json!(1965)))
            .unwrap();

        let updated = store
            .update(&book.id, BookPatch::default().field("pages", json!(412)))
            .unwrap()
            .unwrap();

        assert_eq!(updated.extra["year"], json!(1965));
        assert_eq!(updated.extra["pages"], json!(412));
    }
}
