//! # Record Store
//!
//! Holds the book collection in memory and mirrors it to a backing file on
//! every mutation.

pub mod backend;
pub mod book;
pub mod errors;
pub mod id;
#[allow(clippy::module_inception)]
pub mod store;

pub use backend::{JsonFileBackend, StorageBackend};
pub use book::{Book, BookPatch, BooksDocument, NewBook};
pub use errors::{StoreError, StoreResult};
pub use id::{generate_id, ID_LENGTH};
pub use store::BookStore;
