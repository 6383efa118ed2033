//! # Book Records
//!
//! The single entity held by the store. `title` and `author` are typed; any
//! other field a client sends is kept verbatim in `extra` and written back
//! flat alongside them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the store assigns identifiers
pub const ID_FIELD: &str = "id";

/// A stored book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, immutable once set
    pub id: String,
    pub title: String,
    pub author: String,
    /// Unvalidated client fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Turn the payload into a record under `id`.
    ///
    /// A client-supplied `id` key is dropped.
    pub(crate) fn into_book(mut self, id: String) -> Book {
        self.extra.remove(ID_FIELD);
        Book {
            id,
            title: self.title,
            author: self.author,
            extra: self.extra,
        }
    }
}

/// Partial update payload
///
/// Present keys overwrite stored keys; absent keys are left alone. A `null`
/// title or author counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.extra.is_empty()
    }
}

impl Book {
    /// Shallow-merge `patch` over this record. The id never changes.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        for (key, value) in patch.extra {
            if key == ID_FIELD {
                continue;
            }
            self.extra.insert(key, value);
        }
    }
}

/// On-disk layout of the backing file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BooksDocument {
    #[serde(default)]
    pub books: Vec<Book>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        NewBook::new("Dune", "Herbert").into_book("abcd1234".to_string())
    }

    #[test]
    fn test_book_serializes_flat() {
        let book = NewBook::new("Dune", "Herbert")
            .with_field("year", json!(1965))
            .into_book("abcd1234".to_string());

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({"id": "abcd1234", "title": "Dune", "author": "Herbert", "year": 1965})
        );
    }

    #[test]
    fn test_new_book_drops_client_id() {
        let new: NewBook =
            serde_json::from_value(json!({"id": "mine", "title": "Dune", "author": "Herbert"}))
                .unwrap();
        let book = new.into_book("assigned".to_string());

        assert_eq!(book.id, "assigned");
        assert!(!book.extra.contains_key(ID_FIELD));
    }

    #[test]
    fn test_new_book_requires_title_and_author() {
        assert!(serde_json::from_value::<NewBook>(json!({"title": "Dune"})).is_err());
        assert!(serde_json::from_value::<NewBook>(json!({"author": "Herbert"})).is_err());
        assert!(serde_json::from_value::<NewBook>(json!({"title": 1, "author": "x"})).is_err());
    }

    #[test]
    fn test_apply_merges_shallowly() {
        let mut book = sample();
        book.extra.insert("tags".to_string(), json!(["sf", "classic"]));

        book.apply(BookPatch::default().author("Frank Herbert").field("tags", json!(["sf"])));

        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.extra["tags"], json!(["sf"]));
    }

    #[test]
    fn test_apply_ignores_id() {
        let mut book = sample();
        book.apply(BookPatch::default().field("id", json!("hijacked")));

        assert_eq!(book.id, "abcd1234");
        assert!(!book.extra.contains_key("id"));
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: BookPatch = serde_json::from_value(json!({"author": "Frank Herbert"})).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.author.as_deref(), Some("Frank Herbert"));
        assert!(patch.extra.is_empty());
        assert!(!patch.is_empty());
        assert!(BookPatch::default().is_empty());
    }

    #[test]
    fn test_document_defaults_to_empty() {
        let doc: BooksDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.books.is_empty());
    }
}
