//! In-memory book store
//!
//! `BookStore` is an ordered collection owned by the caller and passed by
//! reference into the query pipeline; there is no hidden module-level
//! state. The store stamps ids and timestamps on creation, merges partial
//! updates, and never sorts or filters implicitly.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Book, BookPatch, NewBook};

/// Ordered, in-memory collection of book records
#[derive(Debug, Clone, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from an already-loaded record set, preserving order
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Add a new book, assigning its id and stamping both timestamps.
    ///
    /// Records keep insertion order.
    pub fn add(&mut self, new: NewBook) -> &Book {
        let now = Utc::now();
        self.books.push(Book {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            author: new.author,
            pages: new.pages,
            tag: new.tag,
            date_added: new.date_added,
            cover_image: new.cover_image,
            created_at: now,
            updated_at: now,
        });
        let idx = self.books.len() - 1;
        &self.books[idx]
    }

    /// Merge partial fields onto the record with the given id.
    ///
    /// `id` and `created_at` are preserved; `updated_at` is refreshed.
    /// Returns whether a record was found.
    pub fn update(&mut self, id: &str, patch: BookPatch) -> bool {
        match self.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.merge(patch);
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id, if present.
    ///
    /// Returns whether a record was removed; removal is permanent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        self.books.len() != before
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// The full record set in insertion order
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Consume the store, yielding the record set
    pub fn into_books(self) -> Vec<Book> {
        self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            pages: 412,
            tag: "SciFi".to_string(),
            date_added: "2024-01-01".to_string(),
            cover_image: None,
        }
    }

    #[test]
    fn test_add_stamps_id_and_timestamps() {
        let mut store = BookStore::new();
        let book = store.add(draft("Dune"));
        assert!(!book.id.is_empty());
        assert_eq!(book.created_at, book.updated_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut store = BookStore::new();
        let a = store.add(draft("Dune")).id.clone();
        let b = store.add(draft("Dune Messiah")).id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = BookStore::new();
        store.add(draft("First"));
        store.add(draft("Second"));
        store.add(draft("Third"));
        let titles: Vec<&str> = store.list().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_update_merges_and_refreshes_updated_at() {
        let mut store = BookStore::new();
        let id = store.add(draft("Dune")).id.clone();
        let created = store.get(&id).unwrap().created_at;
        let updated = store.get(&id).unwrap().updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        let found = store.update(
            &id,
            BookPatch {
                pages: Some(42),
                ..BookPatch::default()
            },
        );
        assert!(found);

        let book = store.get(&id).unwrap();
        assert_eq!(book.pages, 42);
        assert_eq!(book.id, id);
        assert_eq!(book.created_at, created);
        assert!(book.updated_at > updated);
        // Untouched fields survive the merge
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn test_update_unknown_id_reports_not_found() {
        let mut store = BookStore::new();
        store.add(draft("Dune"));
        assert!(!store.update("missing", BookPatch::default()));
    }

    #[test]
    fn test_remove() {
        let mut store = BookStore::new();
        let id = store.add(draft("Dune")).id.clone();
        assert!(store.remove(&id));
        assert!(store.is_empty());
        // Removing again is a no-op
        assert!(!store.remove(&id));
    }

    #[test]
    fn test_from_books_preserves_order() {
        let mut store = BookStore::new();
        store.add(draft("First"));
        store.add(draft("Second"));
        let books = store.into_books();
        let rebuilt = BookStore::from_books(books);
        let titles: Vec<&str> = rebuilt.list().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }
}
