//! Record store module
//!
//! This module provides the `RecordStore` struct which owns every Book and User
//! in the catalog, keyed by ISBN and username respectively.
//!
//! The RecordStore is responsible for:
//! - Inserting books and users with upsert semantics
//! - Lookups by identifier
//! - Providing sorted listings for output and persistence

use crate::types::{Book, User};
use std::collections::HashMap;

/// Owns all catalog entities
///
/// Inserting an entity whose identifier already exists replaces the prior
/// entry and hands it back to the caller.
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Map of ISBN to book
    books: HashMap<String, Book>,

    /// Map of username to user
    users: HashMap<String, User>,
}

impl RecordStore {
    /// Create an empty RecordStore
    pub fn new() -> Self {
        RecordStore {
            books: HashMap::new(),
            users: HashMap::new(),
        }
    }

    /// Insert or replace a book
    ///
    /// # Returns
    ///
    /// The book previously stored under the same ISBN, if any
    pub fn insert_book(&mut self, book: Book) -> Option<Book> {
        self.books.insert(book.isbn.clone(), book)
    }

    /// Insert or replace a user
    ///
    /// # Returns
    ///
    /// The user previously stored under the same name, if any
    pub fn insert_user(&mut self, user: User) -> Option<User> {
        self.users.insert(user.name.clone(), user)
    }

    /// Look up a book by ISBN
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Look up a book by ISBN for mutation
    pub fn book_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.books.get_mut(isbn)
    }

    /// Look up a user by name
    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    /// Look up a user by name for mutation
    pub fn user_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.get_mut(name)
    }

    /// All books sorted by ISBN
    ///
    /// Sorting gives deterministic listings and record files.
    pub fn books(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by(|a, b| a.isbn.cmp(&b.isbn));
        books
    }

    /// All users sorted by name
    pub fn users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }

    /// Number of books in the catalog
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
