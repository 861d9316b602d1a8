//! Core traits for catalog persistence
//!
//! This module defines the seam between the borrowing engine and durable
//! storage, so the engine can be driven by flat files in production and by
//! an in-memory store in tests.

use crate::types::{Book, LibraryError, User};

/// Persistence collaborator for the catalog
///
/// Saves have full-collection overwrite semantics: every call replaces the
/// stored collection with exactly the records passed in.
pub trait CatalogPersistence {
    /// Load every stored book; all books load as available
    fn load_books(&mut self) -> Result<Vec<Book>, LibraryError>;

    /// Load every stored user; all users load with nothing borrowed
    fn load_users(&mut self) -> Result<Vec<User>, LibraryError>;

    /// Replace the stored book collection
    fn save_books(&mut self, books: &[&Book]) -> Result<(), LibraryError>;

    /// Replace the stored user collection
    fn save_users(&mut self, users: &[&User]) -> Result<(), LibraryError>;
}
