//! In-memory persistence adapter
//!
//! Keeps the last saved collections in memory and counts flushes. Useful
//! wherever the engine should run without touching disk.

use crate::core::CatalogPersistence;
use crate::types::{Book, LibraryError, User};

/// Persistence collaborator that never leaves memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    books: Vec<Book>,
    users: Vec<User>,
    book_saves: usize,
    user_saves: usize,
    fail_saves: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that loads the given records
    pub fn with_records(books: Vec<Book>, users: Vec<User>) -> Self {
        MemoryStore {
            books,
            users,
            ..Self::default()
        }
    }

    /// Create a store whose saves always fail with an I/O error
    pub fn failing() -> Self {
        MemoryStore {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Books as of the last save (or the initial records)
    pub fn saved_books(&self) -> &[Book] {
        &self.books
    }

    /// Users as of the last save (or the initial records)
    pub fn saved_users(&self) -> &[User] {
        &self.users
    }

    /// Number of book flushes so far
    pub fn book_saves(&self) -> usize {
        self.book_saves
    }

    /// Number of user flushes so far
    pub fn user_saves(&self) -> usize {
        self.user_saves
    }

    fn check_writable(&self) -> Result<(), LibraryError> {
        if self.fail_saves {
            return Err(LibraryError::IoError {
                message: "memory store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl CatalogPersistence for MemoryStore {
    fn load_books(&mut self) -> Result<Vec<Book>, LibraryError> {
        Ok(self.books.clone())
    }

    fn load_users(&mut self) -> Result<Vec<User>, LibraryError> {
        Ok(self.users.clone())
    }

    fn save_books(&mut self, books: &[&Book]) -> Result<(), LibraryError> {
        self.check_writable()?;
        self.books = books.iter().map(|&book| book.clone()).collect();
        self.book_saves += 1;
        Ok(())
    }

    fn save_users(&mut self, users: &[&User]) -> Result<(), LibraryError> {
        self.check_writable()?;
        self.users = users.iter().map(|&user| user.clone()).collect();
        self.user_saves += 1;
        Ok(())
    }
}
