//! Mutex-serialized engine for concurrent callers
//!
//! The borrow/return/drain sequence is not safe to interleave: a return's
//! drain step reads and mutates the shared wait queue. `SharedLibrary` puts
//! the whole engine behind one async mutex so every operation, including a
//! full return-then-drain, runs as one critical section. Persistence flushes
//! happen inside that section, so there is at most one writer.
//!
//! # Architecture
//!
//! ```text
//! SharedLibrary (Clone)
//!     └── Arc<tokio::sync::Mutex<Library<P>>>
//!             ├── RecordStore + GenreIndex
//!             ├── WaitQueue
//!             └── P: CatalogPersistence
//! ```

use crate::core::library::Library;
use crate::core::traits::CatalogPersistence;
use crate::types::{BorrowOutcome, Command, LibraryError, Outcome, ReturnOutcome};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to a library shared across tasks
pub struct SharedLibrary<P: CatalogPersistence> {
    inner: Arc<Mutex<Library<P>>>,
}

impl<P: CatalogPersistence> Clone for SharedLibrary<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: CatalogPersistence> SharedLibrary<P> {
    /// Take ownership of a library
    pub fn new(library: Library<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(library)),
        }
    }

    /// Process a command under the lock
    pub async fn process(&self, command: Command) -> Result<Outcome, LibraryError> {
        self.inner.lock().await.process(command)
    }

    /// Borrow a book under the lock
    pub async fn borrow(&self, isbn: &str, username: &str) -> Result<BorrowOutcome, LibraryError> {
        self.inner.lock().await.borrow(isbn, username)
    }

    /// Return a book and drain the wait queue under one lock acquisition
    pub async fn return_book(
        &self,
        isbn: &str,
        username: &str,
    ) -> Result<ReturnOutcome, LibraryError> {
        self.inner.lock().await.return_book(isbn, username)
    }

    /// Run a read-only closure against a consistent view of the library
    pub async fn inspect<T>(&self, f: impl FnOnce(&Library<P>) -> T) -> T {
        let library = self.inner.lock().await;
        f(&library)
    }
}
