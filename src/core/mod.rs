//! Core business logic module
//!
//! This module contains the catalog components:
//! - `traits` - Persistence seam between the engine and storage
//! - `record_store` - Ownership of books and users
//! - `genre_index` - Books grouped by genre
//! - `wait_queue` - FIFO of users waiting on borrowed books
//! - `library` - The borrowing engine
//! - `shared` - Mutex-serialized engine handle for concurrent callers

pub mod genre_index;
pub mod library;
pub mod record_store;
pub mod shared;
pub mod traits;
pub mod wait_queue;

pub use genre_index::GenreIndex;
pub use library::Library;
pub use record_store::RecordStore;
pub use shared::SharedLibrary;
pub use traits::CatalogPersistence;
pub use wait_queue::WaitQueue;
