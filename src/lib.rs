//! Library Catalog
//!
//! # Overview
//!
//! A small library catalog: books indexed by ISBN and genre, registered
//! users with a borrow limit, and a FIFO wait queue that hands a returned
//! book to the next waiting user. Books and users persist to pipe-delimited
//! flat files and are written back after every mutation.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Book, User, Command, Outcome, errors)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::library`] - Borrow/return state machine and wait queue drain
//!   - [`core::record_store`] - Books and users keyed by ISBN and name
//!   - [`core::genre_index`] - Genre to ISBN list index
//!   - [`core::wait_queue`] - Global or per-book FIFO of waiting users
//!   - [`core::shared`] - Mutex-serialized engine for concurrent callers
//! - [`io`] - Record files, command readers and report output
//! - [`strategy`] - Sync and async session strategies
//!
//! # Borrowing
//!
//! A book is either available or borrowed by exactly one user. Borrowing a
//! taken book puts the user in the wait queue; returning it lends it to the
//! next user in line, provided they are still under the limit of
//! [`types::BORROW_LIMIT`] books.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Library, SharedLibrary};
pub use io::{FlatFileStore, MemoryStore};
pub use types::{Book, Command, LibraryError, Outcome, QueuePolicy, User};
