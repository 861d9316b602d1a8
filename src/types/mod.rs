//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `book`: Book records and ISBNs
//! - `user`: Users and the borrow limit
//! - `command`: Session commands and engine outcomes
//! - `config`: Session configuration and queue policy
//! - `error`: Error types for the catalog

pub mod book;
pub mod command;
pub mod config;
pub mod error;
pub mod user;

pub use book::{Book, Isbn};
pub use command::{BorrowOutcome, Command, Handoff, Outcome, ReturnOutcome};
pub use config::{LibraryConfig, QueuePolicy, DEFAULT_BOOKS_FILE, DEFAULT_USERS_FILE};
pub use error::LibraryError;
pub use user::{User, Username, BORROW_LIMIT};
