//! Error types for the library catalog
//!
//! This module defines all error types that can occur while operating the catalog.
//! Errors are designed to be descriptive and user-friendly for console output.
//!
//! # Error Categories
//!
//! - **Command Errors**: Malformed session command lines (recoverable).
//! - **Catalog Errors**: Unknown book or user, borrow limit reached, mismatched returns,
//!   empty genre listings. These are recoverable: the operation is a no-op and the
//!   session continues.
//! - **Persistence Errors**: File not found, I/O failures, malformed record files.
//!   These are the only fatal class and are surfaced distinctly.

use std::path::Path;
use thiserror::Error;

/// Main error type for the library catalog
///
/// This enum represents all possible errors that can occur during catalog
/// operations. Each variant includes relevant context to help diagnose the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing record files
    ///
    /// This is a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Record file parsing error
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Malformed session command
    ///
    /// This is a recoverable error - the line is reported and skipped.
    #[error("Invalid command{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidCommand {
        /// Line number of the command (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// No book with the given ISBN is in the catalog
    #[error("Book not found: {isbn}")]
    BookNotFound {
        /// The unknown ISBN
        isbn: String,
    },

    /// No user with the given name is registered
    #[error("User not found: {username}")]
    UserNotFound {
        /// The unknown username
        username: String,
    },

    /// User already holds the maximum number of books
    ///
    /// The borrow is rejected before any state changes.
    #[error("{username} has reached the borrow limit of {limit} books")]
    LimitReached {
        /// The user at the cap
        username: String,
        /// The borrow limit in effect
        limit: usize,
    },

    /// Return attempted for a book the user does not currently hold
    ///
    /// Covers both "book not borrowed at all" and "borrowed by someone else".
    #[error("Book {isbn} was not borrowed by {username}")]
    NotBorrowedByUser {
        /// ISBN of the book being returned
        isbn: String,
        /// User attempting the return
        username: String,
    },

    /// Genre listing requested for a genre with no books
    #[error("No books found in genre: {genre}")]
    EmptyGenre {
        /// The requested genre
        genre: String,
    },
}

// Conversion from io::Error to LibraryError
impl From<std::io::Error> for LibraryError {
    fn from(error: std::io::Error) -> Self {
        LibraryError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LibraryError
impl From<csv::Error> for LibraryError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io_error) = error.kind() {
            return LibraryError::IoError {
                message: io_error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());
        LibraryError::parse_error(line, error.to_string())
    }
}

impl LibraryError {
    /// Whether this error belongs to the fatal persistence class
    ///
    /// Catalog errors are reported and the session continues; persistence
    /// errors stop the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LibraryError::FileNotFound { .. }
                | LibraryError::IoError { .. }
                | LibraryError::ParseError { .. }
        )
    }

    /// Whether this error is one of the "unknown identifier" kinds
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LibraryError::BookNotFound { .. } | LibraryError::UserNotFound { .. }
        )
    }

    /// Create a BookNotFound error
    pub fn book_not_found(isbn: &str) -> Self {
        LibraryError::BookNotFound {
            isbn: isbn.to_string(),
        }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(username: &str) -> Self {
        LibraryError::UserNotFound {
            username: username.to_string(),
        }
    }

    /// Create a LimitReached error
    pub fn limit_reached(username: &str, limit: usize) -> Self {
        LibraryError::LimitReached {
            username: username.to_string(),
            limit,
        }
    }

    /// Create a NotBorrowedByUser error
    pub fn not_borrowed_by_user(isbn: &str, username: &str) -> Self {
        LibraryError::NotBorrowedByUser {
            isbn: isbn.to_string(),
            username: username.to_string(),
        }
    }

    /// Create an EmptyGenre error
    pub fn empty_genre(genre: &str) -> Self {
        LibraryError::EmptyGenre {
            genre: genre.to_string(),
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(line: Option<u64>, message: impl Into<String>) -> Self {
        LibraryError::InvalidCommand {
            line,
            message: message.into(),
        }
    }

    /// Map a failure to open `path` for reading
    ///
    /// A missing file becomes `FileNotFound`; anything else is an `IoError`.
    pub fn open_failed(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => LibraryError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => error.into(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LibraryError::ParseError {
            line,
            message: message.into(),
        }
    }
}
