//! Book-related types for the library catalog
//!
//! This module defines the Book structure and the ISBN identifier used
//! to key it throughout the catalog.

use serde::Serialize;
use std::fmt;

/// Book identifier
///
/// ISBNs are treated as opaque strings; no checksum validation is performed.
pub type Isbn = String;

/// A catalog entry
///
/// Identity is the ISBN. Only the borrowing engine flips `is_borrowed`;
/// the descriptive fields never change after the book is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Unique identifier
    pub isbn: Isbn,

    /// Genre used by the genre index
    pub genre: String,

    /// Whether a borrow record currently exists for this book
    ///
    /// Not persisted; every book loads as available.
    #[serde(skip)]
    pub is_borrowed: bool,
}

impl Book {
    /// Create a new available book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<Isbn>,
        genre: impl Into<String>,
    ) -> Self {
        Book {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            genre: genre.into(),
            is_borrowed: false,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Genre: {}",
            self.title, self.author, self.isbn, self.genre
        )
    }
}
