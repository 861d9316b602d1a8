//! Session commands and the outcomes the engine reports for them
//!
//! A [`Command`] is one of the eight console actions. The engine turns each
//! command into an [`Outcome`], which the report writer renders.

use super::book::{Book, Isbn};
use super::error::LibraryError;
use super::user::Username;

/// A single catalog action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add (or replace) a book in the catalog
    AddBook(Book),

    /// Register (or re-register) a user
    AddUser(Username),

    /// List every book in the catalog
    ListBooks,

    /// List the books of one genre in insertion order
    ListGenre(String),

    /// Borrow a book, or join the wait queue if it is taken
    Borrow {
        /// Book to borrow
        isbn: Isbn,
        /// Borrowing user
        username: Username,
    },

    /// Return a borrowed book and drain the wait queue
    Return {
        /// Book being returned
        isbn: Isbn,
        /// Returning user
        username: Username,
    },

    /// List the ISBNs a user currently holds
    ListBorrowed(Username),

    /// Flush everything and end the session
    Exit,
}

/// Result of a successful borrow request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// The book was lent to the user
    Borrowed {
        /// The book as it stands after the transition
        book: Book,
    },

    /// The book is held by someone else; the user joined the wait queue
    Queued {
        /// 1-based position in the queue the user joined
        position: usize,
    },
}

/// What happened to the front of the wait queue after a return
#[derive(Debug, Clone, PartialEq)]
pub enum Handoff {
    /// The dequeued user received the returned book
    Lent {
        /// Dequeued user
        username: Username,
        /// The book they now hold
        book: Book,
    },

    /// The dequeued user could not take the book and was dropped
    Dropped {
        /// Dequeued user
        username: Username,
        /// Why the re-issued borrow failed
        reason: LibraryError,
    },
}

/// Result of a successful return request
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnOutcome {
    /// The returned book, captured right after it became available
    pub book: Book,

    /// Queue drain result, if the queue was non-empty
    pub handoff: Option<Handoff>,
}

/// Reportable result of processing a [`Command`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A book was added
    BookAdded(Book),

    /// A user was registered
    UserAdded(Username),

    /// Full catalog listing, sorted by ISBN
    Catalog(Vec<Book>),

    /// Genre listing in insertion order
    Genre {
        /// Requested genre
        genre: String,
        /// Books indexed under it
        books: Vec<Book>,
    },

    /// A borrow request was processed
    Borrow {
        /// Requesting user
        username: Username,
        /// What the engine did
        outcome: BorrowOutcome,
    },

    /// A return request was processed
    Return {
        /// Returning user
        username: Username,
        /// What the engine did
        outcome: ReturnOutcome,
    },

    /// A user's current holdings
    BorrowedBooks {
        /// The user
        username: Username,
        /// ISBNs in borrow order
        isbns: Vec<Isbn>,
    },

    /// The session is ending
    Exit,
}
