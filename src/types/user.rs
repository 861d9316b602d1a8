//! User-related types for the library catalog

use super::book::Isbn;
use serde::Serialize;

/// Username identifier
pub type Username = String;

/// Maximum number of books a user may hold at once
pub const BORROW_LIMIT: usize = 5;

/// A registered library user
///
/// Identity is the name. `borrowed_isbns` is kept in sync with the engine's
/// borrow records and never grows past [`BORROW_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique username
    pub name: Username,

    /// ISBNs currently held, in borrow order
    ///
    /// Not persisted; users load with nothing borrowed.
    #[serde(skip)]
    pub borrowed_isbns: Vec<Isbn>,
}

impl User {
    /// Create a new user holding no books
    pub fn new(name: impl Into<Username>) -> Self {
        User {
            name: name.into(),
            borrowed_isbns: Vec::new(),
        }
    }

    /// The borrow limit that applies to this user
    pub fn limit(&self) -> usize {
        BORROW_LIMIT
    }

    /// Whether the user has room for another book
    pub fn can_borrow(&self) -> bool {
        self.borrowed_isbns.len() < self.limit()
    }

    /// Whether the user currently holds the given book
    pub fn holds(&self, isbn: &str) -> bool {
        self.borrowed_isbns.iter().any(|held| held == isbn)
    }

    /// Remove an ISBN from the borrowed set
    ///
    /// Returns `true` if the ISBN was present.
    pub(crate) fn release(&mut self, isbn: &str) -> bool {
        match self.borrowed_isbns.iter().position(|held| held == isbn) {
            Some(index) => {
                self.borrowed_isbns.remove(index);
                true
            }
            None => false,
        }
    }
}
