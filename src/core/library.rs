//! Borrowing engine
//!
//! This module provides the `Library` that orchestrates catalog operations by
//! coordinating the RecordStore, GenreIndex, WaitQueue and the borrow records,
//! and notifying the persistence collaborator after every mutation.
//!
//! Each book is in one of two states:
//!
//! ```text
//!             borrow (user below limit)
//! Available ─────────────────────────────▶ Borrowed(holder)
//!     ▲                                          │
//!     └──────────── return by holder ────────────┘
//!                   then drain wait queue
//! ```
//!
//! A borrow against a Borrowed book queues the requester instead. A return
//! pops the front of the wait queue and re-issues the borrow for that user
//! against the returned book. A dequeued user at the limit is dropped and the
//! book stays Available.

use crate::core::genre_index::GenreIndex;
use crate::core::record_store::RecordStore;
use crate::core::traits::CatalogPersistence;
use crate::core::wait_queue::WaitQueue;
use crate::types::{
    Book, BorrowOutcome, Command, Handoff, Isbn, LibraryError, Outcome, QueuePolicy,
    ReturnOutcome, User, Username,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Library catalog and borrowing engine
///
/// Owns every entity and the wait queue. All state changes go through the
/// methods here so the borrow records, the `is_borrowed` flags and the users'
/// borrowed sets stay consistent.
pub struct Library<P: CatalogPersistence> {
    store: RecordStore,
    genres: GenreIndex,
    queue: WaitQueue,

    /// Borrow records: ISBN to current holder
    borrows: HashMap<Isbn, Username>,

    persistence: P,
}

impl<P: CatalogPersistence> Library<P> {
    /// Create an empty library backed by `persistence`
    ///
    /// Nothing is loaded; use [`Library::open`] to start from stored records.
    pub fn new(persistence: P, queue_policy: QueuePolicy) -> Self {
        Library {
            store: RecordStore::new(),
            genres: GenreIndex::new(),
            queue: WaitQueue::new(queue_policy),
            borrows: HashMap::new(),
            persistence,
        }
    }

    /// Create a library populated from the persistence collaborator
    ///
    /// Loading does not flush anything back.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error if either collection fails to load.
    pub fn open(mut persistence: P, queue_policy: QueuePolicy) -> Result<Self, LibraryError> {
        let books = persistence.load_books()?;
        let users = persistence.load_users()?;

        let mut library = Self::new(persistence, queue_policy);
        for book in books {
            library.insert_book(book);
        }
        for user in users {
            library.insert_user(user);
        }

        info!(
            books = library.store.book_count(),
            users = library.store.user_count(),
            genres = library.genres.genre_count(),
            policy = ?library.queue.policy(),
            "catalog loaded"
        );
        Ok(library)
    }

    /// Process a single session command
    ///
    /// Routes the command to the matching operation and wraps its result in
    /// an [`Outcome`] for reporting.
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged. Catalog errors leave the
    /// state untouched; persistence errors are fatal.
    pub fn process(&mut self, command: Command) -> Result<Outcome, LibraryError> {
        match command {
            Command::AddBook(book) => {
                self.add_book(book.clone())?;
                Ok(Outcome::BookAdded(book))
            }
            Command::AddUser(username) => {
                self.add_user(User::new(username.clone()))?;
                Ok(Outcome::UserAdded(username))
            }
            Command::ListBooks => Ok(Outcome::Catalog(
                self.books().into_iter().cloned().collect(),
            )),
            Command::ListGenre(genre) => {
                let books = self.by_genre(&genre)?.into_iter().cloned().collect();
                Ok(Outcome::Genre { genre, books })
            }
            Command::Borrow { isbn, username } => {
                let outcome = self.borrow(&isbn, &username)?;
                Ok(Outcome::Borrow { username, outcome })
            }
            Command::Return { isbn, username } => {
                let outcome = self.return_book(&isbn, &username)?;
                Ok(Outcome::Return { username, outcome })
            }
            Command::ListBorrowed(username) => {
                let isbns = self.borrowed_by(&username)?.to_vec();
                Ok(Outcome::BorrowedBooks { username, isbns })
            }
            Command::Exit => {
                self.flush()?;
                Ok(Outcome::Exit)
            }
        }
    }

    /// Add a book, replacing any book with the same ISBN, then flush books
    ///
    /// A replaced book keeps its borrow state and is moved out of its old
    /// genre listing.
    pub fn add_book(&mut self, book: Book) -> Result<(), LibraryError> {
        debug!(isbn = %book.isbn, genre = %book.genre, "adding book");
        self.insert_book(book);
        self.flush_books()
    }

    /// Register a user, replacing any user with the same name, then flush users
    ///
    /// The engine owns the borrowed set: a re-registered user keeps the books
    /// they already hold, and a new user starts empty.
    pub fn add_user(&mut self, user: User) -> Result<(), LibraryError> {
        debug!(username = %user.name, "adding user");
        self.insert_user(user);
        self.flush_users()
    }

    /// Look up a book by ISBN
    pub fn get_book(&self, isbn: &str) -> Option<&Book> {
        self.store.book(isbn)
    }

    /// Look up a user by name
    pub fn get_user(&self, name: &str) -> Option<&User> {
        self.store.user(name)
    }

    /// All books sorted by ISBN
    pub fn books(&self) -> Vec<&Book> {
        self.store.books()
    }

    /// All users sorted by name
    pub fn users(&self) -> Vec<&User> {
        self.store.users()
    }

    /// Books filed under `genre`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `EmptyGenre` if no book is filed under the genre.
    pub fn by_genre(&self, genre: &str) -> Result<Vec<&Book>, LibraryError> {
        let books: Vec<&Book> = self
            .genres
            .isbns(genre)
            .iter()
            .filter_map(|isbn| self.store.book(isbn))
            .collect();

        if books.is_empty() {
            return Err(LibraryError::empty_genre(genre));
        }
        Ok(books)
    }

    /// Whether a book exists and is not borrowed
    ///
    /// Unknown ISBNs report `false`; use [`Library::get_book`] to tell the
    /// two cases apart.
    pub fn is_available(&self, isbn: &str) -> bool {
        self.store.book(isbn).is_some_and(|book| !book.is_borrowed)
    }

    /// Current holder of a book, if it is borrowed
    pub fn holder(&self, isbn: &str) -> Option<&str> {
        self.borrows.get(isbn).map(String::as_str)
    }

    /// ISBNs a user currently holds, in borrow order
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for an unknown user.
    pub fn borrowed_by(&self, username: &str) -> Result<&[Isbn], LibraryError> {
        self.store
            .user(username)
            .map(|user| user.borrowed_isbns.as_slice())
            .ok_or_else(|| LibraryError::user_not_found(username))
    }

    /// The wait queue
    pub fn wait_queue(&self) -> &WaitQueue {
        &self.queue
    }

    /// The persistence collaborator
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Borrow a book
    ///
    /// If the book is already borrowed the user joins the wait queue and
    /// nothing else changes. Otherwise the book is lent and the book records
    /// are flushed.
    ///
    /// # Errors
    ///
    /// - `BookNotFound` / `UserNotFound` for unknown identifiers
    /// - `LimitReached` if the book is available but the user is at the limit
    /// - Persistence errors from the flush
    pub fn borrow(&mut self, isbn: &str, username: &str) -> Result<BorrowOutcome, LibraryError> {
        let book = self
            .store
            .book(isbn)
            .ok_or_else(|| LibraryError::book_not_found(isbn))?;
        let user = self
            .store
            .user(username)
            .ok_or_else(|| LibraryError::user_not_found(username))?;

        if book.is_borrowed {
            let position = self.queue.enqueue(isbn, username);
            info!(%isbn, %username, position, "book is borrowed; user queued");
            return Ok(BorrowOutcome::Queued { position });
        }

        if !user.can_borrow() {
            return Err(LibraryError::limit_reached(username, user.limit()));
        }

        let book = self.lend(isbn, username)?;
        self.flush_books()?;
        Ok(BorrowOutcome::Borrowed { book })
    }

    /// Return a borrowed book and offer it to the front of the wait queue
    ///
    /// # Errors
    ///
    /// - `NotBorrowedByUser` if there is no borrow record for the book or
    ///   the recorded holder is someone else; nothing changes
    /// - Persistence errors from the flushes
    pub fn return_book(
        &mut self,
        isbn: &str,
        username: &str,
    ) -> Result<ReturnOutcome, LibraryError> {
        if self.holder(isbn) != Some(username) {
            return Err(LibraryError::not_borrowed_by_user(isbn, username));
        }

        self.borrows.remove(isbn);
        let book = {
            let book = self
                .store
                .book_mut(isbn)
                .ok_or_else(|| LibraryError::book_not_found(isbn))?;
            book.is_borrowed = false;
            book.clone()
        };
        if let Some(user) = self.store.user_mut(username) {
            user.release(isbn);
        }
        info!(%isbn, %username, "book returned");

        let handoff = self.drain(isbn)?;

        self.flush_books()?;
        self.flush_users()?;
        Ok(ReturnOutcome { book, handoff })
    }

    /// Save both collections
    pub fn flush(&mut self) -> Result<(), LibraryError> {
        self.flush_books()?;
        self.flush_users()
    }

    /// Pop the next waiting user and re-issue their borrow for `isbn`
    fn drain(&mut self, isbn: &str) -> Result<Option<Handoff>, LibraryError> {
        let Some(next) = self.queue.pop_next(isbn) else {
            return Ok(None);
        };

        match self.borrow(isbn, &next) {
            Ok(BorrowOutcome::Borrowed { book }) => {
                info!(%isbn, username = %next, "queued user received returned book");
                Ok(Some(Handoff::Lent {
                    username: next,
                    book,
                }))
            }
            // The book was just freed, so the re-issued borrow cannot queue
            Ok(BorrowOutcome::Queued { position }) => {
                debug!(%isbn, username = %next, position, "queued user re-queued");
                Ok(None)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(reason) => {
                warn!(%isbn, username = %next, %reason, "queued user dropped");
                Ok(Some(Handoff::Dropped {
                    username: next,
                    reason,
                }))
            }
        }
    }

    /// Move a book to Borrowed(username) and record it on the user
    fn lend(&mut self, isbn: &str, username: &str) -> Result<Book, LibraryError> {
        let user = self
            .store
            .user_mut(username)
            .ok_or_else(|| LibraryError::user_not_found(username))?;
        user.borrowed_isbns.push(isbn.to_string());

        let book = self
            .store
            .book_mut(isbn)
            .ok_or_else(|| LibraryError::book_not_found(isbn))?;
        book.is_borrowed = true;
        let book = book.clone();

        self.borrows.insert(isbn.to_string(), username.to_string());
        info!(%isbn, %username, "book borrowed");
        Ok(book)
    }

    fn insert_book(&mut self, mut book: Book) {
        if let Some(previous) = self.store.book(&book.isbn) {
            self.genres.remove(&previous.genre, &book.isbn);
        }
        book.is_borrowed = self.borrows.contains_key(&book.isbn);
        self.genres.insert(&book.genre, &book.isbn);
        self.store.insert_book(book);
    }

    fn insert_user(&mut self, mut user: User) {
        user.borrowed_isbns = self
            .store
            .user(&user.name)
            .map(|existing| existing.borrowed_isbns.clone())
            .unwrap_or_default();
        self.store.insert_user(user);
    }

    fn flush_books(&mut self) -> Result<(), LibraryError> {
        let books = self.store.books();
        debug!(count = books.len(), "flushing books");
        self.persistence.save_books(&books)
    }

    fn flush_users(&mut self) -> Result<(), LibraryError> {
        let users = self.store.users();
        debug!(count = users.len(), "flushing users");
        self.persistence.save_users(&users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;
    use rstest::rstest;

    fn library(policy: QueuePolicy) -> Library<MemoryStore> {
        let mut library = Library::new(MemoryStore::new(), policy);
        for (title, isbn, genre) in [
            ("Dune", "001", "SciFi"),
            ("Emma", "002", "Classic"),
            ("Solaris", "003", "SciFi"),
            ("Ulysses", "004", "Classic"),
            ("Hyperion", "005", "SciFi"),
            ("Beloved", "006", "Drama"),
            ("Middlemarch", "007", "Classic"),
        ] {
            library
                .add_book(Book::new(title, "Author", isbn, genre))
                .unwrap();
        }
        for name in ["alice", "bob", "carol", "dave"] {
            library.add_user(User::new(name)).unwrap();
        }
        library
    }

    /// Check every cross-structure invariant of the engine
    fn assert_consistent(library: &Library<MemoryStore>) {
        for book in library.books() {
            assert_eq!(
                book.is_borrowed,
                library.borrows.contains_key(&book.isbn),
                "is_borrowed out of sync for {}",
                book.isbn
            );
        }
        for (isbn, holder) in &library.borrows {
            let user = library.get_user(holder).unwrap();
            assert!(user.holds(isbn), "{} missing from {}", isbn, holder);
        }
        for user in library.users() {
            assert!(user.borrowed_isbns.len() <= user.limit());
            for isbn in &user.borrowed_isbns {
                assert_eq!(library.holder(isbn), Some(user.name.as_str()));
            }
        }
    }

    #[test]
    fn test_borrow_available_book() {
        let mut library = library(QueuePolicy::Global);
        let saves_before = library.persistence().book_saves();

        let outcome = library.borrow("001", "alice").unwrap();

        assert!(matches!(outcome, BorrowOutcome::Borrowed { ref book } if book.is_borrowed));
        assert!(!library.is_available("001"));
        assert_eq!(library.holder("001"), Some("alice"));
        assert_eq!(library.borrowed_by("alice").unwrap(), ["001"]);
        assert_eq!(library.persistence().book_saves(), saves_before + 1);
        assert_consistent(&library);
    }

    #[rstest]
    #[case::unknown_book("999", "alice")]
    #[case::unknown_user("001", "mallory")]
    fn test_borrow_unknown_identifier(#[case] isbn: &str, #[case] username: &str) {
        let mut library = library(QueuePolicy::Global);

        let err = library.borrow(isbn, username).unwrap_err();

        assert!(err.is_not_found());
        assert!(library.wait_queue().is_empty());
        assert!(library.is_available("001"));
    }

    #[test]
    fn test_borrow_at_limit_is_rejected() {
        let mut library = library(QueuePolicy::Global);
        for isbn in ["002", "003", "004", "005", "006"] {
            library.borrow(isbn, "alice").unwrap();
        }

        let err = library.borrow("001", "alice").unwrap_err();

        assert_eq!(err, LibraryError::limit_reached("alice", 5));
        assert!(library.is_available("001"));
        assert_eq!(library.borrowed_by("alice").unwrap().len(), 5);
        assert_consistent(&library);
    }

    #[test]
    fn test_borrow_taken_book_queues_user() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("002", "bob").unwrap();
        let saves_before = library.persistence().book_saves();

        let outcome = library.borrow("002", "carol").unwrap();

        assert_eq!(outcome, BorrowOutcome::Queued { position: 1 });
        assert_eq!(library.holder("002"), Some("bob"));
        assert!(library.borrowed_by("carol").unwrap().is_empty());
        assert_eq!(library.wait_queue().waiting_for("002"), vec!["carol"]);
        assert_eq!(library.persistence().book_saves(), saves_before);
    }

    #[test]
    fn test_user_at_limit_still_queues_for_taken_book() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("001", "bob").unwrap();
        for isbn in ["002", "003", "004", "005", "006"] {
            library.borrow(isbn, "alice").unwrap();
        }

        let outcome = library.borrow("001", "alice").unwrap();

        assert_eq!(outcome, BorrowOutcome::Queued { position: 1 });
    }

    #[test]
    fn test_return_then_queue_drain_lends_to_waiting_user() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("002", "bob").unwrap();
        library.borrow("002", "carol").unwrap();

        let outcome = library.return_book("002", "bob").unwrap();

        assert!(!outcome.book.is_borrowed);
        assert!(matches!(
            outcome.handoff,
            Some(Handoff::Lent { ref username, .. }) if username == "carol"
        ));
        assert_eq!(library.holder("002"), Some("carol"));
        assert!(library.borrowed_by("bob").unwrap().is_empty());
        assert_eq!(library.borrowed_by("carol").unwrap(), ["002"]);
        assert!(library.wait_queue().is_empty());
        assert_consistent(&library);
    }

    #[test]
    fn test_global_queue_lends_unrelated_book_to_front_user() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("001", "alice").unwrap();
        library.borrow("002", "bob").unwrap();
        // carol waits on 002, but the queue does not remember that
        library.borrow("002", "carol").unwrap();

        let outcome = library.return_book("001", "alice").unwrap();

        assert!(matches!(
            outcome.handoff,
            Some(Handoff::Lent { ref username, ref book }) if username == "carol" && book.isbn == "001"
        ));
        assert_eq!(library.holder("001"), Some("carol"));
        assert_eq!(library.holder("002"), Some("bob"));
        assert_consistent(&library);
    }

    #[test]
    fn test_per_book_queue_only_drains_returned_isbn() {
        let mut library = library(QueuePolicy::PerBook);
        library.borrow("001", "alice").unwrap();
        library.borrow("002", "bob").unwrap();
        library.borrow("002", "carol").unwrap();

        let outcome = library.return_book("001", "alice").unwrap();
        assert!(outcome.handoff.is_none());
        assert!(library.is_available("001"));

        let outcome = library.return_book("002", "bob").unwrap();
        assert!(matches!(
            outcome.handoff,
            Some(Handoff::Lent { ref username, .. }) if username == "carol"
        ));
        assert_consistent(&library);
    }

    #[test]
    fn test_drain_drops_user_at_limit() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("001", "bob").unwrap();
        for isbn in ["002", "003", "004", "005", "006"] {
            library.borrow(isbn, "alice").unwrap();
        }
        library.borrow("001", "alice").unwrap();

        let outcome = library.return_book("001", "bob").unwrap();

        assert!(matches!(
            outcome.handoff,
            Some(Handoff::Dropped { ref username, reason: LibraryError::LimitReached { .. } })
                if username == "alice"
        ));
        assert!(library.is_available("001"));
        assert!(library.wait_queue().is_empty());
        assert_consistent(&library);
    }

    #[rstest]
    #[case::never_borrowed("001", "alice", None)]
    #[case::borrowed_by_someone_else("001", "alice", Some("bob"))]
    #[case::unknown_book("999", "alice", None)]
    fn test_mismatched_return_changes_nothing(
        #[case] isbn: &str,
        #[case] username: &str,
        #[case] holder: Option<&str>,
    ) {
        let mut library = library(QueuePolicy::Global);
        if let Some(holder) = holder {
            library.borrow(isbn, holder).unwrap();
        }
        library.borrow("001", "carol").ok();
        let books_before: Vec<Book> = library.books().into_iter().cloned().collect();
        let users_before: Vec<User> = library.users().into_iter().cloned().collect();
        let queue_before = library.wait_queue().len();
        let saves_before = library.persistence().book_saves();

        let err = library.return_book(isbn, username).unwrap_err();

        assert_eq!(err, LibraryError::not_borrowed_by_user(isbn, username));
        let books_after: Vec<Book> = library.books().into_iter().cloned().collect();
        let users_after: Vec<User> = library.users().into_iter().cloned().collect();
        assert_eq!(books_before, books_after);
        assert_eq!(users_before, users_after);
        assert_eq!(library.wait_queue().len(), queue_before);
        assert_eq!(library.persistence().book_saves(), saves_before);
    }

    #[test]
    fn test_borrow_return_round_trip() {
        let mut library = library(QueuePolicy::Global);

        library.borrow("003", "dave").unwrap();
        let outcome = library.return_book("003", "dave").unwrap();

        assert!(outcome.handoff.is_none());
        assert!(library.is_available("003"));
        assert!(library.holder("003").is_none());
        assert!(library.borrowed_by("dave").unwrap().is_empty());
        assert_consistent(&library);
    }

    #[test]
    fn test_return_flushes_books_and_users() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("003", "dave").unwrap();
        let book_saves = library.persistence().book_saves();
        let user_saves = library.persistence().user_saves();

        library.return_book("003", "dave").unwrap();

        assert_eq!(library.persistence().book_saves(), book_saves + 1);
        assert_eq!(library.persistence().user_saves(), user_saves + 1);
    }

    #[test]
    fn test_is_available_for_unknown_isbn_is_false() {
        let library = library(QueuePolicy::Global);
        assert!(!library.is_available("999"));
        assert!(library.get_book("999").is_none());
        assert!(library.is_available("001"));
    }

    #[test]
    fn test_by_genre_in_insertion_order() {
        let library = library(QueuePolicy::Global);

        let isbns: Vec<&str> = library
            .by_genre("SciFi")
            .unwrap()
            .iter()
            .map(|b| b.isbn.as_str())
            .collect();

        assert_eq!(isbns, vec!["001", "003", "005"]);
        assert_eq!(
            library.by_genre("Poetry").unwrap_err(),
            LibraryError::empty_genre("Poetry")
        );
    }

    #[test]
    fn test_re_adding_book_moves_it_between_genres() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("001", "alice").unwrap();

        library
            .add_book(Book::new("Dune", "Herbert", "001", "Classic"))
            .unwrap();

        let scifi: Vec<&str> = library
            .by_genre("SciFi")
            .unwrap()
            .iter()
            .map(|b| b.isbn.as_str())
            .collect();
        let classic: Vec<&str> = library
            .by_genre("Classic")
            .unwrap()
            .iter()
            .map(|b| b.isbn.as_str())
            .collect();
        assert_eq!(scifi, vec!["003", "005"]);
        assert_eq!(classic, vec!["002", "004", "007", "001"]);
        // Borrow state survives the replacement
        assert!(library.get_book("001").unwrap().is_borrowed);
        assert_consistent(&library);
    }

    #[test]
    fn test_re_registering_user_keeps_holdings() {
        let mut library = library(QueuePolicy::Global);
        library.borrow("001", "alice").unwrap();

        library.add_user(User::new("alice")).unwrap();

        assert_eq!(library.borrowed_by("alice").unwrap(), ["001"]);
        assert_eq!(library.users().len(), 4);
        assert_consistent(&library);
    }

    #[test]
    fn test_adds_flush_their_collection() {
        let mut library = Library::new(MemoryStore::new(), QueuePolicy::Global);

        library
            .add_book(Book::new("Dune", "Herbert", "001", "SciFi"))
            .unwrap();
        library.add_user(User::new("alice")).unwrap();

        let store = library.persistence();
        assert_eq!(store.book_saves(), 1);
        assert_eq!(store.user_saves(), 1);
        assert_eq!(store.saved_books()[0].isbn, "001");
        assert_eq!(store.saved_users()[0].name, "alice");
    }

    #[test]
    fn test_open_loads_without_flushing() {
        let store = MemoryStore::with_records(
            vec![Book::new("Dune", "Herbert", "001", "SciFi")],
            vec![User::new("alice")],
        );

        let library = Library::open(store, QueuePolicy::PerBook).unwrap();

        assert!(library.is_available("001"));
        assert_eq!(library.wait_queue().policy(), QueuePolicy::PerBook);
        assert!(library.get_user("alice").is_some());
        assert_eq!(library.by_genre("SciFi").unwrap().len(), 1);
        assert_eq!(library.persistence().book_saves(), 0);
        assert_eq!(library.persistence().user_saves(), 0);
    }

    #[test]
    fn test_persistence_failure_is_fatal() {
        let mut library = Library::new(MemoryStore::failing(), QueuePolicy::Global);

        let err = library
            .add_book(Book::new("Dune", "Herbert", "001", "SciFi"))
            .unwrap_err();

        assert!(err.is_fatal());
    }

    #[test]
    fn test_process_routes_commands() {
        let mut library = library(QueuePolicy::Global);

        let outcome = library
            .process(Command::Borrow {
                isbn: "001".to_string(),
                username: "alice".to_string(),
            })
            .unwrap();
        assert!(matches!(
            outcome,
            Outcome::Borrow { outcome: BorrowOutcome::Borrowed { .. }, .. }
        ));

        let outcome = library
            .process(Command::ListBorrowed("alice".to_string()))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::BorrowedBooks {
                username: "alice".to_string(),
                isbns: vec!["001".to_string()],
            }
        );

        let err = library
            .process(Command::ListBorrowed("mallory".to_string()))
            .unwrap_err();
        assert!(err.is_not_found());

        let saves_before = library.persistence().user_saves();
        assert_eq!(library.process(Command::Exit).unwrap(), Outcome::Exit);
        assert_eq!(library.persistence().user_saves(), saves_before + 1);
    }

    #[rstest]
    #[case::global(QueuePolicy::Global)]
    #[case::per_book(QueuePolicy::PerBook)]
    fn test_invariants_hold_under_long_operation_sequence(#[case] policy: QueuePolicy) {
        let mut library = library(policy);
        let users = ["alice", "bob", "carol", "dave"];
        let isbns = ["001", "002", "003", "004", "005", "006", "007"];

        // Deterministic linear congruential sequence of borrow/return calls
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..2_000 {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let user = users[(seed >> 33) as usize % users.len()];
            let isbn = isbns[(seed >> 17) as usize % isbns.len()];

            if seed % 3 == 0 {
                let _ = library.return_book(isbn, user);
            } else {
                let _ = library.borrow(isbn, user);
            }
            assert_consistent(&library);
        }
    }
}
