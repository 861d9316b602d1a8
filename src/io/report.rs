//! Human-readable rendering of engine outcomes
//!
//! Every processed command produces one or more report lines on the output
//! stream. Errors are rendered inline as `Error: <message>` so a session log
//! reads top to bottom in command order.

use crate::types::{Book, BorrowOutcome, Handoff, LibraryError, Outcome};
use std::io::{self, Write};

/// Write the report lines for one outcome
pub fn write_outcome(outcome: &Outcome, output: &mut dyn Write) -> io::Result<()> {
    match outcome {
        Outcome::BookAdded(book) => writeln!(output, "Book added: {} ({})", book.title, book.isbn),
        Outcome::UserAdded(username) => writeln!(output, "User added: {}", username),
        Outcome::Catalog(books) => {
            if books.is_empty() {
                return writeln!(output, "No books in the library!");
            }
            write_books(books, output)
        }
        Outcome::Genre { genre, books } => {
            writeln!(output, "Books in genre: {}", genre)?;
            write_books(books, output)
        }
        Outcome::Borrow { username, outcome } => match outcome {
            BorrowOutcome::Borrowed { book } => write_borrowed(username, book, output),
            BorrowOutcome::Queued { position } => writeln!(
                output,
                "Book is currently borrowed. {} added to the queue (position {}).",
                username, position
            ),
        },
        Outcome::Return { username, outcome } => {
            writeln!(output, "{} returned the book: {}", username, outcome.book.title)?;
            match &outcome.handoff {
                Some(Handoff::Lent { username, book }) => write_borrowed(username, book, output),
                Some(Handoff::Dropped { username, reason }) => {
                    writeln!(output, "{} was removed from the queue: {}", username, reason)
                }
                None => Ok(()),
            }
        }
        Outcome::BorrowedBooks { username, isbns } => {
            if isbns.is_empty() {
                return writeln!(output, "{} has no borrowed books.", username);
            }
            writeln!(output, "{} has borrowed the following books:", username)?;
            for isbn in isbns {
                writeln!(output, "{}", isbn)?;
            }
            Ok(())
        }
        Outcome::Exit => writeln!(output, "Exiting library catalog."),
    }
}

/// Write the report line for a failed command
pub fn write_error(error: &LibraryError, output: &mut dyn Write) -> io::Result<()> {
    writeln!(output, "Error: {}", error)
}

fn write_books(books: &[Book], output: &mut dyn Write) -> io::Result<()> {
    for book in books {
        writeln!(output, "{}", book)?;
    }
    Ok(())
}

fn write_borrowed(username: &str, book: &Book, output: &mut dyn Write) -> io::Result<()> {
    writeln!(output, "{} successfully borrowed: {}", username, book.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReturnOutcome;
    use rstest::rstest;

    fn dune() -> Book {
        Book::new("Dune", "Frank Herbert", "001", "SciFi")
    }

    fn render(outcome: &Outcome) -> String {
        let mut output = Vec::new();
        write_outcome(outcome, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case::book_added(Outcome::BookAdded(dune()), "Book added: Dune (001)\n")]
    #[case::user_added(Outcome::UserAdded("alice".to_string()), "User added: alice\n")]
    #[case::empty_catalog(Outcome::Catalog(vec![]), "No books in the library!\n")]
    #[case::catalog(
        Outcome::Catalog(vec![dune(), Book::new("Emma", "Jane Austen", "002", "Classic")]),
        "Title: Dune, Author: Frank Herbert, ISBN: 001, Genre: SciFi\n\
         Title: Emma, Author: Jane Austen, ISBN: 002, Genre: Classic\n"
    )]
    #[case::genre(
        Outcome::Genre { genre: "SciFi".to_string(), books: vec![dune()] },
        "Books in genre: SciFi\nTitle: Dune, Author: Frank Herbert, ISBN: 001, Genre: SciFi\n"
    )]
    #[case::borrowed(
        Outcome::Borrow {
            username: "alice".to_string(),
            outcome: BorrowOutcome::Borrowed { book: dune() },
        },
        "alice successfully borrowed: Dune\n"
    )]
    #[case::queued(
        Outcome::Borrow {
            username: "carol".to_string(),
            outcome: BorrowOutcome::Queued { position: 2 },
        },
        "Book is currently borrowed. carol added to the queue (position 2).\n"
    )]
    #[case::returned_no_queue(
        Outcome::Return {
            username: "bob".to_string(),
            outcome: ReturnOutcome { book: dune(), handoff: None },
        },
        "bob returned the book: Dune\n"
    )]
    #[case::returned_and_lent(
        Outcome::Return {
            username: "bob".to_string(),
            outcome: ReturnOutcome {
                book: dune(),
                handoff: Some(Handoff::Lent { username: "carol".to_string(), book: dune() }),
            },
        },
        "bob returned the book: Dune\ncarol successfully borrowed: Dune\n"
    )]
    #[case::returned_and_dropped(
        Outcome::Return {
            username: "bob".to_string(),
            outcome: ReturnOutcome {
                book: dune(),
                handoff: Some(Handoff::Dropped {
                    username: "alice".to_string(),
                    reason: LibraryError::limit_reached("alice", 5),
                }),
            },
        },
        "bob returned the book: Dune\n\
         alice was removed from the queue: alice has reached the borrow limit of 5 books\n"
    )]
    #[case::no_borrowed_books(
        Outcome::BorrowedBooks { username: "alice".to_string(), isbns: vec![] },
        "alice has no borrowed books.\n"
    )]
    #[case::borrowed_books(
        Outcome::BorrowedBooks {
            username: "alice".to_string(),
            isbns: vec!["001".to_string(), "003".to_string()],
        },
        "alice has borrowed the following books:\n001\n003\n"
    )]
    #[case::exit(Outcome::Exit, "Exiting library catalog.\n")]
    fn test_write_outcome(#[case] outcome: Outcome, #[case] expected: &str) {
        assert_eq!(render(&outcome), expected);
    }

    #[test]
    fn test_write_error() {
        let mut output = Vec::new();
        write_error(&LibraryError::book_not_found("999"), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Error: Book not found: 999\n");
    }
}
