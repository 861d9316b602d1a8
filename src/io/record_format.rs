//! Pipe-delimited record format for books, users and session commands
//!
//! This module centralizes all record format concerns, providing:
//! - csv reader/writer configuration for `|`-separated lines
//! - Conversion from raw fields to Book, User and Command
//!
//! Conversion functions are pure (no I/O) for easy testing.
//!
//! # Format
//!
//! ```text
//! books.txt      title|author|isbn|genre
//! users.txt      name
//! commands       keyword|arg|arg...
//! ```
//!
//! Fields are never quoted or escaped. A `|` inside a field therefore splits
//! it on reload; extra fields after the fourth book field are ignored.

use crate::types::{Book, Command, User};
use csv::{QuoteStyle, ReaderBuilder, Trim, WriterBuilder};

/// Field delimiter shared by every record file
pub const DELIMITER: u8 = b'|';

/// Comment marker for command scripts
pub const COMMENT: u8 = b'#';

/// Reader configuration for book and user record files
///
/// Fields are taken verbatim: no trimming, no quote handling, and records
/// may have any number of fields.
pub fn record_reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

/// Writer configuration for book and user record files
pub fn record_writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never);
    builder
}

/// Reader configuration for command scripts
///
/// Same delimiter as the record files, with whitespace trimming and `#`
/// comment lines.
pub fn command_reader_builder() -> ReaderBuilder {
    let mut builder = record_reader_builder();
    builder.trim(Trim::All).comment(Some(COMMENT));
    builder
}

/// Build a Book from the fields of one `title|author|isbn|genre` line
///
/// Missing trailing fields become empty strings and fields beyond the
/// fourth are dropped. The book is always available.
pub fn book_from_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Book {
    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();

    let title = next();
    let author = next();
    let isbn = next();
    let genre = next();

    Book::new(title, author, isbn, genre)
}

/// Build a User from the fields of one user line
///
/// The whole line is the name, so any `|` splits are rejoined.
pub fn user_from_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> User {
    let name = fields
        .into_iter()
        .collect::<Vec<_>>()
        .join(&char::from(DELIMITER).to_string());
    User::new(name)
}

/// Convert the fields of a command line to a Command
///
/// The keyword is case-insensitive and may be either the action name or
/// its console menu number:
///
/// | #  | keyword    | arguments                    |
/// |----|------------|------------------------------|
/// | 1  | `add-book` | `title\|author\|isbn\|genre` |
/// | 2  | `add-user` | `name`                       |
/// | 3  | `list`     |                              |
/// | 4  | `genre`    | `genre`                      |
/// | 5  | `borrow`   | `isbn\|user`                 |
/// | 6  | `return`   | `isbn\|user`                 |
/// | 7  | `borrowed` | `user`                       |
/// | 8  | `exit`     |                              |
///
/// # Returns
///
/// Result containing either:
/// - Ok(Command) - Successfully converted command
/// - Err(String) - Error message describing the conversion failure
pub fn convert_command_fields<'a>(
    fields: impl IntoIterator<Item = &'a str>,
) -> Result<Command, String> {
    let mut fields = fields.into_iter();
    let keyword = fields.next().unwrap_or_default();
    let args: Vec<&str> = fields.collect();

    let command = match keyword.to_lowercase().as_str() {
        "1" | "add-book" => {
            let [title, author, isbn, genre] = expect_args::<4>(keyword, &args)?;
            let isbn = non_empty(keyword, "ISBN", isbn)?;
            Command::AddBook(Book::new(title, author, isbn, genre))
        }
        "2" | "add-user" => {
            let [name] = expect_args::<1>(keyword, &args)?;
            Command::AddUser(non_empty(keyword, "user name", name)?.to_string())
        }
        "3" | "list" => {
            expect_args::<0>(keyword, &args)?;
            Command::ListBooks
        }
        "4" | "genre" => {
            let [genre] = expect_args::<1>(keyword, &args)?;
            Command::ListGenre(genre.to_string())
        }
        "5" | "borrow" => {
            let [isbn, username] = expect_args::<2>(keyword, &args)?;
            Command::Borrow {
                isbn: isbn.to_string(),
                username: username.to_string(),
            }
        }
        "6" | "return" => {
            let [isbn, username] = expect_args::<2>(keyword, &args)?;
            Command::Return {
                isbn: isbn.to_string(),
                username: username.to_string(),
            }
        }
        "7" | "borrowed" => {
            let [username] = expect_args::<1>(keyword, &args)?;
            Command::ListBorrowed(username.to_string())
        }
        "8" | "exit" => {
            expect_args::<0>(keyword, &args)?;
            Command::Exit
        }
        _ => return Err(format!("Unknown command '{}'", keyword)),
    };

    Ok(command)
}

/// Reject an empty identifier
fn non_empty<'a>(keyword: &str, what: &str, value: &'a str) -> Result<&'a str, String> {
    if value.is_empty() {
        return Err(format!("'{}' requires a non-empty {}", keyword, what));
    }
    Ok(value)
}

fn expect_args<'a, const N: usize>(
    keyword: &str,
    args: &[&'a str],
) -> Result<[&'a str; N], String> {
    <[&'a str; N]>::try_from(args).map_err(|_| {
        format!(
            "'{}' expects {} argument(s), got {}",
            keyword,
            N,
            args.len()
        )
    })
}
