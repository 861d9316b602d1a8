//! Flat-file persistence adapter
//!
//! Stores books and users as newline-delimited, pipe-separated records in two
//! files. Every save rewrites the whole file. A missing file loads as an
//! empty collection so a fresh data directory needs no setup.

use crate::core::CatalogPersistence;
use crate::io::record_format::{
    book_from_fields, record_reader_builder, record_writer_builder, user_from_fields,
};
use crate::types::{Book, LibraryConfig, LibraryError, User};
use csv::StringRecord;
use serde::Serialize;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Book and user record files on disk
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    books_path: PathBuf,
    users_path: PathBuf,
}

impl FlatFileStore {
    /// Create a store over the two given files
    pub fn new(books_path: impl Into<PathBuf>, users_path: impl Into<PathBuf>) -> Self {
        FlatFileStore {
            books_path: books_path.into(),
            users_path: users_path.into(),
        }
    }

    /// Create a store over the files named in a session configuration
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(&config.books_path, &config.users_path)
    }

    /// Path of the book record file
    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    /// Path of the user record file
    pub fn users_path(&self) -> &Path {
        &self.users_path
    }
}

impl CatalogPersistence for FlatFileStore {
    fn load_books(&mut self) -> Result<Vec<Book>, LibraryError> {
        read_records(&self.books_path, |record| book_from_fields(record))
    }

    fn load_users(&mut self) -> Result<Vec<User>, LibraryError> {
        read_records(&self.users_path, |record| user_from_fields(record))
    }

    fn save_books(&mut self, books: &[&Book]) -> Result<(), LibraryError> {
        write_records(&self.books_path, books)
    }

    fn save_users(&mut self, users: &[&User]) -> Result<(), LibraryError> {
        write_records(&self.users_path, users)
    }
}

/// Read every record of a file, converting each with `convert`
///
/// Blank lines are skipped. A missing file yields no records.
fn read_records<T>(
    path: &Path,
    convert: impl Fn(&StringRecord) -> T,
) -> Result<Vec<T>, LibraryError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "record file missing; starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = record_reader_builder().from_reader(file);
    let mut items = Vec::new();
    for result in reader.records() {
        let record = result?;
        items.push(convert(&record));
    }

    debug!(path = %path.display(), count = items.len(), "records loaded");
    Ok(items)
}

/// Overwrite a file with one record per item
fn write_records<T: Serialize>(path: &Path, items: &[&T]) -> Result<(), LibraryError> {
    let mut writer = record_writer_builder().from_path(path)?;
    for item in items {
        writer.serialize(item)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), count = items.len(), "records saved");
    Ok(())
}
