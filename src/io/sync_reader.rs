//! Synchronous command reader with iterator interface
//!
//! Provides a streaming iterator over session commands read from a script
//! file or from standard input. Delegates format concerns to the
//! record_format module.
//!
//! # Error Handling
//!
//! - A missing script file is returned from `open()`
//! - Malformed command lines are yielded as `InvalidCommand` errors, carrying
//!   their line number, and iteration continues
//! - I/O failures are yielded as `IoError`
//!
//! ```no_run
//! use library_catalog::io::CommandReader;
//! use std::path::Path;
//!
//! let reader = CommandReader::open(Path::new("commands.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("{:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::record_format::{command_reader_builder, convert_command_fields};
use crate::types::{Command, LibraryError};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming reader of pipe-delimited command lines
#[derive(Debug)]
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl CommandReader<File> {
    /// Open a command script
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the script does not exist, or `IoError` if
    /// it cannot be opened.
    pub fn open(path: &Path) -> Result<Self, LibraryError> {
        let file = File::open(path).map_err(|e| LibraryError::open_failed(path, e))?;
        Ok(Self::new(file))
    }
}

impl<R: Read> CommandReader<R> {
    /// Wrap any byte source, such as standard input
    pub fn new(source: R) -> Self {
        Self {
            reader: command_reader_builder().from_reader(source),
            record: StringRecord::new(),
        }
    }
}

impl<R: Read> Iterator for CommandReader<R> {
    type Item = Result<Command, LibraryError>;

    /// Read the next non-blank, non-comment line and convert it
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Command))` - Successfully parsed command
    /// * `Some(Err(LibraryError))` - Invalid command or I/O failure
    /// * `None` - End of input reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                Some(
                    convert_command_fields(&self.record)
                        .map_err(|message| LibraryError::invalid_command(line, message)),
                )
            }
            Ok(false) => None,
            Err(e) => Some(Err(match e.kind() {
                csv::ErrorKind::Io(_) => e.into(),
                _ => LibraryError::invalid_command(
                    e.position().map(|pos| pos.line()),
                    e.to_string(),
                ),
            })),
        }
    }
}
