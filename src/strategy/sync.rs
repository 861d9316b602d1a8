//! Synchronous session strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! SessionStrategy trait. It orchestrates a session by coordinating between
//! the CommandReader (for command input), the Library (for business logic)
//! and the report writer (for output).
//!
//! This is the direct rendition of the console program: one engine, owned by
//! the session, with every flush performed inline.

use crate::core::Library;
use crate::io::{CommandReader, FlatFileStore};
use crate::strategy::{report, SessionStrategy};
use crate::types::{Command, LibraryConfig, LibraryError};
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Synchronous session strategy
///
/// # Examples
///
/// ```no_run
/// use library_catalog::strategy::{SessionStrategy, SyncSessionStrategy};
/// use library_catalog::types::LibraryConfig;
/// use std::path::Path;
///
/// let strategy = SyncSessionStrategy::new(LibraryConfig::in_dir("data"));
/// let mut output = std::io::stdout();
///
/// strategy
///     .run(Some(Path::new("commands.txt")), &mut output)
///     .expect("Session failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncSessionStrategy {
    config: LibraryConfig,
}

impl SyncSessionStrategy {
    /// Create a strategy over the given configuration
    pub fn new(config: LibraryConfig) -> Self {
        Self { config }
    }

    /// Feed every command to the library until `exit` or end of input
    fn drive<R: Read>(
        &self,
        library: &mut Library<FlatFileStore>,
        reader: CommandReader<R>,
        output: &mut dyn Write,
    ) -> Result<(), LibraryError> {
        for result in reader {
            let result = result.and_then(|command| library.process(command));
            if !report(result, output)? {
                return Ok(());
            }
        }

        // End of input behaves like an explicit exit
        report(library.process(Command::Exit), output)?;
        Ok(())
    }
}

impl SessionStrategy for SyncSessionStrategy {
    fn run(&self, input: Option<&Path>, output: &mut dyn Write) -> Result<(), LibraryError> {
        let store = FlatFileStore::from_config(&self.config);
        let mut library = Library::open(store, self.config.queue_policy)?;
        info!(strategy = "sync", policy = ?self.config.queue_policy, "session started");

        match input {
            Some(path) => self.drive(&mut library, CommandReader::open(path)?, output),
            None => self.drive(&mut library, CommandReader::new(std::io::stdin()), output),
        }
    }
}
