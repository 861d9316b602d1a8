//! Asynchronous command reader with batch interface
//!
//! Reads session commands through csv-async so a script (or standard input)
//! can be consumed on a tokio runtime without blocking a worker thread.
//!
//! # Architecture
//!
//! ```text
//! Script → AsyncCommandReader → Batches of Result<Command, LibraryError>
//!                  ↓
//!          record_format module
//!          (convert_command_fields)
//! ```

use crate::io::record_format::{convert_command_fields, COMMENT, DELIMITER};
use crate::types::{Command, LibraryError};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous command reader
pub struct AsyncCommandReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncCommandReader<R> {
    /// Create a new AsyncCommandReader from an async byte source
    ///
    /// Uses the same dialect as the synchronous reader: `|` delimiter, no
    /// header, no quoting, trimmed fields, `#` comments.
    pub fn new(source: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .comment(Some(COMMENT))
            .create_reader(source);

        Self { csv_reader }
    }

    /// Read up to `batch_size` commands
    ///
    /// Invalid lines are kept in the batch as errors so they are reported
    /// in input order. Returns an empty vector at end of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Result<Command, LibraryError>> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.records();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => batch.push(convert_record(&record)),
                Some(Err(e)) => batch.push(Err(convert_error(e))),
                None => break,
            }
        }

        batch
    }
}

fn convert_record(record: &StringRecord) -> Result<Command, LibraryError> {
    let line = record.position().map(|pos| pos.line());
    convert_command_fields(record.iter())
        .map_err(|message| LibraryError::invalid_command(line, message))
}

fn convert_error(error: csv_async::Error) -> LibraryError {
    match error.kind() {
        csv_async::ErrorKind::Io(io_error) => LibraryError::IoError {
            message: io_error.to_string(),
        },
        _ => LibraryError::invalid_command(None, error.to_string()),
    }
}
