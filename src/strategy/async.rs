//! Asynchronous batch session strategy
//!
//! This module provides an asynchronous implementation of the SessionStrategy
//! trait. Commands are read in batches through csv-async on a tokio
//! multi-threaded runtime and applied through a [`SharedLibrary`] handle.
//!
//! # Architecture
//!
//! ```text
//! AsyncSessionStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── AsyncCommandReader (batch command reading)
//!     └── SharedLibrary (Arc<Mutex<Library>>)
//!             └── FlatFileStore
//! ```
//!
//! # Ordering
//!
//! Within a session, command order is significant (a return drains the queue
//! formed by earlier borrows), so batches are applied strictly in input order.
//! Reading the next batch overlaps with nothing but I/O; the output is
//! byte-identical to the synchronous strategy for the same input.

use crate::core::{Library, SharedLibrary};
use crate::io::{AsyncCommandReader, FlatFileStore};
use crate::strategy::{report, SessionStrategy};
use crate::types::{Command, LibraryConfig, LibraryError};
use futures::io::AsyncRead;
use std::io::Write;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, info, warn};

/// Configuration for batch reading
///
/// Controls how many commands are read per batch and the number of worker
/// threads backing the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                requested = batch_size,
                using = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                requested = worker_threads,
                using = default.worker_threads,
                "invalid worker thread count, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous batch session strategy
///
/// # Thread Safety
///
/// AsyncSessionStrategy is Send + Sync. The engine it drives lives behind a
/// single async mutex, so every command (including a return with its queue
/// drain) is applied atomically.
#[derive(Debug, Clone)]
pub struct AsyncSessionStrategy {
    config: LibraryConfig,
    batch: BatchConfig,
}

impl AsyncSessionStrategy {
    /// Create a new AsyncSessionStrategy
    pub fn new(config: LibraryConfig, batch: BatchConfig) -> Self {
        Self { config, batch }
    }

    /// Feed batches of commands to the library until `exit` or end of input
    async fn drive<R>(
        &self,
        library: &SharedLibrary<FlatFileStore>,
        mut reader: AsyncCommandReader<R>,
        output: &mut dyn Write,
    ) -> Result<(), LibraryError>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        loop {
            let batch = reader.read_batch(self.batch.batch_size).await;
            if batch.is_empty() {
                break;
            }
            debug!(commands = batch.len(), "processing batch");

            for result in batch {
                let result = match result {
                    Ok(command) => library.process(command).await,
                    Err(e) => Err(e),
                };
                if !report(result, output)? {
                    return Ok(());
                }
            }
        }

        report(library.process(Command::Exit).await, output)?;
        Ok(())
    }
}

impl SessionStrategy for AsyncSessionStrategy {
    fn run(&self, input: Option<&Path>, output: &mut dyn Write) -> Result<(), LibraryError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.batch.worker_threads)
            .build()
            .map_err(|e| LibraryError::IoError {
                message: format!("failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let store = FlatFileStore::from_config(&self.config);
            let library = SharedLibrary::new(Library::open(store, self.config.queue_policy)?);
            info!(
                strategy = "async",
                batch_size = self.batch.batch_size,
                workers = self.batch.worker_threads,
                "session started"
            );

            match input {
                Some(path) => {
                    let file = tokio::fs::File::open(path)
                        .await
                        .map_err(|e| LibraryError::open_failed(path, e))?;
                    let reader = AsyncCommandReader::new(file.compat());
                    self.drive(&library, reader, output).await
                }
                None => {
                    let reader = AsyncCommandReader::new(tokio::io::stdin().compat());
                    self.drive(&library, reader, output).await
                }
            }
        })
    }
}
