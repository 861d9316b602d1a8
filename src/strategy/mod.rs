//! Session strategy module
//!
//! This module defines the Strategy pattern for complete catalog sessions:
//! loading the catalog, reading commands, driving the engine and reporting
//! each outcome. Different implementations (synchronous, asynchronous) can be
//! selected at runtime and produce identical output for identical input.

use crate::cli::StrategyType;
use crate::io::{write_error, write_outcome};
use crate::types::{LibraryConfig, LibraryError, Outcome};
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncSessionStrategy, BatchConfig};
pub use sync::SyncSessionStrategy;

/// Session strategy trait for complete catalog sessions
pub trait SessionStrategy: Send + Sync {
    /// Run a session and write its report to `output`
    ///
    /// Commands come from the script at `input`, or from standard input when
    /// `input` is `None`. The session ends at an `exit` command or at end of
    /// input, and both collections are flushed on the way out.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions: a missing script, an
    /// unreadable or unwritable record file, or a failed write to `output`.
    /// Failed commands are reported inline and the session continues.
    fn run(&self, input: Option<&Path>, output: &mut dyn Write) -> Result<(), LibraryError>;
}

/// Create a session strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of session strategy to create (Sync or Async)
/// * `config` - Record file locations and queue policy
/// * `batch` - Optional configuration for async batch reading (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: LibraryConfig,
    batch: Option<BatchConfig>,
) -> Box<dyn SessionStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncSessionStrategy::new(config)),
        StrategyType::Async => {
            let batch = batch.unwrap_or_default();
            Box::new(AsyncSessionStrategy::new(config, batch))
        }
    }
}

/// Report one command result
///
/// # Returns
///
/// * `Ok(true)` - keep reading commands
/// * `Ok(false)` - the session ended with `exit`
/// * `Err(LibraryError)` - a fatal error that ends the session
pub(crate) fn report(
    result: Result<Outcome, LibraryError>,
    output: &mut dyn Write,
) -> Result<bool, LibraryError> {
    match result {
        Ok(outcome) => {
            write_outcome(&outcome, output)?;
            Ok(outcome != Outcome::Exit)
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!(error = %e, "command failed");
            write_error(&e, output)?;
            Ok(true)
        }
    }
}
