use crate::strategy::BatchConfig;
use crate::types::{LibraryConfig, QueuePolicy, DEFAULT_BOOKS_FILE, DEFAULT_USERS_FILE};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Manage a small library catalog from a command script
#[derive(Parser, Debug)]
#[command(name = "library")]
#[command(about = "Manage a library catalog: books, users, borrowing and wait queues", long_about = None)]
pub struct CliArgs {
    /// Command script; standard input is read when omitted
    #[arg(value_name = "SCRIPT", help = "Path to a command script (default: stdin)")]
    pub script: Option<PathBuf>,

    /// Directory holding the record files
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Book record file name, relative to the data directory
    #[arg(long = "books-file", value_name = "NAME", default_value = DEFAULT_BOOKS_FILE)]
    pub books_file: PathBuf,

    /// User record file name, relative to the data directory
    #[arg(long = "users-file", value_name = "NAME", default_value = DEFAULT_USERS_FILE)]
    pub users_file: PathBuf,

    /// Session strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Session strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Wait queue policy
    #[arg(
        long = "queue-policy",
        value_name = "POLICY",
        default_value = "global",
        help = "Wait queue policy: one 'global' queue or a queue 'per-book'"
    )]
    pub queue_policy: QueuePolicy,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 64)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Increase log detail on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available session strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a LibraryConfig from CLI arguments
    pub fn to_library_config(&self) -> LibraryConfig {
        LibraryConfig {
            books_path: self.data_dir.join(&self.books_file),
            users_path: self.data_dir.join(&self.users_file),
            queue_policy: self.queue_policy,
        }
    }

    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.worker_threads.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.worker_threads.unwrap_or(default.worker_threads),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Log level selected by the `-v` count
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
