//! Library Catalog CLI
//!
//! Runs a catalog session from a command script or standard input.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.txt
//! cargo run -- --data-dir data --strategy async commands.txt
//! cargo run -- --queue-policy per-book -vv < commands.txt
//! ```
//!
//! Books and users are loaded from the data directory at startup and written
//! back after every mutation and on exit. The session report goes to stdout;
//! logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (script not found, record file unreadable or unwritable)

use library_catalog::cli;
use library_catalog::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .with_target(false)
        .init();

    let strategy = {
        let batch = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.to_library_config(), batch)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.run(args.script.as_deref(), &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
