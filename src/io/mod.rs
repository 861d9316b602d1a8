//! I/O module
//!
//! Handles record files, command input and report output.
//!
//! # Components
//!
//! - `record_format` - Pipe-delimited record format (conversion, reader/writer setup)
//! - `flat_file` - File-backed persistence adapter
//! - `memory` - In-memory persistence adapter
//! - `sync_reader` - Synchronous command reader with iterator interface
//! - `async_reader` - Asynchronous command reader with batch reading interface
//! - `report` - Outcome rendering

pub mod async_reader;
pub mod flat_file;
pub mod memory;
pub mod record_format;
pub mod report;
pub mod sync_reader;

pub use async_reader::AsyncCommandReader;
pub use flat_file::FlatFileStore;
pub use memory::MemoryStore;
pub use record_format::{book_from_fields, convert_command_fields, user_from_fields};
pub use report::{write_error, write_outcome};
pub use sync_reader::CommandReader;
