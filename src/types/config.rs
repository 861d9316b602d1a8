//! Runtime configuration for a catalog session

use clap::ValueEnum;
use std::path::PathBuf;

/// Default file name for book records
pub const DEFAULT_BOOKS_FILE: &str = "books.txt";

/// Default file name for user records
pub const DEFAULT_USERS_FILE: &str = "users.txt";

/// How contended borrow requests are queued
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum QueuePolicy {
    /// One FIFO shared by every book
    ///
    /// A return on any book lends it to whoever is at the front, regardless
    /// of which book they originally asked for.
    #[default]
    Global,

    /// One FIFO per ISBN
    ///
    /// A return only drains the queue of the returned book. This changes
    /// observable behavior relative to the global queue.
    PerBook,
}

/// Configuration for a catalog session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Path of the book record file
    pub books_path: PathBuf,

    /// Path of the user record file
    pub users_path: PathBuf,

    /// Wait queue policy
    pub queue_policy: QueuePolicy,
}

impl LibraryConfig {
    /// Build a configuration rooted at a data directory with default file names
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            books_path: data_dir.join(DEFAULT_BOOKS_FILE),
            users_path: data_dir.join(DEFAULT_USERS_FILE),
            queue_policy: QueuePolicy::default(),
        }
    }

    /// Replace the queue policy
    pub fn with_queue_policy(mut self, queue_policy: QueuePolicy) -> Self {
        self.queue_policy = queue_policy;
        self
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_in_dir_uses_default_file_names() {
        let config = LibraryConfig::in_dir("/data");
        assert_eq!(config.books_path, Path::new("/data/books.txt"));
        assert_eq!(config.users_path, Path::new("/data/users.txt"));
        assert_eq!(config.queue_policy, QueuePolicy::Global);
    }

    #[test]
    fn test_with_queue_policy() {
        let config = LibraryConfig::default().with_queue_policy(QueuePolicy::PerBook);
        assert_eq!(config.queue_policy, QueuePolicy::PerBook);
    }
}
