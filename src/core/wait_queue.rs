//! Wait queue for contested books
//!
//! Under [`QueuePolicy::Global`] there is one FIFO of usernames shared by
//! every book, and the ISBN a user was waiting for is not recorded. Whoever
//! is at the front gets the next returned book, whichever book that is.
//!
//! [`QueuePolicy::PerBook`] keeps a separate FIFO per ISBN instead.

use crate::types::{QueuePolicy, Username};
use std::collections::{HashMap, VecDeque};

/// FIFO of users waiting on borrowed books
#[derive(Debug, Default)]
pub struct WaitQueue {
    policy: QueuePolicy,

    /// Shared queue, used under the global policy
    global: VecDeque<Username>,

    /// ISBN-scoped queues, used under the per-book policy
    per_book: HashMap<String, VecDeque<Username>>,
}

impl WaitQueue {
    /// Create an empty queue with the given policy
    pub fn new(policy: QueuePolicy) -> Self {
        WaitQueue {
            policy,
            global: VecDeque::new(),
            per_book: HashMap::new(),
        }
    }

    /// The policy this queue was built with
    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    /// Append a user to the back of the queue for `isbn`
    ///
    /// The same user may be queued more than once.
    ///
    /// # Returns
    ///
    /// The 1-based position the user now occupies
    pub fn enqueue(&mut self, isbn: &str, username: &str) -> usize {
        let queue = match self.policy {
            QueuePolicy::Global => &mut self.global,
            QueuePolicy::PerBook => self.per_book.entry(isbn.to_string()).or_default(),
        };
        queue.push_back(username.to_string());
        queue.len()
    }

    /// Pop the user who should be offered `isbn` next
    pub fn pop_next(&mut self, isbn: &str) -> Option<Username> {
        match self.policy {
            QueuePolicy::Global => self.global.pop_front(),
            QueuePolicy::PerBook => {
                let queue = self.per_book.get_mut(isbn)?;
                let next = queue.pop_front();
                if queue.is_empty() {
                    self.per_book.remove(isbn);
                }
                next
            }
        }
    }

    /// Users who would be offered `isbn`, front first
    pub fn waiting_for(&self, isbn: &str) -> Vec<&str> {
        let queue = match self.policy {
            QueuePolicy::Global => Some(&self.global),
            QueuePolicy::PerBook => self.per_book.get(isbn),
        };
        queue
            .map(|q| q.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Total number of queued entries across all books
    pub fn len(&self) -> usize {
        self.global.len() + self.per_book.values().map(VecDeque::len).sum::<usize>()
    }

    /// Whether nobody is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
