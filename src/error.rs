//! Error types for priority queue operations

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// The queue operation that observed an empty queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Dequeue,
    Peek,
    PeekPriority,
}

impl Operation {
    /// The verb used in error messages ("dequeue" or "peek")
    fn verb(self) -> &'static str {
        match self {
            Operation::Dequeue => "dequeue",
            Operation::Peek | Operation::PeekPriority => "peek",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Dequeue => write!(f, "dequeue"),
            Operation::Peek => write!(f, "peek"),
            Operation::PeekPriority => write!(f, "peekPriority"),
        }
    }
}

/// Error type for priority queue operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// `dequeue`, `peek` or `peek_priority` was called on an empty queue
    #[error("{operation}: attempting to {} an empty priority queue", .operation.verb())]
    Empty { operation: Operation },

    /// Storage could not be grown; only reported by `try_enqueue`
    #[error("failed to grow priority queue storage: {0}")]
    Allocation(#[from] TryReserveError),
}

impl QueueError {
    pub(crate) fn empty(operation: Operation) -> Self {
        QueueError::Empty { operation }
    }

    /// Returns true if this error reports an empty queue
    pub fn is_empty_queue(&self) -> bool {
        matches!(self, QueueError::Empty { .. })
    }
}

/// Result type alias for priority queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
