//! Heap-backed Priority Queue
//!
//! This crate provides [`PriorityQueue`], a binary min-heap over `f64`
//! priorities stored in a contiguous, doubling array.
//!
//! # Features
//!
//! - **Min-heap ordering**: the lowest priority is always dequeued first
//! - **FIFO among ties**: equal priorities are dequeued in insertion order
//! - **Explicit growth**: capacity starts at [`INITIAL_CAPACITY`] and doubles when full
//! - **Deep copies**: `clone` yields a queue with independent storage
//! - **Command harness** (feature `cli`): a line-oriented shell over the queue
//!
//! # Example
//!
//! ```rust
//! use heap_priority_queue::{PriorityQueue, QueueError};
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("A", 5.0);
//! queue.enqueue("B", 5.0);
//! queue.enqueue("urgent", 0.5);
//!
//! assert_eq!(queue.dequeue(), Ok("urgent"));
//! assert_eq!(queue.dequeue(), Ok("A"));
//! assert_eq!(queue.dequeue(), Ok("B"));
//! assert!(matches!(queue.peek(), Err(QueueError::Empty { .. })));
//! ```

pub mod command;
pub mod error;
pub mod pqueue;
#[cfg(feature = "cli")]
pub mod repl;

pub use error::{Operation, QueueError, Result};
pub use pqueue::{PriorityQueue, INITIAL_CAPACITY};
