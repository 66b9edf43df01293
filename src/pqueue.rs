//! Heap-backed priority queue
//!
//! A binary min-heap stored in a contiguous array. Each entry pairs a value
//! with an `f64` priority; lower priorities are dequeued first.
//!
//! Entries are also stamped with a per-queue sequence number when they are
//! enqueued. The heap orders by `(priority, sequence)`, so entries that share
//! a priority are dequeued in the order they were enqueued (FIFO).
//!
//! # Time Complexity
//!
//! | Operation       | Complexity         |
//! |-----------------|--------------------|
//! | `enqueue`       | O(log n) amortized |
//! | `dequeue`       | O(log n)           |
//! | `peek`          | O(1)               |
//! | `peek_priority` | O(1)               |
//! | `size`          | O(1)               |
//! | `clear`         | O(n) drops, O(1) otherwise |
//!
//! # Example
//!
//! ```rust
//! use heap_priority_queue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("low", 9.0);
//! queue.enqueue("first", 1.0);
//! queue.enqueue("second", 1.0);
//!
//! assert_eq!(queue.peek(), Ok(&"first"));
//! assert_eq!(queue.peek_priority(), Ok(1.0));
//! assert_eq!(queue.dequeue(), Ok("first"));
//! assert_eq!(queue.dequeue(), Ok("second"));
//! assert_eq!(queue.dequeue(), Ok("low"));
//! assert!(queue.dequeue().is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{Operation, QueueError, Result};

/// Capacity of a freshly constructed queue, and the floor for any copy of one
pub const INITIAL_CAPACITY: usize = 10;

/// A single heap slot
struct Entry<T> {
    priority: f64,
    /// Enqueue order, used to break ties between equal priorities
    sequence: u64,
    value: T,
}

impl<T> Entry<T> {
    /// Total order on `(priority, sequence)`
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }

    /// True if `self` must be dequeued before `other`
    fn precedes(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Less
    }
}

impl<T: Clone> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            sequence: self.sequence,
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} @ {})", self.value, self.priority)
    }
}

/// A priority queue backed by a binary min-heap
///
/// Storage is a `Vec` whose logical capacity is tracked explicitly. The
/// capacity starts at [`INITIAL_CAPACITY`] and doubles whenever an enqueue
/// finds the queue full; it never shrinks, not even on [`clear`](Self::clear).
///
/// Cloning produces a fully independent queue with its own storage.
pub struct PriorityQueue<T> {
    /// Heap-ordered entries; `entries[0]` is the next to be dequeued
    entries: Vec<Entry<T>>,
    /// Logical capacity, always `>= entries.len()`
    capacity: usize,
    /// Sequence number handed to the next enqueued entry
    next_sequence: u64,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue with [`INITIAL_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty queue able to hold `capacity` entries before growing
    ///
    /// Capacities below [`INITIAL_CAPACITY`] are raised to it.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(INITIAL_CAPACITY);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Returns the number of entries in the queue
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of entries in the queue
    ///
    /// Same as [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns true if the queue holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many entries fit before the storage next grows
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry, keeping the allocated capacity
    pub fn clear(&mut self) {
        debug!(
            dropped = self.entries.len(),
            capacity = self.capacity,
            "clearing priority queue"
        );
        self.entries.clear();
        self.next_sequence = 0;
    }

    /// Inserts `value` with the given priority
    ///
    /// Lower priorities are dequeued first. Among equal priorities, values
    /// are dequeued in the order they were enqueued.
    ///
    /// # Panics
    ///
    /// Aborts like any `Vec` allocation if the doubled storage cannot be
    /// obtained. Use [`try_enqueue`](Self::try_enqueue) to observe that as an
    /// error instead.
    pub fn enqueue(&mut self, value: T, priority: f64) {
        if self.entries.len() == self.capacity {
            let new_capacity = self.grown_capacity();
            self.entries.reserve_exact(new_capacity - self.entries.len());
            self.set_capacity(new_capacity);
        }
        self.push_entry(value, priority);
    }

    /// Inserts `value` with the given priority, reporting allocation failure
    ///
    /// If the storage has to grow and the allocation fails, the queue is left
    /// exactly as it was and [`QueueError::Allocation`] is returned.
    pub fn try_enqueue(&mut self, value: T, priority: f64) -> Result<()> {
        if self.entries.len() == self.capacity {
            let new_capacity = self.grown_capacity();
            self.entries.try_reserve_exact(new_capacity - self.entries.len())?;
            self.set_capacity(new_capacity);
        }
        self.push_entry(value, priority);
        Ok(())
    }

    /// Removes and returns the value with the lowest priority
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        self.pop_root()
            .map(|entry| entry.value)
            .ok_or_else(|| QueueError::empty(Operation::Dequeue))
    }

    /// Returns the value with the lowest priority without removing it
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue is empty.
    pub fn peek(&self) -> Result<&T> {
        self.entries
            .first()
            .map(|entry| &entry.value)
            .ok_or_else(|| QueueError::empty(Operation::Peek))
    }

    /// Returns the lowest priority in the queue without removing its value
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue is empty.
    pub fn peek_priority(&self) -> Result<f64> {
        self.entries
            .first()
            .map(|entry| entry.priority)
            .ok_or_else(|| QueueError::empty(Operation::PeekPriority))
    }

    /// Iterates over `(priority, value)` pairs in storage order
    ///
    /// Storage order is heap order, not priority order; see
    /// [`sorted`](Self::sorted) for the latter.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> + '_ {
        self.entries.iter().map(|entry| (entry.priority, &entry.value))
    }

    /// Returns every `(priority, value)` pair in dequeue order
    ///
    /// The queue itself is not modified.
    pub fn sorted(&self) -> Vec<(f64, &T)> {
        let mut ordered: Vec<&Entry<T>> = self.entries.iter().collect();
        ordered.sort_by(|a, b| a.key_cmp(b));
        ordered
            .into_iter()
            .map(|entry| (entry.priority, &entry.value))
            .collect()
    }

    /// Consumes the queue, returning every `(priority, value)` pair in dequeue order
    pub fn into_sorted_vec(mut self) -> Vec<(f64, T)> {
        let mut sorted = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.pop_root() {
            sorted.push((entry.priority, entry.value));
        }
        sorted
    }

    /// Checks the heap-order and shape invariants
    ///
    /// Every entry must precede both of its children. The shape invariant
    /// (a complete tree with no gaps) holds by construction of the backing
    /// `Vec`, so only the logical capacity bound is checked for it.
    pub fn is_valid_heap(&self) -> bool {
        let len = self.entries.len();
        if len > self.capacity || self.capacity < INITIAL_CAPACITY {
            return false;
        }
        (1..len).all(|child| {
            let parent = (child - 1) / 2;
            self.entries[parent].precedes(&self.entries[child])
        })
    }

    fn grown_capacity(&self) -> usize {
        self.capacity.checked_mul(2).unwrap_or(usize::MAX)
    }

    fn set_capacity(&mut self, new_capacity: usize) {
        trace!(
            old = self.capacity,
            new = new_capacity,
            "growing priority queue storage"
        );
        self.capacity = new_capacity;
    }

    fn push_entry(&mut self, value: T, priority: f64) {
        // total_cmp puts sign-bit NaNs below -inf; every NaN is least urgent.
        let priority = if priority.is_nan() { f64::NAN } else { priority };
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(Entry {
            priority,
            sequence,
            value,
        });
        self.sift_up(self.entries.len() - 1);
    }

    fn pop_root(&mut self) -> Option<Entry<T>> {
        if self.entries.is_empty() {
            return None;
        }

        // The last entry takes the root slot and sinks back into place.
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(root)
    }

    /// Move the entry at `index` toward the root while it precedes its parent
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].precedes(&self.entries[parent]) {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move the entry at `index` toward the leaves while a child precedes it
    ///
    /// When both children exist the left one is chosen unless the right one
    /// strictly precedes it.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            let child = if right < len && self.entries[right].precedes(&self.entries[left]) {
                right
            } else {
                left
            };

            if self.entries[child].precedes(&self.entries[index]) {
                self.entries.swap(index, child);
                index = child;
            } else {
                break;
            }
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for PriorityQueue<T> {
    fn clone(&self) -> Self {
        let capacity = self.capacity.max(INITIAL_CAPACITY);
        let mut entries = Vec::with_capacity(capacity);
        entries.extend(self.entries.iter().cloned());
        Self {
            entries,
            capacity,
            next_sequence: self.next_sequence,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // Previous storage is released before the copy is made.
        self.entries = Vec::new();
        *self = source.clone();
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> Extend<(T, f64)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

impl<T> FromIterator<(T, f64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(queue: &mut PriorityQueue<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(value) = queue.dequeue() {
            out.push(value);
        }
        out
    }

    #[test]
    fn test_basic_operations() {
        let mut queue = PriorityQueue::new();

        assert!(queue.is_empty());
        assert_eq!(queue.size(), 0);

        queue.enqueue("three", 3.0);
        queue.enqueue("one", 1.0);
        queue.enqueue("two", 2.0);

        assert!(!queue.is_empty());
        assert_eq!(queue.size(), 3);
        assert_eq!(queue.peek(), Ok(&"one"));
        assert_eq!(queue.peek_priority(), Ok(1.0));

        assert_eq!(queue.dequeue(), Ok("one"));
        assert_eq!(queue.dequeue(), Ok("two"));
        assert_eq!(queue.dequeue(), Ok("three"));
        assert_eq!(
            queue.dequeue(),
            Err(QueueError::Empty {
                operation: Operation::Dequeue
            })
        );
    }

    #[test]
    fn test_equal_priorities_are_fifo() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("a", 5.0);
        queue.enqueue("b", 5.0);
        queue.enqueue("c", 5.0);

        assert_eq!(drain(&mut queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sift_up_stops_at_equal_parent() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("first", 2.0);
        queue.enqueue("second", 2.0);

        // The later entry must not rise above the root it ties with.
        assert_eq!(queue.peek(), Ok(&"first"));
        assert!(queue.is_valid_heap());
    }

    #[test]
    fn test_capacity_doubles() {
        let mut queue = PriorityQueue::new();
        assert_eq!(queue.capacity(), INITIAL_CAPACITY);

        for i in 0..INITIAL_CAPACITY {
            queue.enqueue(i, i as f64);
        }
        assert_eq!(queue.capacity(), INITIAL_CAPACITY);

        queue.enqueue(99, 99.0);
        assert_eq!(queue.capacity(), INITIAL_CAPACITY * 2);

        for i in 0..30 {
            queue.enqueue(i, i as f64);
        }
        assert_eq!(queue.size(), 41);
        assert_eq!(queue.capacity(), INITIAL_CAPACITY * 8);
    }

    #[test]
    fn test_with_capacity_has_floor() {
        let queue: PriorityQueue<()> = PriorityQueue::with_capacity(2);
        assert_eq!(queue.capacity(), INITIAL_CAPACITY);

        let queue: PriorityQueue<()> = PriorityQueue::with_capacity(64);
        assert_eq!(queue.capacity(), 64);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut queue = PriorityQueue::new();
        for i in 0..25 {
            queue.enqueue(i, 1.0);
        }
        let capacity = queue.capacity();

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), capacity);
        assert!(queue.peek().is_err());
    }

    #[test]
    fn test_try_enqueue_grows_like_enqueue() {
        let mut queue = PriorityQueue::new();
        for i in 0..=INITIAL_CAPACITY {
            queue.try_enqueue(i, -(i as f64)).unwrap();
        }
        assert_eq!(queue.capacity(), INITIAL_CAPACITY * 2);
        assert_eq!(queue.peek(), Ok(&INITIAL_CAPACITY));
    }

    #[test]
    fn test_sorted_is_non_destructive() {
        let queue: PriorityQueue<&str> = vec![("c", 3.0), ("a", 1.0), ("b", 2.0), ("a2", 1.0)]
            .into_iter()
            .collect();

        let sorted: Vec<&str> = queue.sorted().into_iter().map(|(_, v)| *v).collect();
        assert_eq!(sorted, vec!["a", "a2", "b", "c"]);
        assert_eq!(queue.size(), 4);
        assert_eq!(queue.peek(), Ok(&"a"));
    }

    #[test]
    fn test_into_sorted_vec() {
        let queue: PriorityQueue<i32> = vec![(1, 0.5), (2, -1.0), (3, 0.5)]
            .into_iter()
            .collect();
        assert_eq!(queue.into_sorted_vec(), vec![(-1.0, 2), (0.5, 1), (0.5, 3)]);
    }

    #[test]
    fn test_iter_visits_every_entry() {
        let mut queue = PriorityQueue::new();
        for i in 0..7 {
            queue.enqueue(i, (7 - i) as f64);
        }
        let mut seen: Vec<i32> = queue.iter().map(|(_, v)| *v).collect();
        seen.sort();
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_nan_sorts_after_infinity() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("nan", f64::NAN);
        queue.enqueue("inf", f64::INFINITY);
        queue.enqueue("neg", f64::NEG_INFINITY);

        assert_eq!(drain(&mut queue), vec!["neg", "inf", "nan"]);
    }

    #[test]
    fn test_negative_nan_sorts_after_infinity() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("neg_nan", -f64::NAN);
        queue.enqueue("inf", f64::INFINITY);
        queue.enqueue("neg_inf", f64::NEG_INFINITY);

        assert_eq!(queue.peek(), Ok(&"neg_inf"));
        assert_eq!(queue.peek_priority(), Ok(f64::NEG_INFINITY));
        assert_eq!(drain(&mut queue), vec!["neg_inf", "inf", "neg_nan"]);
    }

    #[test]
    fn test_ascending_insertion() {
        let mut queue = PriorityQueue::new();

        for i in 0..100 {
            queue.enqueue(i, i as f64);
        }

        for i in 0..100 {
            assert_eq!(queue.dequeue(), Ok(i));
        }
    }

    #[test]
    fn test_descending_insertion() {
        let mut queue = PriorityQueue::new();

        for i in (0..100).rev() {
            queue.enqueue(i, i as f64);
            assert!(queue.is_valid_heap());
        }

        for i in 0..100 {
            assert_eq!(queue.dequeue(), Ok(i));
        }
    }
}
