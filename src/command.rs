//! Command language for driving a priority queue interactively
//!
//! [`Command::parse`] turns one input line into a [`Command`], and a
//! [`Session`] executes commands against a `PriorityQueue<String>` through its
//! public API only, producing the text a front end should print.
//!
//! ```rust
//! use heap_priority_queue::command::{Command, Reply, Session};
//!
//! let mut session = Session::new();
//! session.execute(Command::parse("enqueue b 2").unwrap());
//! session.execute(Command::parse("enqueue a 1").unwrap());
//!
//! assert_eq!(
//!     session.execute(Command::parse("list").unwrap()),
//!     Reply::Text("Queue: a b".to_string())
//! );
//! assert_eq!(session.queue().size(), 2);
//! ```

use thiserror::Error;
use tracing::debug;

use crate::error::QueueError;
use crate::pqueue::PriorityQueue;

/// Help text listing every command
pub const HELP: &str = "\
enqueue value priority -- Enqueues value at priority
dequeue -- Dequeues the most urgent item
peek -- Peeks at the first item without removing it
peekPriority -- Reports the priority of the first item
clear -- Clears the queue
size -- Reports the size of the queue
isEmpty -- Reports whether the queue is empty
list -- Lists the elements of the queue
help -- Prints this message
quit -- Leaves the program";

/// Message printed when a command needs an entry and the queue has none
pub const EMPTY_MESSAGE: &str = "The queue is empty";

/// A parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a value at a priority
    Enqueue { value: String, priority: f64 },
    /// Remove and print the most urgent value
    Dequeue,
    /// Print the most urgent value
    Peek,
    /// Print the most urgent priority
    PeekPriority,
    /// Print every value in dequeue order
    List,
    /// Print the number of entries
    Size,
    /// Print whether the queue is empty
    IsEmpty,
    /// Remove every entry
    Clear,
    /// Print the help text
    Help,
    /// Leave the program
    Quit,
    /// Blank input
    Nothing,
}

/// Errors produced while parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("Undefined command: {0}")]
    Undefined(String),

    /// `enqueue` was not followed by exactly a value and a priority
    #[error("Illegal enqueue format. Type \"help\" to view the correct format.")]
    IllegalEnqueue,

    /// The priority could not be read as a number
    #[error("Illegal priority '{0}': expected a number")]
    InvalidPriority(String),

    /// A command that takes no arguments was given some
    #[error("{0} takes no arguments")]
    UnexpectedArguments(String),
}

impl Command {
    /// Parses a single input line
    ///
    /// Command words are matched case-insensitively; the value of an
    /// `enqueue` is kept verbatim.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut words = input.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Command::Nothing);
        };
        let rest: Vec<&str> = words.collect();

        let command = match word.to_lowercase().as_str() {
            "enqueue" => {
                let [value, priority] = rest.as_slice() else {
                    return Err(CommandError::IllegalEnqueue);
                };
                let priority = priority
                    .parse::<f64>()
                    .map_err(|_| CommandError::InvalidPriority(priority.to_string()))?;
                return Ok(Command::Enqueue {
                    value: value.to_string(),
                    priority,
                });
            }
            "dequeue" => Command::Dequeue,
            "peek" => Command::Peek,
            "peekpriority" => Command::PeekPriority,
            "list" => Command::List,
            "size" => Command::Size,
            "isempty" => Command::IsEmpty,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Undefined(input.trim().to_string())),
        };

        if !rest.is_empty() {
            return Err(CommandError::UnexpectedArguments(word.to_string()));
        }
        Ok(command)
    }
}

/// What a front end should do after a command ran
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Print this text
    Text(String),
    /// Print nothing
    Silent,
    /// Leave the loop
    Quit,
}

/// A priority queue of strings driven by [`Command`]s
#[derive(Debug, Clone, Default)]
pub struct Session {
    queue: PriorityQueue<String>,
}

impl Session {
    /// Creates a session around an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose queue starts with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: PriorityQueue::with_capacity(capacity),
        }
    }

    /// The queue this session drives
    pub fn queue(&self) -> &PriorityQueue<String> {
        &self.queue
    }

    /// Runs one command against the queue
    pub fn execute(&mut self, command: Command) -> Reply {
        debug!(?command, "executing command");
        let result = match command {
            Command::Enqueue { value, priority } => {
                self.queue.enqueue(value, priority);
                return Reply::Silent;
            }
            Command::Dequeue => self.queue.dequeue(),
            Command::Peek => self.queue.peek().cloned(),
            Command::PeekPriority => self.queue.peek_priority().map(|p| p.to_string()),
            Command::List => self.list(),
            Command::Size => Ok(self.queue.size().to_string()),
            Command::IsEmpty => Ok(self.queue.is_empty().to_string()),
            Command::Clear => {
                self.queue.clear();
                return Reply::Silent;
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => return Reply::Quit,
            Command::Nothing => return Reply::Silent,
        };

        match result {
            Ok(text) => Reply::Text(text),
            Err(err) if err.is_empty_queue() => Reply::Text(EMPTY_MESSAGE.to_string()),
            Err(err) => Reply::Text(format!("Error: {err}")),
        }
    }

    fn list(&self) -> Result<String, QueueError> {
        // Reuse the core's empty-queue error so "list" reports it like "peek".
        self.queue.peek()?;
        let values: Vec<&str> = self
            .queue
            .sorted()
            .into_iter()
            .map(|(_, value)| value.as_str())
            .collect();
        Ok(format!("Queue: {}", values.join(" ")))
    }
}
