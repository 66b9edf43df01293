//! Interactive priority queue shell.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use heap_priority_queue::command::{Session, HELP};
use heap_priority_queue::repl::Repl;
use heap_priority_queue::INITIAL_CAPACITY;

/// Exercise a heap-backed priority queue from the command line
#[derive(Parser, Debug)]
#[command(name = "pqueue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Capacity the queue starts with (raised to the minimum if smaller)
    #[arg(short = 'c', long, default_value_t = INITIAL_CAPACITY)]
    initial_capacity: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// File used to persist line-editor history
    #[arg(long, env = "PQUEUE_HISTORY")]
    history_file: Option<PathBuf>,

    /// Do not load or save line-editor history
    #[arg(long)]
    no_history: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let history = if cli.no_history {
        None
    } else {
        cli.history_file
    };

    println!("Priority queue shell. Commands:");
    println!("{HELP}");

    let session = Session::with_capacity(cli.initial_capacity);
    let result = Repl::new(session, history).and_then(|mut repl| repl.run());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
