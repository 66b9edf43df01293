//! Interactive read-eval-print loop over a [`Session`]

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::{debug, warn};

use crate::command::{Command, Reply, Session};

/// Line-editing front end for a [`Session`]
pub struct Repl {
    editor: DefaultEditor,
    session: Session,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Creates a REPL around `session`, loading history from `history_path` if given.
    pub fn new(session: Session, history_path: Option<PathBuf>) -> RlResult<Self> {
        let mut editor = DefaultEditor::new()?;

        if let Some(path) = &history_path {
            if path.exists() {
                if let Err(err) = editor.load_history(path) {
                    warn!(path = %path.display(), %err, "could not load history");
                }
            }
        }

        Ok(Self {
            editor,
            session,
            history_path,
        })
    }

    /// Runs the loop until `quit` or end of input.
    pub fn run(&mut self) -> RlResult<()> {
        loop {
            match self.editor.readline("> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                    }

                    let command = match Command::parse(&line) {
                        Ok(command) => command,
                        Err(err) => {
                            println!("{err}");
                            continue;
                        }
                    };

                    match self.session.execute(command) {
                        Reply::Text(text) => println!("{text}"),
                        Reply::Silent => {}
                        Reply::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C abandons the current line only.
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        if let Some(path) = &self.history_path {
            if let Err(err) = self.editor.save_history(path) {
                warn!(path = %path.display(), %err, "could not save history");
            }
        }
        debug!(remaining = self.session.queue().size(), "leaving repl");
        Ok(())
    }
}
