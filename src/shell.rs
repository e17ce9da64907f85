//! Interactive shell - line tokenizing and command dispatch
//!
//! Lines starting with `note` are parsed with clap and handed to
//! [`NoteOperations`]; the remaining commands drive the [`Session`].

use crate::commands::{DeleteTarget, NoteOperations};
use crate::notes::NoteStore;
use crate::resolver::Target;
use crate::session::Session;
use crate::Config;
use anyhow::{anyhow, bail, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Grammar of the `note` command.
#[derive(Parser, Debug)]
#[command(name = "note")]
#[command(about = "Attach notes to classes, modules and methods")]
struct NoteCli {
    #[command(subcommand)]
    command: NoteCommand,
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    /// Add a note to a class or method (defaults to the current frame)
    Add {
        /// Class, `Class#method`, or expression
        target: Option<String>,

        /// Note content; opens the editor when omitted
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Delete one note (`target:N`), all notes of a target, or everything
    Delete {
        /// Class, `Class#method`, or expression, optionally with `:N`
        target: Option<String>,

        /// Delete every note for every target
        #[arg(long, conflicts_with = "target")]
        all: bool,
    },

    /// Replace a note (`target:N`)
    Edit {
        /// Target with a note number, e.g. `Parser#advance:2` or `:2`
        target: Option<String>,

        /// New content; opens the editor on the current text when omitted
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show the notes of a target
    Show {
        target: Option<String>,
    },

    /// List every annotated target
    List,

    /// Write all notes to a YAML file
    Export {
        /// Destination (defaults to the configured notes file)
        path: Option<PathBuf>,
    },

    /// Replace all notes with the contents of a YAML file
    Import {
        /// Source (defaults to the configured notes file)
        path: Option<PathBuf>,
    },
}

/// Result of one shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print
    Output(String),
    /// Nothing to print
    Quiet,
    /// The user asked to leave
    Exit,
}

/// One interactive session: host state, notes, and operations.
pub struct Shell {
    session: Session,
    store: NoteStore,
    operations: NoteOperations,
}

impl Shell {
    pub fn new(operations: NoteOperations) -> Self {
        Self {
            session: Session::new(),
            store: NoteStore::new(),
            operations,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(NoteOperations::from_config(config))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn prompt(&self) -> String {
        format!("[{}] notes({})> ", self.session.depth(), self.session.location())
    }

    /// Run one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let words = split_words(line)?;
        let Some(command) = words.first() else {
            return Ok(Outcome::Quiet);
        };

        match command.as_str() {
            "note" => self.run_note(&words),
            "cd" => self.run_cd(&words[1..]),
            "let" => self.run_let(&words[1..]),
            "whereami" => Ok(Outcome::Output(self.session.location())),
            "help" => Ok(Outcome::Output(HELP.to_string())),
            "exit" | "quit" => Ok(Outcome::Exit),
            other => bail!("Unknown command '{}'. Type 'help' for a list.", other),
        }
    }

    fn run_note(&mut self, words: &[String]) -> Result<Outcome> {
        let cli = match NoteCli::try_parse_from(words) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                return Ok(Outcome::Output(e.to_string().trim_end().to_string()));
            }
            Err(e) => return Err(anyhow!(e.to_string().trim_end().to_string())),
        };

        let ops = &self.operations;
        let store = &mut self.store;
        let context = &self.session;
        let message = match cli.command {
            NoteCommand::Add { target, message } => {
                ops.add(store, context, Target::from_arg(target.as_deref()), message)?
            }
            NoteCommand::Delete { target, all } => {
                let target = if all {
                    DeleteTarget::All
                } else {
                    DeleteTarget::Target(Target::from_arg(target.as_deref()))
                };
                ops.delete(store, context, target)?
            }
            NoteCommand::Edit { target, message } => {
                ops.edit(store, context, Target::from_arg(target.as_deref()), message)?
            }
            NoteCommand::Show { target } => {
                ops.show(store, context, Target::from_arg(target.as_deref()))?
            }
            NoteCommand::List => ops.list(store),
            NoteCommand::Export { path } => ops.export(store, path.as_deref())?,
            NoteCommand::Import { path } => ops.import(store, path.as_deref())?,
        };
        Ok(Outcome::Output(message))
    }

    fn run_cd(&mut self, args: &[String]) -> Result<Outcome> {
        let target = args.join(" ");
        match target.as_str() {
            ".." => {
                self.session.leave();
            }
            "" | "/" => self.session.reset(),
            expr => {
                let frame = self
                    .session
                    .frame_for(expr)
                    .ok_or_else(|| anyhow!("Cannot cd into '{}'", expr))?;
                self.session.enter(frame);
            }
        }
        Ok(Outcome::Quiet)
    }

    fn run_let(&mut self, args: &[String]) -> Result<Outcome> {
        let (name, expr) = match args {
            [name, eq, rest @ ..] if eq == "=" && !rest.is_empty() => (name, rest.join(" ")),
            _ => bail!("Usage: let <name> = <expression>"),
        };
        let value = self
            .session
            .evaluate_expr(&expr)
            .ok_or_else(|| anyhow!("Cannot evaluate '{}'", expr))?;
        self.session.bind(name.clone(), value);
        Ok(Outcome::Quiet)
    }
}

const HELP: &str = "\
Commands:
  note add [<target>] [-m <content>]      add a note (editor when -m is omitted)
  note delete [<target>[:N]] | --all      delete one note, a target's notes, or all
  note edit <target>:N [-m <content>]     replace a note
  note show [<target>]                    show a target's notes
  note list                               list annotated targets
  note export [<path>]                    write notes to YAML
  note import [<path>]                    load notes from YAML
  cd <expr> | cd <Class#method> | cd ..   move between frames
  let <name> = <expr>                     bind a value, e.g. let obj = Point.new
  whereami                                show the current frame
  exit";

/// Split a line into words, honoring single quotes, double quotes and
/// backslash escapes.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('"'), '"') => quote = None,
            (Some('"'), '\\') | (None, '\\') => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => bail!("Trailing backslash"),
            },
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
