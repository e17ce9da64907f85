//! Object Notes - Interactive Shell
//!
//! Explore objects with `cd`, annotate them with `note`.

use anyhow::Result;
use clap::Parser;
use object_notes::shell::{Outcome, Shell};
use object_notes::Config;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "object-notes")]
#[command(about = "Interactive shell for annotating classes and methods")]
struct Cli {
    /// Path to a YAML config file (default: ./object-notes.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default notes file for export/import (overrides config and NOTES_FILE)
    #[arg(long)]
    notes_file: Option<PathBuf>,

    /// Import the default notes file on startup
    #[arg(long)]
    load: bool,

    /// Run these lines instead of reading from stdin
    #[arg(short = 'e', long = "exec")]
    exec: Vec<String>,
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,object_notes=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;
    if let Some(path) = cli.notes_file {
        config.notes_file = Some(path);
    }

    let mut shell = Shell::from_config(&config);
    if cli.load {
        run_line(&mut shell, "note import");
    }

    if !cli.exec.is_empty() {
        for line in &cli.exec {
            if run_line(&mut shell, line) == Some(Outcome::Exit) {
                break;
            }
        }
        return Ok(());
    }

    run_repl(&mut shell)
}

/// Read-eval-print loop over stdin until EOF or `exit`.
fn run_repl(shell: &mut Shell) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", shell.prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        if run_line(shell, &line?) == Some(Outcome::Exit) {
            break;
        }
    }
    tracing::debug!(keys = shell.store().len(), "Session ended");
    Ok(())
}

/// Execute one line, printing its output or error.
fn run_line(shell: &mut Shell, line: &str) -> Option<Outcome> {
    match shell.execute(line) {
        Ok(outcome) => {
            if let Outcome::Output(text) = &outcome {
                println!("{}", text);
            }
            Some(outcome)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}
