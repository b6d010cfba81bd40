//! Command-line wrapper: reads stdin line by line into a session.
//!
//! Responses go to stdout, logs to stderr (`RUST_LOG` controls verbosity).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use stepform::programs::{Gradebook, Inventory, Minigame};
use stepform::{Checkpoint, CheckpointError, Config, ConfigError, Program, Session};

/// Stepform: line-driven console programs.
#[derive(Debug, Parser)]
#[command(name = "stepform", version)]
struct Cli {
    /// Config file (TOML). Defaults to `<config dir>/stepform/config.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resume from a checkpoint written by `--save` instead of starting fresh.
    #[arg(long, global = true)]
    resume: Option<PathBuf>,

    /// Write a checkpoint here when input runs out or the session ends.
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inventory tracker: add, list, update and delete products.
    Inventory,

    /// Student grade manager: add students, list them, class statistics.
    Gradebook,

    /// Code-guessing minigame.
    Minigame {
        /// Seed for the secret code, for reproducible games.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Inventory => drive(Inventory::new(&config), cli),
        Command::Gradebook => drive(Gradebook::new(&config), cli),
        Command::Minigame { seed } => drive(Minigame::new(&config, seed), cli),
    }
}

fn drive<P>(program: P, cli: &Cli) -> Result<(), CliError>
where
    P: Program + Clone + Serialize + DeserializeOwned,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = match &cli.resume {
        Some(path) => {
            let session: Session<P> = Session::restore(Checkpoint::load(path)?)?;
            write!(out, "{}", session.program().prompt(session.current_step()))?;
            session
        }
        None => {
            let mut session = Session::new(program);
            write!(out, "{}", session.start_session())?;
            session
        }
    };
    out.flush()?;

    if session.is_alive() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            write!(out, "{}", session.submit_line(&line))?;
            out.flush()?;
            if !session.is_alive() {
                break;
            }
        }
    }

    if let Some(path) = &cli.save {
        session.checkpoint().save(path)?;
    }

    Ok(())
}
