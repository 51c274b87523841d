//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::error::{Error, Result};
use crate::record::Collection;
use crate::tracker::Tracker;

mod add;
mod done;
mod list;
mod rm;

/// td - terminal task tracker
///
/// Tracks tasks in two collections, uncompleted and completed, with
/// dense numeric ids. Completing a task moves it between collections.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory for the task store
    #[arg(long, global = true, env = "TD_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "TD_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks (both collections by default)
    List {
        /// Only list one collection: uncompleted or completed
        #[arg(long)]
        collection: Option<String>,
    },

    /// Add a task to the uncompleted collection
    Add {
        /// Task text
        text: String,

        /// Category label, e.g. "Work" or "Personal"
        #[arg(long)]
        kind: Option<String>,

        /// Deadline (YYYY-MM-DD or e.g. "Jan 05, 2025")
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Complete a task: move it from uncompleted to completed
    Done {
        /// Id of the uncompleted task
        id: u64,
    },

    /// Remove a task
    Rm {
        /// Id of the task
        id: u64,

        /// Collection to remove from: uncompleted or completed
        #[arg(long, default_value = "completed")]
        collection: String,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::List { collection } => list::run(list::ListOptions {
                collection,
                config: self.config,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Add {
                text,
                kind,
                deadline,
            } => add::run(add::AddOptions {
                text,
                kind,
                deadline,
                config: self.config,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Done { id } => done::run(done::DoneOptions {
                id,
                config: self.config,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id, collection } => rm::run(rm::RmOptions {
                id,
                collection,
                config: self.config,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}

/// Range-check an id against the collection's next-id counter before
/// handing it to the tracker.
fn validate_id(tracker: &Tracker, collection: Collection, id: u64) -> Result<()> {
    let next = tracker.next_id(collection);
    if next == 0 {
        return Err(Error::InvalidArgument(format!("no {collection} tasks")));
    }
    if id >= next {
        return Err(Error::InvalidArgument(format!(
            "invalid task id {id}: {collection} ids run 0..{}",
            next - 1
        )));
    }
    Ok(())
}
