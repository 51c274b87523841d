//! td - terminal task tracker library
//!
//! This library provides the core functionality for the td CLI tool:
//! a small task list split across two collections, uncompleted and
//! completed, persisted as one JSON document per task.
//!
//! # Core Concepts
//!
//! - **Collections**: `uncompleted` and `completed`, each a directory of
//!   JSON documents
//! - **Dense ids**: every collection numbers its tasks 0..N-1 with no
//!   gaps; removals renumber the survivors in place
//! - **Completion**: moving a task between collections, delete first,
//!   then add
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `td.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output rendering
//! - `record`: Task wire format and collection names
//! - `store`: Document store backed by the filesystem
//! - `tracker`: Id assignment, resequencing, and task operations

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
