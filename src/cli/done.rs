//! td done command implementation
//!
//! Moves a task from uncompleted to completed: delete from the source
//! collection first, then add to the destination.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::record::{Collection, TaskRecord};
use crate::store::Store;
use crate::tracker::Tracker;

pub struct DoneOptions {
    pub id: u64,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct DoneReport {
    id: u64,
    completed_id: u64,
    #[serde(flatten)]
    record: TaskRecord,
}

pub fn run(opts: DoneOptions) -> Result<()> {
    let config = Config::load_or_default(opts.config.as_deref())?;
    let store = Store::open(config.resolve_data_dir(opts.data_dir)?)?;
    let mut tracker = Tracker::open(store)?;

    super::validate_id(&tracker, Collection::Uncompleted, opts.id)?;

    // Capture the content fields for the report before the ids shift.
    let record = tracker
        .list(Collection::Uncompleted)?
        .into_iter()
        .find(|task| task.identifier == opts.id)
        .map(|task| task.record)
        .ok_or(Error::TaskNotFound {
            collection: Collection::Uncompleted,
            id: opts.id,
        })?;

    let completed_id = tracker.next_id(Collection::Completed);
    tracker.complete(opts.id)?;

    let report = DoneReport {
        id: opts.id,
        completed_id,
        record,
    };

    let mut human = HumanOutput::new(format!("td done: task {} completed", opts.id));
    human.push_summary("text", report.record.description.clone());
    human.push_summary("completed id", report.completed_id.to_string());
    human.push_detail("remaining uncompleted tasks were renumbered".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "done",
        &report,
        Some(&human),
    )
}
