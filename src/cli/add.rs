//! td add command implementation
//!
//! Adds a task to the uncompleted collection and stamps it with that
//! collection's next free id.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::record::{normalize_deadline, Collection, TaskRecord};
use crate::store::Store;
use crate::tracker::Tracker;

pub struct AddOptions {
    pub text: String,
    pub kind: Option<String>,
    pub deadline: Option<String>,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct AddReport {
    collection: Collection,
    id: u64,
    #[serde(flatten)]
    record: TaskRecord,
}

pub fn run(opts: AddOptions) -> Result<()> {
    let config = Config::load_or_default(opts.config.as_deref())?;

    let record = TaskRecord {
        kind: opts
            .kind
            .unwrap_or_else(|| config.tasks.default_kind.clone()),
        description: opts.text,
        deadline: opts
            .deadline
            .as_deref()
            .map(normalize_deadline)
            .transpose()?,
    };

    let store = Store::open(config.resolve_data_dir(opts.data_dir)?)?;
    let mut tracker = Tracker::open(store)?;
    let id = tracker.add(Collection::Uncompleted, &record)?;

    let report = AddReport {
        collection: Collection::Uncompleted,
        id,
        record,
    };

    let mut human = HumanOutput::new(format!("td add: task {id} added"));
    human.push_summary("id", id.to_string());
    human.push_summary("type", report.record.kind.clone());
    human.push_summary("text", report.record.description.clone());
    if let Some(deadline) = &report.record.deadline {
        human.push_summary("deadline", deadline.clone());
    }
    human.push_next_step("td list".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "add",
        &report,
        Some(&human),
    )
}
