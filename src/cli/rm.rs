//! td rm command implementation

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::record::{Collection, TaskRecord};
use crate::store::Store;
use crate::tracker::Tracker;

pub struct RmOptions {
    pub id: u64,
    pub collection: String,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct RmReport {
    collection: Collection,
    id: u64,
    #[serde(flatten)]
    record: TaskRecord,
}

pub fn run(opts: RmOptions) -> Result<()> {
    let collection: Collection = opts.collection.parse()?;

    let config = Config::load_or_default(opts.config.as_deref())?;
    let store = Store::open(config.resolve_data_dir(opts.data_dir)?)?;
    let mut tracker = Tracker::open(store)?;

    super::validate_id(&tracker, collection, opts.id)?;

    let record = tracker.delete(collection, opts.id)?;

    let report = RmReport {
        collection,
        id: opts.id,
        record,
    };

    let mut human = HumanOutput::new(format!(
        "td rm: task {} removed from {collection}",
        opts.id
    ));
    human.push_summary("text", report.record.description.clone());
    human.push_detail(format!("remaining {collection} tasks were renumbered"));

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "rm",
        &report,
        Some(&human),
    )
}
