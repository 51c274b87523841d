//! td list command implementation

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, render_task_table, OutputOptions};
use crate::record::{Collection, StoredTask};
use crate::store::Store;
use crate::tracker::Tracker;

pub struct ListOptions {
    pub collection: Option<String>,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct ListReport {
    collections: Vec<CollectionTasks>,
}

#[derive(serde::Serialize)]
struct CollectionTasks {
    collection: Collection,
    next_id: u64,
    tasks: Vec<StoredTask>,
}

pub fn run(opts: ListOptions) -> Result<()> {
    let config = Config::load_or_default(opts.config.as_deref())?;
    let store = Store::open(config.resolve_data_dir(opts.data_dir)?)?;
    let tracker = Tracker::open(store)?;

    let collections: Vec<Collection> = match opts.collection.as_deref() {
        Some(raw) => vec![raw.parse()?],
        None => Collection::ALL.to_vec(),
    };

    let mut report = ListReport {
        collections: Vec::new(),
    };
    let mut sections = Vec::new();
    for collection in collections {
        let tasks = tracker.list(collection)?;
        sections.push(render_task_table(collection, &tasks, &config.table));
        report.collections.push(CollectionTasks {
            collection,
            next_id: tracker.next_id(collection),
            tasks,
        });
    }

    if opts.json {
        return emit_success(
            OutputOptions {
                json: true,
                quiet: opts.quiet,
            },
            "list",
            &report,
            None,
        );
    }

    if !opts.quiet {
        for section in &sections {
            println!("{section}");
            println!();
        }
    }

    Ok(())
}
