//! Identifier resequencing, the task repository, and the completion
//! move.
//!
//! The store has no native sequence: after any delete, density is
//! rebuilt by rescanning the whole collection and stamping 0..count-1
//! back onto every document. The tracker owns the per-collection
//! next-id counters; they are rebuilt from the store every time a
//! tracker opens, so stale state left by an interrupted run is
//! repaired before the first operation.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{fields, Collection, StoredTask, TaskRecord};
use crate::store::Store;

/// Task repository over both collections, with dense id maintenance.
#[derive(Debug)]
pub struct Tracker {
    store: Store,
    next_ids: [u64; 2],
}

impl Tracker {
    /// Open a tracker over the store, resequencing both collections so
    /// the id counters match what is actually on disk.
    pub fn open(store: Store) -> Result<Self> {
        let mut tracker = Self {
            store,
            next_ids: [0, 0],
        };
        for collection in Collection::ALL {
            tracker.resequence(collection)?;
        }
        Ok(tracker)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The id the next `add` to this collection would assign. Equals
    /// the collection's task count whenever ids are dense.
    pub fn next_id(&self, collection: Collection) -> u64 {
        self.next_ids[slot(collection)]
    }

    /// Reassign dense ids 0..count-1 to every document in the
    /// collection, in store key order, and return the new count.
    /// Every document is written, changed id or not.
    pub fn resequence(&mut self, collection: Collection) -> Result<u64> {
        let mut next = 0u64;
        for reference in self.store.list_references(collection)? {
            self.store.merge_fields(&reference, id_patch(next))?;
            next += 1;
        }
        self.next_ids[slot(collection)] = next;
        debug!(collection = %collection, count = next, "resequenced");
        Ok(next)
    }

    /// Insert a task and stamp it with the collection's next free id.
    /// No rescan: the new document takes the max+1 slot, so density
    /// holds as long as the counter was accurate going in.
    pub fn add(&mut self, collection: Collection, record: &TaskRecord) -> Result<u64> {
        let id = self.next_ids[slot(collection)];
        let (key, reference) = self.store.add_document(collection, record)?;
        self.store.merge_fields(&reference, id_patch(id))?;
        self.next_ids[slot(collection)] = id + 1;
        debug!(collection = %collection, id, key = %key, "added task");
        Ok(id)
    }

    /// Remove the task with the given id, resequence the collection,
    /// and return the removed task's content fields.
    pub fn delete(&mut self, collection: Collection, id: u64) -> Result<TaskRecord> {
        let needle = Value::from(id);
        let snapshot = self
            .store
            .stream_filtered(collection, fields::ID, &needle)?
            .into_iter()
            .next()
            .ok_or(Error::TaskNotFound { collection, id })?;
        let removed: StoredTask = snapshot.deserialize()?;
        self.store.delete_document(snapshot.reference())?;
        self.resequence(collection)?;
        debug!(collection = %collection, id, "deleted task");
        Ok(removed.record)
    }

    /// All tasks in the collection, ordered by id ascending. A
    /// snapshot of the collection, not a live view.
    pub fn list(&self, collection: Collection) -> Result<Vec<StoredTask>> {
        let mut tasks = Vec::new();
        for snapshot in self.store.stream_ordered(collection, fields::ID)? {
            tasks.push(snapshot.deserialize()?);
        }
        Ok(tasks)
    }

    /// Move a task from `uncompleted` to `completed`. Delete runs
    /// first so the task is never visible in both lists; if the add
    /// then fails, the task is in neither list and the error says so
    /// distinctly, because the operator has to re-add it by hand.
    pub fn complete(&mut self, id: u64) -> Result<()> {
        let record = self.delete(Collection::Uncompleted, id)?;
        self.add(Collection::Completed, &record)
            .map_err(|err| Error::PartialMigration {
                id,
                reason: err.to_string(),
            })?;
        debug!(id, "completed task");
        Ok(())
    }
}

fn slot(collection: Collection) -> usize {
    match collection {
        Collection::Uncompleted => 0,
        Collection::Completed => 1,
    }
}

fn id_patch(id: u64) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert(fields::ID.to_string(), Value::from(id));
    patch
}
