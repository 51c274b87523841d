//! File-backed document store.
//!
//! Persists each collection as a directory of JSON documents:
//!
//! ```text
//! <data dir>/
//!   uncompleted/
//!     <ulid>.json           # one task document per file
//!   completed/
//!     <ulid>.json
//! ```
//!
//! Document keys are ULIDs, so lexicographic key order is creation
//! order; `list_references` always enumerates in that order, which is
//! the stable order the resequencer relies on. Merge writes update
//! only the given fields and leave the rest of the document untouched.
//! Streams are collected snapshots of the collection, not live views.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use ulid::Ulid;

use crate::error::{Error, Result};
use crate::record::Collection;

/// Handle to a single document within a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    collection: Collection,
    key: String,
}

impl DocumentRef {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// A document's fields as read at one point in time, plus the handle
/// they were read through.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    reference: DocumentRef,
    fields: Map<String, Value>,
}

impl DocumentSnapshot {
    pub fn reference(&self) -> &DocumentRef {
        &self.reference
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

/// Store manager rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store, creating the collection directories if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { root: root.into() };
        for collection in Collection::ALL {
            fs::create_dir_all(store.collection_dir(collection))?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    fn document_path(&self, reference: &DocumentRef) -> PathBuf {
        self.collection_dir(reference.collection)
            .join(format!("{}.json", reference.key))
    }

    /// References to every document in the collection, in key order.
    pub fn list_references(&self, collection: Collection) -> Result<Vec<DocumentRef>> {
        let dir = self.collection_dir(collection);
        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(key) = name.strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys
            .into_iter()
            .map(|key| DocumentRef { collection, key })
            .collect())
    }

    /// Insert a new document with a generated key. Returns the key and
    /// a handle to the document.
    pub fn add_document<T: Serialize>(
        &self,
        collection: Collection,
        fields: &T,
    ) -> Result<(String, DocumentRef)> {
        let value = serde_json::to_value(fields)?;
        let Value::Object(map) = value else {
            return Err(Error::InvalidArgument(
                "document fields must serialize to an object".to_string(),
            ));
        };
        let key = Ulid::new().to_string();
        let reference = DocumentRef {
            collection,
            key: key.clone(),
        };
        self.write_document(&reference, &map)?;
        Ok((key, reference))
    }

    /// Merge fields into an existing document. Fields not named in the
    /// patch are left untouched.
    pub fn merge_fields(&self, reference: &DocumentRef, patch: Map<String, Value>) -> Result<()> {
        let mut current = self.read_document(reference)?;
        for (name, value) in patch {
            current.insert(name, value);
        }
        self.write_document(reference, &current)
    }

    pub fn delete_document(&self, reference: &DocumentRef) -> Result<()> {
        fs::remove_file(self.document_path(reference))?;
        Ok(())
    }

    /// Snapshots of documents whose `field` equals `value`.
    pub fn stream_filtered(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<DocumentSnapshot>> {
        let mut matches = Vec::new();
        for snapshot in self.stream_all(collection)? {
            if snapshot.fields.get(field) == Some(value) {
                matches.push(snapshot);
            }
        }
        Ok(matches)
    }

    /// Snapshots of every document, ascending by the numeric
    /// `order_field`. Documents missing the field sort last.
    pub fn stream_ordered(
        &self,
        collection: Collection,
        order_field: &str,
    ) -> Result<Vec<DocumentSnapshot>> {
        let mut snapshots = self.stream_all(collection)?;
        snapshots.sort_by_key(|snapshot| {
            snapshot
                .fields
                .get(order_field)
                .and_then(Value::as_u64)
                .unwrap_or(u64::MAX)
        });
        Ok(snapshots)
    }

    fn stream_all(&self, collection: Collection) -> Result<Vec<DocumentSnapshot>> {
        let mut snapshots = Vec::new();
        for reference in self.list_references(collection)? {
            let fields = self.read_document(&reference)?;
            snapshots.push(DocumentSnapshot { reference, fields });
        }
        Ok(snapshots)
    }

    fn read_document(&self, reference: &DocumentRef) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(self.document_path(reference))?;
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::OperationFailed(format!(
                "document {} is not a JSON object",
                reference.key
            ))),
        }
    }

    fn write_document(&self, reference: &DocumentRef, fields: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string_pretty(fields)?;
        write_atomic(&self.document_path(reference), json.as_bytes())
    }
}

/// Write data atomically using temp file + rename, so a reader never
/// sees a partially written document.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, Store) {
        let temp = TempDir::new().expect("tempdir");
        let store = Store::open(temp.path()).expect("open store");
        (temp, store)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn open_creates_collection_dirs() {
        let (_temp, store) = test_store();
        assert!(store.collection_dir(Collection::Uncompleted).is_dir());
        assert!(store.collection_dir(Collection::Completed).is_dir());
    }

    #[test]
    fn references_come_back_in_key_order() {
        let (_temp, store) = test_store();
        let mut keys = Vec::new();
        for text in ["first", "second", "third"] {
            let (key, _) = store
                .add_document(Collection::Uncompleted, &json!({ "text": text }))
                .expect("add");
            keys.push(key);
        }

        let references = store
            .list_references(Collection::Uncompleted)
            .expect("list");
        let listed: Vec<&str> = references.iter().map(|r| r.key()).collect();
        assert_eq!(listed, keys.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn merge_preserves_untouched_fields() {
        let (_temp, store) = test_store();
        let (_, reference) = store
            .add_document(
                Collection::Uncompleted,
                &json!({ "type": "Work", "text": "Ship report" }),
            )
            .expect("add");

        store
            .merge_fields(&reference, object(json!({ "id": 4 })))
            .expect("merge");

        let snapshots = store
            .stream_filtered(Collection::Uncompleted, "id", &json!(4))
            .expect("filter");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].fields()["type"], "Work");
        assert_eq!(snapshots[0].fields()["text"], "Ship report");
    }

    #[test]
    fn filtered_stream_matches_on_equality() {
        let (_temp, store) = test_store();
        for id in 0..3u64 {
            let (_, reference) = store
                .add_document(Collection::Completed, &json!({ "text": format!("t{id}") }))
                .expect("add");
            store
                .merge_fields(&reference, object(json!({ "id": id })))
                .expect("merge");
        }

        let matches = store
            .stream_filtered(Collection::Completed, "id", &json!(1))
            .expect("filter");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].fields()["text"], "t1");

        let none = store
            .stream_filtered(Collection::Completed, "id", &json!(9))
            .expect("filter");
        assert!(none.is_empty());
    }

    #[test]
    fn ordered_stream_sorts_by_field() {
        let (_temp, store) = test_store();
        // Insert with ids deliberately out of key order.
        for id in [2u64, 0, 1] {
            let (_, reference) = store
                .add_document(Collection::Uncompleted, &json!({ "text": format!("t{id}") }))
                .expect("add");
            store
                .merge_fields(&reference, object(json!({ "id": id })))
                .expect("merge");
        }

        let snapshots = store
            .stream_ordered(Collection::Uncompleted, "id")
            .expect("order");
        let ids: Vec<u64> = snapshots
            .iter()
            .map(|s| s.fields()["id"].as_u64().expect("id"))
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn delete_removes_the_document() {
        let (_temp, store) = test_store();
        let (_, reference) = store
            .add_document(Collection::Uncompleted, &json!({ "text": "gone" }))
            .expect("add");

        store.delete_document(&reference).expect("delete");
        assert!(store
            .list_references(Collection::Uncompleted)
            .expect("list")
            .is_empty());
    }
}
