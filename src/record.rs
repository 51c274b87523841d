//! Task records and collections.
//!
//! A task lives in exactly one of two collections, `uncompleted` or
//! `completed`, and carries a dense, zero-based, collection-local id.
//! The id is display data: it is rebuilt after every delete and must
//! never be persisted across a mutating operation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wire names of the persisted document fields.
pub mod fields {
    pub const ID: &str = "id";
    pub const TYPE: &str = "type";
    pub const TEXT: &str = "text";
    pub const DEADLINE: &str = "deadline";
}

/// Stored deadline format, e.g. "Jan 05, 2025".
pub const DEADLINE_FORMAT: &str = "%b %d, %Y";

/// Content fields of a task. These travel byte-for-byte when a task
/// moves between collections; only the id changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Free-text category label, e.g. "Work" or "Personal"
    #[serde(rename = "type")]
    pub kind: String,

    /// Task body
    #[serde(rename = "text")]
    pub description: String,

    /// Formatted date string; absent means no deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// A task as persisted: the collection-local id plus the content
/// fields. Documents carry exactly these fields and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTask {
    #[serde(rename = "id")]
    pub identifier: u64,

    #[serde(flatten)]
    pub record: TaskRecord,
}

/// The two task collections. Ids are unique and dense within a
/// collection, not across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Uncompleted,
    Completed,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Uncompleted, Collection::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Uncompleted => "uncompleted",
            Collection::Completed => "completed",
        }
    }

    /// Capitalized name for table headings.
    pub fn title(&self) -> &'static str {
        match self {
            Collection::Uncompleted => "Uncompleted",
            Collection::Completed => "Completed",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "uncompleted" => Ok(Collection::Uncompleted),
            "completed" => Ok(Collection::Completed),
            _ => Err(Error::InvalidArgument(format!(
                "invalid collection '{}': must be uncompleted or completed",
                s
            ))),
        }
    }
}

/// Normalize a user-supplied deadline to the stored display form.
/// Accepts ISO dates and the stored form itself.
pub fn normalize_deadline(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument("deadline cannot be empty".to_string()));
    }
    for format in ["%Y-%m-%d", DEADLINE_FORMAT] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format(DEADLINE_FORMAT).to_string());
        }
    }
    Err(Error::InvalidArgument(format!(
        "invalid deadline '{trimmed}' (expected YYYY-MM-DD or e.g. \"Jan 05, 2025\")"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_task_uses_wire_field_names() {
        let task = StoredTask {
            identifier: 3,
            record: TaskRecord {
                kind: "Work".to_string(),
                description: "Ship report".to_string(),
                deadline: Some("Jan 05, 2025".to_string()),
            },
        };
        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(json[fields::ID], 3);
        assert_eq!(json[fields::TYPE], "Work");
        assert_eq!(json[fields::TEXT], "Ship report");
        assert_eq!(json[fields::DEADLINE], "Jan 05, 2025");
    }

    #[test]
    fn absent_deadline_is_omitted() {
        let record = TaskRecord {
            kind: "Personal".to_string(),
            description: "Wash laundry".to_string(),
            deadline: None,
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get(fields::DEADLINE).is_none());
    }

    #[test]
    fn normalize_deadline_accepts_iso_and_stored_forms() {
        assert_eq!(normalize_deadline("2025-01-05").expect("iso"), "Jan 05, 2025");
        assert_eq!(
            normalize_deadline("Jan 05, 2025").expect("stored"),
            "Jan 05, 2025"
        );
    }

    #[test]
    fn normalize_deadline_rejects_garbage() {
        let err = normalize_deadline("next tuesday").expect_err("invalid");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn collection_parses_case_insensitively() {
        assert_eq!(
            "Uncompleted".parse::<Collection>().expect("parse"),
            Collection::Uncompleted
        );
        assert_eq!(
            "completed".parse::<Collection>().expect("parse"),
            Collection::Completed
        );
        assert!("done".parse::<Collection>().is_err());
    }
}
