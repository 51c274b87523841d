//! Error types for td
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown task id, bad args, bad config)
//! - 3: Partial migration (task removed from uncompleted but not added
//!   to completed; it is in neither list and needs manual recovery)
//! - 4: Operation failed (store IO, corrupt document)

use thiserror::Error;

use crate::record::Collection;

/// Exit codes for the td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const RECONCILE_NEEDED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for td operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("task not found: no {collection} task with id {id}")]
    TaskNotFound { collection: Collection, id: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Partial migration (exit code 3)
    #[error("partial migration: task {id} was removed from uncompleted but could not be added to completed: {reason}")]
    PartialMigration { id: u64, reason: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::TaskNotFound { .. }
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Manual reconciliation needed
            Error::PartialMigration { .. } => exit_codes::RECONCILE_NEEDED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskNotFound { collection, id } => Some(serde_json::json!({
                "collection": collection.as_str(),
                "id": id,
            })),
            Error::PartialMigration { id, reason } => Some(serde_json::json!({
                "id": id,
                "reason": reason,
            })),
            _ => None,
        }
    }
}

/// Result type alias for td operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_taxonomy() {
        let not_found = Error::TaskNotFound {
            collection: Collection::Uncompleted,
            id: 5,
        };
        assert_eq!(not_found.exit_code(), exit_codes::USER_ERROR);

        let partial = Error::PartialMigration {
            id: 0,
            reason: "store offline".to_string(),
        };
        assert_eq!(partial.exit_code(), exit_codes::RECONCILE_NEEDED);

        let io = Error::Io(std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), exit_codes::OPERATION_FAILED);
    }

    #[test]
    fn not_found_carries_details() {
        let err = Error::TaskNotFound {
            collection: Collection::Completed,
            id: 2,
        };
        let details = err.details().expect("details");
        assert_eq!(details["collection"], "completed");
        assert_eq!(details["id"], 2);
    }
}
