//! Task record type for TaskStore persistence.
//!
//! The same shape is written to the tasks file and returned from `/list`,
//! so the serde field names (`ID`, `Task`, `Done`) are part of the wire format.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskpadError};

/// A single task held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRecord {
    /// Store-assigned identifier, strictly positive and never reused
    #[serde(rename = "ID")]
    pub id: u64,

    /// Caller-supplied description, fixed at creation
    #[serde(rename = "Task")]
    pub task: String,

    /// Completion flag, flipped by toggle
    #[serde(rename = "Done")]
    pub done: bool,
}

impl TaskRecord {
    /// Create a new, not-yet-done record.
    pub fn new(id: u64, task: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
            done: false,
        }
    }
}

/// Reject descriptions that are empty or only whitespace.
///
/// Accepted text is stored verbatim.
pub fn validate_description(task: &str) -> Result<()> {
    if task.trim().is_empty() {
        return Err(TaskpadError::InvalidInput("task description is empty".to_string()));
    }
    Ok(())
}
