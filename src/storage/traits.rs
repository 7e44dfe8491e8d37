//! Persistence trait for task snapshots.

use crate::error::Result;
use crate::store::TaskRecord;

/// Durable snapshot boundary for the task store.
///
/// Implementations always write the complete sequence, never a diff.
pub trait Persistence: Send + Sync {
    /// Replace the persisted snapshot with `records`.
    fn save(&self, records: &[TaskRecord]) -> Result<()>;

    /// Read the last persisted snapshot. A missing snapshot is an empty one.
    fn load(&self) -> Result<Vec<TaskRecord>>;
}
