//! TaskStore implementation: in-memory task list with snapshot persistence.
//!
//! The in-memory list is authoritative. Every operation takes the same lock
//! for its whole body, and the mutators write a full snapshot through the
//! [`Persistence`] adapter before releasing it, so a reader never sees a
//! half-applied mutation and the file always matches the last commit.
//!
//! Persistence failures are logged and swallowed: the running process keeps
//! serving from memory and the next successful save reconciles the file.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::error::{Result, TaskpadError};
use crate::storage::Persistence;
use crate::store::records::{TaskRecord, validate_description};

/// State guarded by the store lock.
#[derive(Debug)]
struct StoreState {
    /// Insertion-ordered records, unique by id
    records: Vec<TaskRecord>,

    /// Next id to hand out; always greater than every id in `records`
    next_id: u64,
}

/// TaskStore manages task records and keeps the persisted snapshot current.
pub struct TaskStore {
    state: Mutex<StoreState>,
    persistence: Box<dyn Persistence>,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore").finish_non_exhaustive()
    }
}

impl TaskStore {
    /// Open a store from the adapter's last snapshot.
    ///
    /// An absent, unreadable or inconsistent snapshot yields an empty store.
    /// The id counter restarts at one past the largest loaded id.
    pub fn open(persistence: impl Persistence + 'static) -> Self {
        let loaded = persistence
            .load()
            .and_then(|records| check_snapshot(&records).map(|next_id| (records, next_id)));

        let (records, next_id) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Failed to load task snapshot, starting empty: {}", e);
                (Vec::new(), 1)
            }
        };

        info!("Opened task store with {} tasks (next id {})", records.len(), next_id);

        Self {
            state: Mutex::new(StoreState { records, next_id }),
            persistence: Box::new(persistence),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| TaskpadError::Storage(e.to_string()))
    }

    /// Write the snapshot while the caller still holds the lock.
    fn persist(&self, state: &StoreState) {
        if let Err(e) = self.persistence.save(&state.records) {
            warn!("Failed to persist {} tasks: {}", state.records.len(), e);
        }
    }

    /// Create a new task and persist the snapshot.
    ///
    /// Fails with `InvalidInput` on an empty or whitespace-only description,
    /// in which case neither the list nor the id counter changes.
    pub fn create(&self, task: &str) -> Result<TaskRecord> {
        validate_description(task)?;

        let mut state = self.lock()?;
        let Some(next_id) = state.next_id.checked_add(1) else {
            return Err(TaskpadError::Storage("task ids exhausted".to_string()));
        };
        let record = TaskRecord::new(state.next_id, task);
        state.next_id = next_id;
        state.records.push(record.clone());
        self.persist(&state);

        info!("Created task {}", record.id);
        Ok(record)
    }

    /// Delete the task with `id`. Returns whether a task was removed.
    ///
    /// A missing id is a no-op and does not touch the snapshot.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut state = self.lock()?;
        let Some(index) = state.records.iter().position(|r| r.id == id) else {
            debug!("Delete of unknown task {} ignored", id);
            return Ok(false);
        };

        state.records.remove(index);
        self.persist(&state);

        info!("Deleted task {}", id);
        Ok(true)
    }

    /// Flip the done flag of the task with `id`. Returns whether a task changed.
    ///
    /// A missing id is a no-op and does not touch the snapshot.
    pub fn toggle(&self, id: u64) -> Result<bool> {
        let mut state = self.lock()?;
        let Some(record) = state.records.iter_mut().find(|r| r.id == id) else {
            debug!("Toggle of unknown task {} ignored", id);
            return Ok(false);
        };

        record.done = !record.done;
        let done = record.done;
        self.persist(&state);

        info!("Toggled task {} (done={})", id, done);
        Ok(true)
    }

    /// Snapshot copy of all tasks in insertion order.
    pub fn list(&self) -> Result<Vec<TaskRecord>> {
        Ok(self.lock()?.records.clone())
    }

    /// Number of tasks currently held.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.records.len())
    }

    /// Whether the store holds no tasks.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> Result<u64> {
        Ok(self.lock()?.next_id)
    }
}

/// Check a loaded snapshot and compute the next id to hand out.
///
/// Ids must be non-zero and unique, and the largest must leave room for one more.
fn check_snapshot(records: &[TaskRecord]) -> Result<u64> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.id == 0 {
            return Err(TaskpadError::Storage("snapshot contains task id 0".to_string()));
        }
        if !seen.insert(record.id) {
            return Err(TaskpadError::Storage(format!("snapshot contains duplicate task id {}", record.id)));
        }
    }

    match records.iter().map(|r| r.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| TaskpadError::Storage(format!("snapshot task id {} leaves no room for new ids", max))),
    }
}
