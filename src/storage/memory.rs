//! In-process snapshot storage.
//!
//! Holds the last saved snapshot in memory and counts saves. It can be put
//! into a failing mode to exercise the store's best-effort durability.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::traits::Persistence;
use crate::error::{Result, TaskpadError};
use crate::store::TaskRecord;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Vec<TaskRecord>>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        Self {
            snapshot: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` and `load` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the last successfully saved snapshot.
    pub fn snapshot(&self) -> Vec<TaskRecord> {
        self.snapshot.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn check_failing(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TaskpadError::Storage("memory storage is in failing mode".to_string()));
        }
        Ok(())
    }
}

impl Persistence for MemoryStorage {
    fn save(&self, records: &[TaskRecord]) -> Result<()> {
        self.check_failing()?;
        let mut snapshot = self.snapshot.lock().map_err(|e| TaskpadError::Storage(e.to_string()))?;
        *snapshot = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self) -> Result<Vec<TaskRecord>> {
        self.check_failing()?;
        let snapshot = self.snapshot.lock().map_err(|e| TaskpadError::Storage(e.to_string()))?;
        Ok(snapshot.clone())
    }
}
