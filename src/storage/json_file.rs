//! JSON-file snapshot storage.
//!
//! The whole task list lives in one file as a JSON array. Every save rewrites
//! the file through a `.tmp` sibling and a rename, so `load` only ever sees a
//! complete snapshot.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::traits::Persistence;
use crate::error::Result;
use crate::store::TaskRecord;

/// Snapshot storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage for the given file. The file need not exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for JsonFileStorage {
    fn save(&self, records: &[TaskRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(records)?;
        let temp_path = self.temp_path();

        let write = || -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(&json)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, &self.path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        log::debug!("Saved {} tasks to {}", records.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<TaskRecord>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records: Vec<TaskRecord> = serde_json::from_slice(&content)?;
        log::debug!("Loaded {} tasks from {}", records.len(), self.path.display());
        Ok(records)
    }
}
