//! Storage layer for Taskpad - snapshot persistence for the task store.
//!
//! The store hands the full task list to a [`Persistence`] implementation
//! after every mutation and asks it for the last snapshot on startup.
//! - [`JsonFileStorage`]: one JSON array file, rewritten atomically
//! - [`MemoryStorage`]: in-process snapshot for tests and embedding

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use traits::Persistence;
