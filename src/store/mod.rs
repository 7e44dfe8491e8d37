//! Task store for Taskpad.
//!
//! The store owns the ordered task list and the id counter, serializes all
//! access behind one lock, and mirrors every mutation to a [`Persistence`]
//! adapter.
//!
//! # Example
//!
//! ```no_run
//! use taskpad::storage::JsonFileStorage;
//! use taskpad::store::TaskStore;
//!
//! let store = TaskStore::open(JsonFileStorage::new("tasks.json"));
//! let record = store.create("buy milk")?;
//! store.toggle(record.id)?;
//! for task in store.list()? {
//!     println!("{} {} {}", task.id, task.task, task.done);
//! }
//! # Ok::<(), taskpad::TaskpadError>(())
//! ```
//!
//! [`Persistence`]: crate::storage::Persistence

mod records;
mod task_store;

pub use records::{TaskRecord, validate_description};
pub use task_store::TaskStore;
