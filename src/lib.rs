//! Taskpad - a small concurrent task registry
//!
//! Taskpad keeps an ordered list of tasks in memory, serves it over HTTP, and
//! rewrites a JSON snapshot file after every mutation so the list survives
//! restarts.

pub mod config;
pub mod daemon;
pub mod error;
pub mod storage;
pub mod store;

pub use error::{Result, TaskpadError};
