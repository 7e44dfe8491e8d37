//! CLI module for taskpad - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for running the HTTP
//! daemon and for editing the task file directly.

pub mod commands;

pub use commands::Cli;
