//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the HTTP daemon (default)
//! - list: print all tasks
//! - add / toggle / delete: edit the task file without a running daemon

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskpad - a small task registry served over HTTP
#[derive(Parser, Debug)]
#[command(name = "taskpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP daemon
    Serve {
        /// Address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List all tasks
    List,

    /// Add a task
    Add {
        /// Task description
        task: String,
    },

    /// Flip a task's done flag
    Toggle {
        /// Task ID
        id: u64,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },
}
