//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Query Toggl Track from the terminal. Output is JSON.
#[derive(Debug, Parser)]
#[command(name = "toggl", version, about, long_about = None)]
pub struct Cli {
    /// Log every request.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store an API token in the config file.
    Login { token: String },

    /// Check whether the credentials are accepted.
    Logged,

    /// Show the current user.
    Me,

    /// List workspaces.
    Workspaces {
        /// Only workspaces changed since YYYY-MM-DD or a Unix timestamp.
        #[arg(long)]
        since: Option<String>,
    },

    /// List projects in a workspace.
    Projects { workspace_id: u64 },

    /// List your time entries.
    Entries {
        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start: Option<String>,
        /// Last day, YYYY-MM-DD.
        #[arg(long)]
        end: Option<String>,
    },

    /// Show the running time entry.
    Current,

    /// Stop a running time entry.
    Stop {
        workspace_id: u64,
        time_entry_id: u64,
    },

    /// Search the detailed report of a workspace.
    Report {
        workspace_id: u64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Zero-based page.
        #[arg(long)]
        page: Option<u32>,
    },
}
