//! CLI definition for the TaskDeck command-line interface.
//!
//! This module is self-contained -- it only depends on `clap` so the argument
//! surface can be read (and tested) without touching the board engine.

use clap::{Parser, Subcommand};

/// TaskDeck - Kanban board client for a remote task store.
///
/// Tasks live on a remote HTTP server and are grouped into three lanes:
/// To Do, In Progress, and Done. Every command loads the board fresh from
/// the remote before acting on it.
///
/// The remote URL defaults to http://localhost:3001. Override it with the
/// TASKDECK_REMOTE_URL env var, ~/.taskdeck/config.yaml, or --remote.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Kanban board client for a remote task store")]
#[command(
    long_about = "TaskDeck shows and edits a kanban board backed by a remote task store.\n\n\
    Tasks are grouped into three lanes: To Do, In Progress, and Done. Status\n\
    values are written as: todo, in-progress, done.\n\n\
    Environment variables:\n  \
    TASKDECK_REMOTE_URL  Override the remote task store URL\n\n\
    The URL can also be set via the remote_url key in ~/.taskdeck/config.yaml."
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Remote task store URL (overrides env var and config file)
    #[arg(long, global = true, value_name = "URL")]
    pub remote: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board as three lanes of task cards
    Board {
        /// Only show tasks whose title contains this text (case-insensitive)
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
        /// Output as JSON, one array of tasks per lane
        #[arg(long)]
        json: bool,
    },

    /// Create a new task
    Add {
        /// Task title
        #[arg(long)]
        title: String,
        /// Optional longer description
        #[arg(long)]
        description: Option<String>,
        /// Starting lane: todo, in-progress, or done (defaults to todo)
        #[arg(long)]
        status: Option<String>,
    },

    /// Edit an existing task's fields
    Edit {
        /// Task id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New lane: todo, in-progress, or done
        #[arg(long)]
        status: Option<String>,
    },

    /// Move a task to another lane
    Move {
        /// Task id
        id: String,
        /// Target lane: todo, in-progress, or done
        status: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },
}
