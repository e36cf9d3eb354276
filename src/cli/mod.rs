//! CLI command handling for Personal OS.

mod commands;
mod setup;
mod tasks;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::tasks::{TaskFilter, TaskStatus};

pub use commands::{check, config_cmd};
pub use setup::{GoalsOptions, goals, setup};
pub use tasks::tasks;

#[derive(Parser)]
#[command(name = "pos")]
#[command(about = "Personal OS - set up your task workspace and write your GOALS.md")]
#[command(version)]
pub struct Cli {
    /// Workspace directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the workspace and GOALS.md (the default)
    Setup(GoalsArgs),
    /// Regenerate GOALS.md only
    Goals(GoalsArgs),
    /// Show which workspace files exist
    Check,
    /// Open config in editor
    Config,
    /// Work with the task files in Tasks/
    Tasks {
        #[command(subcommand)]
        command: TasksCommand,
    },
}

#[derive(Subcommand)]
pub enum TasksCommand {
    /// List tasks by priority (done tasks hidden by default)
    List(ListArgs),
    /// Count tasks by priority, category and status
    Summary,
    /// Warn when too many active tasks share a priority
    CheckLimits,
    /// Set a task's status: n (not started), s (started), b (blocked), d (done)
    UpdateStatus { file: String, status: TaskStatus },
    /// Mark a task as started
    Start { file: String },
    /// Mark a task as done
    Complete { file: String },
    /// Delete done tasks not modified for a number of days
    Prune {
        #[arg(long, default_value_t = 30)]
        days_old: u64,
    },
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Only these categories (comma-separated)
    #[arg(long)]
    pub category: Option<String>,
    /// Only these priorities, e.g. P0,P1
    #[arg(long)]
    pub priority: Option<String>,
    /// Only these statuses, e.g. n,s
    #[arg(long)]
    pub status: Option<String>,
    /// Include completed tasks
    #[arg(long)]
    pub include_done: bool,
}

impl From<&ListArgs> for TaskFilter {
    fn from(args: &ListArgs) -> Self {
        Self::new(
            args.category.as_deref(),
            args.priority.as_deref(),
            args.status.as_deref(),
            args.include_done,
        )
    }
}

#[derive(Args, Default)]
pub struct GoalsArgs {
    /// Skip the Claude interview and use the questionnaire
    #[arg(long)]
    pub offline: bool,
    /// Replace an existing GOALS.md without asking
    #[arg(long)]
    pub force: bool,
}

impl From<&GoalsArgs> for GoalsOptions {
    fn from(args: &GoalsArgs) -> Self {
        Self {
            offline: args.offline,
            force: args.force,
        }
    }
}

impl Cli {
    /// The workspace root, with `~` expanded.
    #[must_use]
    pub fn workspace_root(&self) -> PathBuf {
        self.dir.as_deref().map_or_else(
            || PathBuf::from("."),
            |dir| PathBuf::from(shellexpand::tilde(dir).as_ref()),
        )
    }
}
