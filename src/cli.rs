//! CLI argument parsing for the task manager binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taskman",
    about = "An interactive task manager over a SQLite database",
    version,
    after_help = "Logs are written to: ~/.local/share/taskman/logs/taskman.log"
)]
pub struct Cli {
    /// Path to the task database (default: task_manager.db in the current directory)
    #[arg(short = 'd', long)]
    pub db: Option<PathBuf>,

    /// Path for the JSON export written by 'list' and 'export'
    #[arg(short = 'e', long)]
    pub export: Option<PathBuf>,
}
