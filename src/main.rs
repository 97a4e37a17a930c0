//! taskman CLI - an interactive task manager over a SQLite database.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;
use taskman::{TaskRepo, repl, storage};

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskman")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskman.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let db_path = cli.db.unwrap_or_else(|| PathBuf::from(storage::DB_FILE));
    let export_path = cli.export.unwrap_or_else(|| PathBuf::from(storage::EXPORT_FILE));

    let conn = storage::open(&db_path)?;
    storage::init_schema(&conn)?;
    storage::seed_lookups(&conn)?;
    info!("Opened database at {}", db_path.display());

    let repo = TaskRepo::new(&conn);
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(stdin.lock(), stdout.lock(), &repo, &export_path)
    // the connection closes on drop here, on every exit path
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
