//! Shared test infrastructure for taskman integration tests.
//!
//! Provides TestEnv for consistent setup/teardown: a temp directory holding
//! an opened, schema-initialized, seeded database.

#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use taskman::{TaskInput, TaskRepo, storage};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub conn: Connection,
}

impl TestEnv {
    /// Create a new environment with an initialized, seeded database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let conn = storage::open(&temp_dir.path().join(storage::DB_FILE))
            .expect("Failed to open database");
        storage::init_schema(&conn).expect("Failed to initialize schema");
        storage::seed_lookups(&conn).expect("Failed to seed lookups");
        Self { temp_dir, conn }
    }

    /// A task accessor bound to this environment's connection.
    pub fn repo(&self) -> TaskRepo<'_> {
        TaskRepo::new(&self.conn)
    }

    /// Where exports land for this environment.
    pub fn export_path(&self) -> PathBuf {
        self.temp_dir.path().join(storage::EXPORT_FILE)
    }

    /// Add a task with just a title.
    pub fn add_task(&self, title: &str) -> i64 {
        self.repo()
            .add(&TaskInput::new(title))
            .expect("Failed to add task")
    }

    /// Add a fully populated task referencing the seeded lookups.
    pub fn add_full_task(&self, title: &str) -> i64 {
        self.repo()
            .add(
                &TaskInput::new(title)
                    .with_description("details")
                    .with_status(1)
                    .with_priority(2)
                    .with_category(1),
            )
            .expect("Failed to add task")
    }

    /// Total number of task rows.
    pub fn task_count(&self) -> usize {
        self.repo().list().expect("Failed to list tasks").len()
    }

    /// Read the export file back as parsed JSON.
    pub fn read_export(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.export_path()).expect("Failed to read export file");
        serde_json::from_str(&raw).expect("Export file is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
