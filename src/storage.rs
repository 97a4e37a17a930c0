//! Connection acquisition, schema creation, and lookup seeding.

use eyre::{Context, Result};
use rusqlite::{Connection, params};
use std::path::Path;

/// Default database file, created in the working directory.
pub const DB_FILE: &str = "task_manager.db";

/// Default JSON export file, overwritten on every export.
pub const EXPORT_FILE: &str = "tasks_dump.json";

/// Status names inserted at startup.
pub const SEED_STATUSES: &[&str] = &["Not done", "Done"];

/// Priority names inserted at startup.
pub const SEED_PRIORITIES: &[&str] = &["Low", "Medium", "High"];

/// Category names inserted at startup.
pub const SEED_CATEGORIES: &[&str] = &["Work", "Personal", "Study"];

/// Open (creating if absent) the database at the given path.
///
/// The connection is the single process-wide handle; callers pass it down
/// explicitly and it closes on drop.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    // Foreign keys are declared but not enforced (see `init_schema`). The
    // bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1, so turn
    // enforcement back off explicitly to honor that contract.
    conn.pragma_update(None, "foreign_keys", false)
        .context("Failed to disable foreign key enforcement")?;
    Ok(conn)
}

/// Create the four tables if they do not exist.
///
/// The foreign keys on tasks are declared but not enforced: a task may
/// reference a lookup id that was never seeded, or none at all.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS statuses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS priorities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            due_date DATE,
            status_id INTEGER REFERENCES statuses(id),
            priority_id INTEGER REFERENCES priorities(id),
            category_id INTEGER REFERENCES categories(id)
        );
    "#,
    )
    .context("Failed to initialize schema")?;

    Ok(())
}

/// Insert the fixed lookup rows.
///
/// INSERT OR IGNORE against the unique name constraint makes reruns
/// idempotent: each name exists exactly once no matter how often the
/// process starts.
pub fn seed_lookups(conn: &Connection) -> Result<()> {
    let seeds: [(&str, &[&str]); 3] = [
        ("statuses", SEED_STATUSES),
        ("priorities", SEED_PRIORITIES),
        ("categories", SEED_CATEGORIES),
    ];

    for (table, names) in seeds {
        let sql = format!("INSERT OR IGNORE INTO {} (name) VALUES (?)", table);
        for name in names {
            conn.execute(&sql, params![name])
                .with_context(|| format!("Failed to seed {}", table))?;
        }
    }

    Ok(())
}
