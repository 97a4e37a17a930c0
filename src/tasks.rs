//! Task accessor: CRUD plus the denormalized listing and JSON export.

use crate::records::Records;
use crate::types::{TaskInput, TaskView};
use chrono::NaiveDate;
use eyre::{Context, Result, bail};
use rusqlite::types::Value;
use rusqlite::{Connection, ToSql};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Label substituted when a task references a missing or null lookup row.
pub const UNKNOWN: &str = "Unknown";

/// Joined listing: lookup ids resolved to names, "Unknown" when absent.
const LIST_SQL: &str = "\
SELECT
    tasks.id,
    tasks.title,
    tasks.description,
    tasks.due_date,
    COALESCE(statuses.name, 'Unknown') AS status,
    COALESCE(priorities.name, 'Unknown') AS priority,
    COALESCE(categories.name, 'Unknown') AS category
FROM tasks
LEFT JOIN statuses ON tasks.status_id = statuses.id
LEFT JOIN priorities ON tasks.priority_id = priorities.id
LEFT JOIN categories ON tasks.category_id = categories.id
ORDER BY tasks.id";

/// Accessor for the tasks table.
///
/// Wraps the generic [`Records`] accessor rather than reimplementing CRUD;
/// only the joined listing and the export are task-specific.
pub struct TaskRepo<'conn> {
    records: Records<'conn>,
}

impl<'conn> TaskRepo<'conn> {
    /// Bind the accessor to a connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            records: Records::new(conn, "tasks"),
        }
    }

    /// Insert a task and return its id.
    pub fn add(&self, input: &TaskInput) -> Result<i64> {
        input.validate()?;
        let due = input.due_date.map(format_date);
        let fields: [(&str, &dyn ToSql); 6] = [
            ("title", &input.title),
            ("description", &input.description),
            ("due_date", &due),
            ("status_id", &input.status_id),
            ("priority_id", &input.priority_id),
            ("category_id", &input.category_id),
        ];
        self.records.create(&fields)
    }

    /// Overwrite every user-settable column of the task with the given id.
    ///
    /// Returns the number of rows changed; zero matches is not an error.
    pub fn update(&self, id: i64, input: &TaskInput) -> Result<usize> {
        input.validate()?;
        let due = input.due_date.map(format_date);
        let fields: [(&str, &dyn ToSql); 6] = [
            ("title", &input.title),
            ("description", &input.description),
            ("due_date", &due),
            ("status_id", &input.status_id),
            ("priority_id", &input.priority_id),
            ("category_id", &input.category_id),
        ];
        self.records.update(id, &fields)
    }

    /// Delete the task with the given id. A missing id is a silent no-op.
    pub fn remove(&self, id: i64) -> Result<usize> {
        self.records.delete(id)
    }

    /// Denormalized listing of every task, ordered by id.
    pub fn list(&self) -> Result<Vec<TaskView>> {
        let rows = self.records.read(Some(LIST_SQL))?;
        rows.into_iter().map(view_from_row).collect()
    }

    /// Write the full listing to `path` as a pretty-printed JSON array,
    /// overwriting any previous file. Returns the number of rows written.
    pub fn export_json(&self, path: &Path) -> Result<usize> {
        let views = self.list()?;

        let file = File::create(path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &views).context("Failed to serialize task export")?;
        out.flush().context("Failed to flush task export")?;

        Ok(views.len())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert a positional listing row into a view.
fn view_from_row(row: Vec<Value>) -> Result<TaskView> {
    if row.len() != 7 {
        bail!("listing row has {} columns, expected 7", row.len());
    }
    let mut columns = row.into_iter();
    let mut column = || columns.next().unwrap_or(Value::Null);

    Ok(TaskView {
        id: take_integer(column())?,
        title: take_text(column())?,
        description: take_optional_text(column())?,
        // an unparseable stored date reads back as absent rather than failing
        // the whole listing
        due_date: take_optional_text(column())?
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        status: take_text(column())?,
        priority: take_text(column())?,
        category: take_text(column())?,
    })
}

fn take_integer(value: Value) -> Result<i64> {
    match value {
        Value::Integer(n) => Ok(n),
        other => bail!("expected integer column, got {:?}", other),
    }
}

fn take_text(value: Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s),
        other => bail!("expected text column, got {:?}", other),
    }
}

fn take_optional_text(value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s)),
        other => bail!("expected text or null column, got {:?}", other),
    }
}
