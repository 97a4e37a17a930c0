//! Table-agnostic record access.

use eyre::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{Connection, ToSql, params};

/// Generic accessor for a single table, bound at construction.
///
/// Column names are interpolated into SQL unvalidated; a bad column surfaces
/// as a database-level error. Every mutation runs in autocommit mode, so it
/// is durable as soon as the call returns.
pub struct Records<'conn> {
    conn: &'conn Connection,
    table: &'static str,
}

impl<'conn> Records<'conn> {
    /// Bind an accessor to a table.
    pub fn new(conn: &'conn Connection, table: &'static str) -> Self {
        Self { conn, table }
    }

    /// Insert a row built from column/value pairs. Returns the new rowid.
    pub fn create(&self, fields: &[(&str, &dyn ToSql)]) -> Result<i64> {
        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders
        );

        let values: Vec<&dyn ToSql> = fields.iter().map(|(_, value)| *value).collect();
        self.conn
            .execute(&sql, &values[..])
            .with_context(|| format!("Failed to insert into {}", self.table))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Run a full-table scan, or a caller-supplied query.
    ///
    /// Rows come back positional in statement column order, not named.
    pub fn read(&self, query: Option<&str>) -> Result<Vec<Vec<Value>>> {
        let default = format!("SELECT * FROM {}", self.table);
        let sql = query.unwrap_or(&default);

        let mut stmt = self
            .conn
            .prepare(sql)
            .with_context(|| format!("Failed to prepare query on {}", self.table))?;
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(column_count);
                for index in 0..column_count {
                    values.push(row.get::<_, Value>(index)?);
                }
                Ok(values)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read rows from {}", self.table))?;

        Ok(rows)
    }

    /// Overwrite columns on the row with the given id.
    ///
    /// Returns the number of rows changed; zero matches is not an error.
    pub fn update(&self, id: i64, fields: &[(&str, &dyn ToSql)]) -> Result<usize> {
        let assignments: Vec<String> = fields
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            self.table,
            assignments.join(", ")
        );

        let mut values: Vec<&dyn ToSql> = fields.iter().map(|(_, value)| *value).collect();
        values.push(&id);
        let changed = self
            .conn
            .execute(&sql, &values[..])
            .with_context(|| format!("Failed to update {}", self.table))?;

        Ok(changed)
    }

    /// Delete the row with the given id. A missing id is a silent no-op.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table);
        let changed = self
            .conn
            .execute(&sql, params![id])
            .with_context(|| format!("Failed to delete from {}", self.table))?;

        Ok(changed)
    }
}
