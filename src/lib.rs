//! Taskman: an interactive task manager over a SQLite database.
//!
//! Four tables (statuses, priorities, categories, tasks) live in a single
//! database file. A table-agnostic [`Records`] accessor provides CRUD for
//! any table; [`TaskRepo`] wraps it for the tasks table and adds a
//! denormalized listing plus a JSON export. The [`repl`] module runs the
//! line-oriented command loop over those pieces.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use taskman::{TaskInput, TaskRepo, storage};
//!
//! let conn = storage::open(Path::new("task_manager.db")).unwrap();
//! storage::init_schema(&conn).unwrap();
//! storage::seed_lookups(&conn).unwrap();
//!
//! let repo = TaskRepo::new(&conn);
//! let id = repo
//!     .add(&TaskInput::new("Buy milk").with_status(1).with_priority(2))
//!     .unwrap();
//!
//! for row in repo.list().unwrap() {
//!     println!("{} {} [{}]", row.id, row.title, row.status);
//! }
//! # let _ = id;
//! ```

pub mod command;
pub mod records;
pub mod repl;
pub mod storage;
pub mod tasks;
pub mod types;

// Re-export public API
pub use command::{Command, ParseError};
pub use records::Records;
pub use tasks::{TaskRepo, UNKNOWN};
pub use types::{TaskInput, TaskView, ValidationError};
