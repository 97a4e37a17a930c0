//! Core data types for the task manager.

use chrono::NaiveDate;
use serde::Serialize;

/// Field values for creating or overwriting a task row.
///
/// Lookup references are nullable and are not checked against the lookup
/// tables; a reference to a missing row is tolerated and rendered as
/// "Unknown" at listing time.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInput {
    /// Short description of the task
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Reference into the statuses table
    pub status_id: Option<i64>,

    /// Reference into the priorities table
    pub priority_id: Option<i64>,

    /// Reference into the categories table
    pub category_id: Option<i64>,
}

impl TaskInput {
    /// Create an input with just a title; everything else absent.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            status_id: None,
            priority_id: None,
            category_id: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the status reference.
    pub fn with_status(mut self, status_id: i64) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Set the priority reference.
    pub fn with_priority(mut self, priority_id: i64) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Set the category reference.
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Validate the input's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.title.chars().any(|c| c.is_control()) {
            return Err(ValidationError::InvalidCharacters);
        }
        Ok(())
    }
}

/// A denormalized listing row: lookup ids resolved to their names.
///
/// This is the shape written to the JSON export file, one object per task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority: String,
    pub category: String,
}

/// Validation errors for task input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    InvalidCharacters,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::InvalidCharacters => write!(f, "title contains control characters"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_validation_valid() {
        let input = TaskInput::new("Valid title");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_input_validation_empty_title() {
        let input = TaskInput::new("");
        assert_eq!(input.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_input_validation_control_chars() {
        let input = TaskInput::new("Title\x00with null");
        assert_eq!(input.validate(), Err(ValidationError::InvalidCharacters));
    }

    #[test]
    fn test_input_builder() {
        let input = TaskInput::new("Buy milk")
            .with_description("2%, one gallon")
            .with_due_date(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())
            .with_status(1)
            .with_priority(2)
            .with_category(1);

        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, Some("2%, one gallon".to_string()));
        assert_eq!(input.status_id, Some(1));
        assert_eq!(input.priority_id, Some(2));
        assert_eq!(input.category_id, Some(1));
    }

    #[test]
    fn test_view_serializes_all_fields() {
        let view = TaskView {
            id: 1,
            title: "Buy milk".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            status: "Not done".to_string(),
            priority: "Medium".to_string(),
            category: "Work".to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Buy milk");
        // absent fields serialize as explicit nulls in the export
        assert!(json["description"].is_null());
        assert_eq!(json["due_date"], "2024-12-01");
        assert_eq!(json["status"], "Not done");
        assert_eq!(json["priority"], "Medium");
        assert_eq!(json["category"], "Work");
    }
}
