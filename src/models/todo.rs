use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Number of todos per page of list results.
pub const PAGE_SIZE: i64 = 4;

/// A todo entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    /// Identifier of the owning user. All queries are scoped by this column.
    pub user_id: Uuid,
    /// The todo text. Never empty.
    pub text: String,
    /// Whether the todo has been completed. Defaults to false.
    pub completed: bool,
    /// Timestamp of when the todo was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a todo.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Partial update payload. Absent fields are left untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Query parameters accepted when listing todos.
#[derive(Debug, Deserialize)]
pub struct TodoQuery {
    /// 1-based page number. Defaults to 1; values below 1 are clamped.
    pub page: Option<i64>,
    /// Case-insensitive substring to match against the todo text.
    pub search: Option<String>,
}

/// One page of list results.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl Todo {
    /// Creates a new `Todo` owned by `user_id`, not yet completed, with a
    /// fresh UUID and the current timestamp.
    pub fn new(input: TodoInput, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            text: input.text,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Total page count for `total` matching rows. Zero when nothing matches.
pub fn page_count(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Row offset for a 1-based page number. Saturating arithmetic keeps the
/// offset valid even for absurd page values from the query string.
pub fn page_offset(page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use validator::Validate;

    #[test]
    fn test_todo_creation_defaults() {
        let owner = Uuid::new_v4();
        let todo = Todo::new(
            TodoInput {
                text: "Buy milk".to_string(),
            },
            owner,
        );

        assert_eq!(todo.text, "Buy milk");
        assert_eq!(todo.user_id, owner);
        assert!(!todo.completed);
    }

    #[test]
    fn test_todo_input_validation() {
        let valid = TodoInput {
            text: "Buy milk".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = TodoInput {
            text: "".to_string(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_partial_update_deserialization() {
        // Only `completed` present: `text` must stay untouched (None).
        let update: TodoUpdate = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert_eq!(update.completed, Some(true));
        assert_eq!(update.text, None);

        let update: TodoUpdate = serde_json::from_str(r#"{"text": "Buy bread"}"#).unwrap();
        assert_eq!(update.text, Some("Buy bread".to_string()));
        assert_eq!(update.completed, None);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(4), 1);
        assert_eq!(page_count(5), 2);
        // 10 todos at page size 4 span 3 pages.
        assert_eq!(page_count(10), 3);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 4);
        assert_eq!(page_offset(3), 8);
        // Extreme page numbers saturate instead of overflowing.
        assert_eq!(page_offset(i64::MAX), i64::MAX);
    }
}
