use chrono::{DateTime, Utc};
use serde::Serialize;

/// Form value the edit page sends for a finished task
pub const STATUS_COMPLETED: &str = "Completed";

/// Form value for a task that is not finished yet
pub const STATUS_PENDING: &str = "Pending";

/// To-do item owned by a single user
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Label shown on the task list
    pub fn status(&self) -> &'static str {
        if self.completed {
            STATUS_COMPLETED
        } else {
            STATUS_PENDING
        }
    }

    /// Interpret the `status` form field; anything but "Completed" is pending
    pub fn parse_status(value: Option<&str>) -> bool {
        value == Some(STATUS_COMPLETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert!(Todo::parse_status(Some("Completed")));
        assert!(!Todo::parse_status(Some("Pending")));
        assert!(!Todo::parse_status(Some("completed")));
        assert!(!Todo::parse_status(None));
    }

    #[test]
    fn test_status_label() {
        let mut todo = Todo {
            id: 1,
            user_id: 1,
            title: "Buy milk".to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        assert_eq!(todo.status(), "Pending");

        todo.completed = true;
        assert_eq!(todo.status(), "Completed");
    }
}
