use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier. Opaque to the client; the backend
/// hands out integers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    #[serde(default)]
    pub completed: bool,

    // Only some backend deployments send this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(id: TaskId, content: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            content: content.into(),
            completed,
            date_created: None,
        }
    }
}

/// Body of `POST /tasks`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewTask {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_list() {
        let raw = r#"[
            {"id": 1, "content": "Buy milk", "completed": false},
            {"id": 2, "content": "Pay rent", "completed": true,
             "date_created": "2025-03-01T09:15:00.123456"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0], Task::new(TaskId(1), "Buy milk", false));
        assert!(tasks[1].completed);
        assert!(tasks[1].date_created.is_some());
    }

    #[test]
    fn test_missing_completed_defaults_to_pending() {
        let task: Task = serde_json::from_str(r#"{"id": 7, "content": "x"}"#).unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn test_task_id_parse() {
        assert_eq!(" 42 ".parse::<TaskId>().unwrap(), TaskId(42));
        assert!("abc".parse::<TaskId>().is_err());
        assert_eq!(TaskId(42).to_string(), "42");
    }
}
