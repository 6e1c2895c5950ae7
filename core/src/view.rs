//! Surface-independent rendering of the task list.

use chrono::NaiveDateTime;

use crate::model::task::{Task, TaskId};

pub const COMPLETE_LABEL: &str = "Completar";
pub const REOPEN_LABEL: &str = "Pendiente";
pub const DELETE_LABEL: &str = "Eliminar";

pub const FETCH_ERROR_NOTICE: &str = "Error al conectar con la API.";
pub const EMPTY_CONTENT_NOTICE: &str = "La tarea no puede estar vacía.";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: TaskId,
    pub content: String,
    /// Style marker: the row is drawn as done.
    pub completed: bool,
    pub toggle_label: &'static str,
    pub delete_label: &'static str,
    pub created: Option<NaiveDateTime>,
}

impl TaskRow {
    pub fn from_task(task: Task) -> Self {
        let toggle_label = if task.completed {
            REOPEN_LABEL
        } else {
            COMPLETE_LABEL
        };
        Self {
            id: task.id,
            content: task.content,
            completed: task.completed,
            toggle_label,
            delete_label: DELETE_LABEL,
            created: task.date_created,
        }
    }
}

/// One entry of the rendered list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Task(TaskRow),
    Notice(String),
}

impl ListItem {
    pub fn as_task(&self) -> Option<&TaskRow> {
        match self {
            ListItem::Task(row) => Some(row),
            ListItem::Notice(_) => None,
        }
    }
}

/// One row per task, in the order given.
pub fn render_tasks(tasks: Vec<Task>) -> Vec<ListItem> {
    tasks
        .into_iter()
        .map(|task| ListItem::Task(TaskRow::from_task(task)))
        .collect()
}

pub fn render_fetch_error() -> Vec<ListItem> {
    vec![ListItem::Notice(FETCH_ERROR_NOTICE.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_example_list() {
        let items = render_tasks(vec![
            Task::new(TaskId(1), "Buy milk", false),
            Task::new(TaskId(2), "Pay rent", true),
        ]);

        assert_eq!(items.len(), 2);
        let first = items[0].as_task().unwrap();
        assert_eq!(first.content, "Buy milk");
        assert!(!first.completed);
        assert_eq!(first.toggle_label, "Completar");
        assert_eq!(first.delete_label, "Eliminar");

        let second = items[1].as_task().unwrap();
        assert_eq!(second.content, "Pay rent");
        assert!(second.completed);
        assert_eq!(second.toggle_label, "Pendiente");
    }

    #[test]
    fn test_render_keeps_order_and_does_not_sort() {
        let items = render_tasks(vec![
            Task::new(TaskId(9), "z", false),
            Task::new(TaskId(3), "a", true),
            Task::new(TaskId(5), "m", false),
        ]);
        let ids: Vec<TaskId> = items.iter().filter_map(|i| i.as_task()).map(|r| r.id).collect();
        assert_eq!(ids, vec![TaskId(9), TaskId(3), TaskId(5)]);
    }

    #[test]
    fn test_fetch_error_is_single_notice() {
        let items = render_fetch_error();
        assert_eq!(items, vec![ListItem::Notice(FETCH_ERROR_NOTICE.to_string())]);
        assert!(items[0].as_task().is_none());
    }
}
