use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use todolist_core::{Intent, TaskApi, TaskListController};

use crate::tui::surface::SharedView;

/// Applies intents one at a time, in the order the key loop sent them.
/// A status notice only describes the intent that raised it.
/// Ends when every sender is dropped.
pub async fn drive<A: TaskApi>(
    mut controller: TaskListController<A, SharedView>,
    mut intents: UnboundedReceiver<Intent>,
) {
    while let Some(intent) = intents.recv().await {
        debug!(?intent, "dispatching");
        controller.surface().lock().status = None;
        controller.dispatch(intent).await;
        controller.surface().finish_request();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use todolist_core::{ApiResult, MutationPolicy, Task, TaskId};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct FakeApi {
        tasks: Arc<Mutex<Vec<Task>>>,
    }

    #[async_trait]
    impl TaskApi for FakeApi {
        async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
            Ok(self.tasks.lock().unwrap().clone())
        }
        async fn create_task(&self, content: &str) -> ApiResult<()> {
            let mut tasks = self.tasks.lock().unwrap();
            let id = TaskId(tasks.len() as i64 + 1);
            tasks.push(Task::new(id, content, false));
            Ok(())
        }
        async fn complete_task(&self, id: TaskId) -> ApiResult<()> {
            for task in self.tasks.lock().unwrap().iter_mut().filter(|t| t.id == id) {
                task.completed = !task.completed;
            }
            Ok(())
        }
        async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
            self.tasks.lock().unwrap().retain(|t| t.id != id);
            Ok(())
        }
        async fn health(&self) -> ApiResult<String> {
            Ok("API RUNNING".to_string())
        }
    }

    #[tokio::test]
    async fn test_drive_applies_intents_in_order() {
        let view = SharedView::default();
        view.lock().input.push_str("  Buy milk ");
        let controller = TaskListController::new(FakeApi::default(), view.clone());

        let (tx, rx) = mpsc::unbounded_channel();
        for intent in [
            Intent::Refresh,
            Intent::Add("  Buy milk ".to_string()),
            Intent::Add("Pay rent".to_string()),
            Intent::Complete(TaskId(2)),
            Intent::Delete(TaskId(1)),
        ] {
            view.begin_request();
            tx.send(intent).unwrap();
        }
        drop(tx);

        drive(controller, rx).await;

        let state = view.lock();
        assert_eq!(state.in_flight, 0);
        assert!(state.input.is_empty());
        assert_eq!(state.items.len(), 1);
        let row = state.items[0].as_task().unwrap();
        assert_eq!(row.content, "Pay rent");
        assert!(row.completed);
        assert_eq!(row.toggle_label, "Pendiente");
    }

    #[tokio::test]
    async fn test_status_notice_cleared_by_next_intent() {
        let view = SharedView::default();
        view.lock().status = Some("No se pudo eliminar la tarea 3.".to_string());
        let controller = TaskListController::new(FakeApi::default(), view.clone())
            .with_policy(MutationPolicy::Report);
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Intent::Add("Buy milk".to_string())).unwrap();
        drop(tx);

        drive(controller, rx).await;

        let state = view.lock();
        assert_eq!(state.status, None);
        assert_eq!(state.task_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_add_raises_alert() {
        let view = SharedView::default();
        let controller = TaskListController::new(FakeApi::default(), view.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Intent::Add("   ".to_string())).unwrap();
        drop(tx);

        drive(controller, rx).await;

        let state = view.lock();
        assert_eq!(state.alert.as_deref(), Some("La tarea no puede estar vacía."));
        assert!(state.items.is_empty());
    }
}
