use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::task::{Task, TaskId};

/// The remote task service. Every call is one HTTP request.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;
    async fn create_task(&self, content: &str) -> ApiResult<()>;
    async fn complete_task(&self, id: TaskId) -> ApiResult<()>;
    async fn delete_task(&self, id: TaskId) -> ApiResult<()>;
    /// Backend liveness string from `GET /`.
    async fn health(&self) -> ApiResult<String>;
}
