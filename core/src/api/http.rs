use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::api::traits::TaskApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::task::{NewTask, Task, TaskId};

const TASKS_SEGMENT: &str = "tasks";
const COMPLETE_SEGMENT: &str = "complete";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

/// `TaskApi` over the backend's REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpTaskApi {
    http: Client,
    base_url: Url,
}

impl HttpTaskApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn task_endpoint(&self, id: TaskId, tail: Option<&str>) -> ApiResult<Url> {
        let id = id.to_string();
        match tail {
            Some(tail) => self.endpoint(&[TASKS_SEGMENT, &id, tail]),
            None => self.endpoint(&[TASKS_SEGMENT, &id]),
        }
    }
}

/// Turns any non-2xx answer into `ApiError::Status`, keeping the backend's
/// `{"error": ...}` message when it sent one.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(ApiError::Status { status, message })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let url = self.endpoint(&[TASKS_SEGMENT])?;
        debug!(%url, "GET tasks");
        let response = self.http.get(url).send().await.map_err(ApiError::Transport)?;
        let tasks = check_status(response)
            .await?
            .json::<Vec<Task>>()
            .await
            .map_err(ApiError::Decode)?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn create_task(&self, content: &str) -> ApiResult<()> {
        let url = self.endpoint(&[TASKS_SEGMENT])?;
        debug!(%url, "POST task");
        let body = NewTask {
            content: content.to_string(),
        };
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn complete_task(&self, id: TaskId) -> ApiResult<()> {
        let url = self.task_endpoint(id, Some(COMPLETE_SEGMENT))?;
        debug!(%url, "PUT complete");
        let response = self.http.put(url).send().await.map_err(ApiError::Transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        let url = self.task_endpoint(id, None)?;
        debug!(%url, "DELETE task");
        let response = self.http.delete(url).send().await.map_err(ApiError::Transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn health(&self) -> ApiResult<String> {
        let url = self.base_url.clone();
        debug!(%url, "GET health");
        let response = self.http.get(url).send().await.map_err(ApiError::Transport)?;
        let body = check_status(response)
            .await?
            .json::<HealthBody>()
            .await
            .map_err(ApiError::Decode)?;
        Ok(body.status)
    }
}
