use std::fmt;

use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::config::MutationPolicy;
use crate::error::ApiResult;
use crate::model::intent::Intent;
use crate::model::task::TaskId;
use crate::surface::Surface;
use crate::view::{render_fetch_error, render_tasks, EMPTY_CONTENT_NOTICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { rows: usize },
    /// The list was replaced by the fetch error notice.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Complete(TaskId),
    Delete(TaskId),
}

impl Mutation {
    fn failure_notice(&self) -> String {
        match self {
            Mutation::Create => "No se pudo crear la tarea.".to_string(),
            Mutation::Complete(id) => format!("No se pudo actualizar la tarea {}.", id),
            Mutation::Delete(id) => format!("No se pudo eliminar la tarea {}.", id),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Create => write!(f, "create"),
            Mutation::Complete(id) => write!(f, "complete {}", id),
            Mutation::Delete(id) => write!(f, "delete {}", id),
        }
    }
}

/// What happened to one mutation and the refresh that followed it.
#[derive(Debug)]
pub struct MutationReport {
    pub mutation: Mutation,
    pub request: ApiResult<()>,
    pub refresh: RefreshOutcome,
}

#[derive(Debug)]
pub enum AddOutcome {
    /// Text was blank after trimming; nothing was sent.
    Rejected,
    Submitted(MutationReport),
}

#[derive(Debug)]
pub enum DispatchOutcome {
    Refreshed(RefreshOutcome),
    Added(AddOutcome),
    Mutated(MutationReport),
}

/// Keeps a surface in sync with the remote task list.
///
/// Holds no task state of its own: every mutation is sent as-is and followed
/// by a full refresh, whatever the mutation's result.
pub struct TaskListController<A: TaskApi, S: Surface> {
    api: A,
    surface: S,
    policy: MutationPolicy,
}

impl<A: TaskApi, S: Surface> TaskListController<A, S> {
    pub fn new(api: A, surface: S) -> Self {
        Self {
            api,
            surface,
            policy: MutationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub async fn dispatch(&mut self, intent: Intent) -> DispatchOutcome {
        match intent {
            Intent::Refresh => DispatchOutcome::Refreshed(self.refresh().await),
            Intent::Add(text) => DispatchOutcome::Added(self.add_task(&text).await),
            Intent::Complete(id) => DispatchOutcome::Mutated(self.complete_task(id).await),
            Intent::Delete(id) => DispatchOutcome::Mutated(self.remove_task(id).await),
        }
    }

    pub async fn refresh(&mut self) -> RefreshOutcome {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                let rows = tasks.len();
                self.surface.render_list(render_tasks(tasks));
                debug!(rows, "rendered task list");
                RefreshOutcome::Rendered { rows }
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                self.surface.render_list(render_fetch_error());
                RefreshOutcome::Failed
            }
        }
    }

    pub async fn add_task(&mut self, text: &str) -> AddOutcome {
        let content = text.trim();
        if content.is_empty() {
            self.surface.alert(EMPTY_CONTENT_NOTICE);
            return AddOutcome::Rejected;
        }

        let request = self.api.create_task(content).await;
        self.surface.clear_input();
        AddOutcome::Submitted(self.finish_mutation(Mutation::Create, request).await)
    }

    pub async fn complete_task(&mut self, id: TaskId) -> MutationReport {
        let request = self.api.complete_task(id).await;
        self.finish_mutation(Mutation::Complete(id), request).await
    }

    pub async fn remove_task(&mut self, id: TaskId) -> MutationReport {
        let request = self.api.delete_task(id).await;
        self.finish_mutation(Mutation::Delete(id), request).await
    }

    async fn finish_mutation(&mut self, mutation: Mutation, request: ApiResult<()>) -> MutationReport {
        if let Err(e) = &request {
            warn!(%mutation, error = %e, "mutation failed, refreshing anyway");
        }

        let refresh = self.refresh().await;

        if request.is_err() && self.policy == MutationPolicy::Report {
            self.surface.notify(&mutation.failure_notice());
        }

        MutationReport {
            mutation,
            request,
            refresh,
        }
    }
}
