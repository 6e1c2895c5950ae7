pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod surface;
pub mod view;


pub use api::{HttpTaskApi, TaskApi};
pub use config::{ClientConfig, MutationPolicy};
pub use controller::{AddOutcome, DispatchOutcome, Mutation, MutationReport, RefreshOutcome, TaskListController};
pub use error::{ApiError, ApiResult};
pub use model::intent::Intent;
pub use model::task::{NewTask, Task, TaskId};
pub use surface::Surface;
pub use view::{ListItem, TaskRow};
