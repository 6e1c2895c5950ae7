use crate::model::task::TaskId;

/// A user action forwarded from a surface to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Raw text from the entry field; trimming happens in the controller.
    Add(String),
    Complete(TaskId),
    Delete(TaskId),
    Refresh,
}
