//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing operations return tasks newest first by creation time and yield
/// an empty vector, never an error, when nothing matches.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has the
    /// identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns every stored task.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the stored tasks with the given status.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the open tasks.
    async fn list_new(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.list_by_status(TaskStatus::New).await
    }

    /// Returns the completed tasks.
    async fn list_completed(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.list_by_status(TaskStatus::Completed).await
    }

    /// Stores a new task and returns the identifier assigned to it.
    ///
    /// Only the title, description, status, and creation timestamp are
    /// written; the completion timestamp is ignored.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<TaskId>;

    /// Overwrites the title, description, status, and completion timestamp
    /// of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task no longer
    /// exists and [`TaskRepositoryError::MissingIdentifier`] when the task
    /// was never stored.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has the
    /// identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A task without a storage identifier was passed where one is needed.
    #[error("task has not been stored yet")]
    MissingIdentifier,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the error reports a missing task.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
