//! Service layer for task creation, partial updates, and completion.

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
}

impl CreateTaskRequest {
    /// Creates a request with the task title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Request payload for a partial task update.
///
/// Absent or empty fields mean "leave unchanged". The status is kept as the
/// raw literal supplied by the caller; an unrecognised literal is ignored
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing on the given task.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            status: None,
        }
    }

    /// Sets the requested title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the requested description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested status literal.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the target task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Repository operation failed before any change was made.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// The task was changed in memory but writing it back failed.
    #[error("failed to persist task changes: {source}")]
    UpdateNotPersisted {
        /// The task as mutated by the operation.
        task: Box<Task>,
        /// The repository failure.
        source: TaskRepositoryError,
    },
}

impl TaskLifecycleError {
    /// Returns the repository error behind this failure.
    #[must_use]
    pub const fn repository_error(&self) -> &TaskRepositoryError {
        match self {
            Self::Repository(err) | Self::UpdateNotPersisted { source: err, .. } => err,
        }
    }

    /// Returns `true` when the referenced task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.repository_error().is_not_found()
    }

    /// Returns the mutated task when the final write failed.
    #[must_use]
    pub fn unpersisted_task(&self) -> Option<&Task> {
        match self {
            Self::UpdateNotPersisted { task, .. } => Some(task.as_ref()),
            Self::Repository(_) => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Holds no state between calls; every operation is a fresh round trip to
/// the repository. Read-then-write operations are not transactional, so
/// concurrent edits of the same task resolve as last write wins.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the clock used to stamp task timestamps.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.list_all().await?;
        tracing::debug!(count = tasks.len(), "listed all tasks");
        Ok(tasks)
    }

    /// Returns the open tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_new(&self) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.list_new().await?;
        tracing::debug!(count = tasks.len(), "listed new tasks");
        Ok(tasks)
    }

    /// Returns the completed tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_completed(&self) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.list_completed().await?;
        tracing::debug!(count = tasks.len(), "listed completed tasks");
        Ok(tasks)
    }

    /// Creates and stores a task, returning the record as read back from
    /// the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storing or reading
    /// back the task fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let draft = Task::new(request.title, request.description, &*self.clock);
        let task_id = self.repository.store(&draft).await?;
        let stored = self.repository.find_by_id(task_id).await?;
        tracing::info!(%task_id, "task created");
        Ok(stored)
    }

    /// Applies a partial update to a task.
    ///
    /// Title, description, and status are each overwritten only when the
    /// request supplies a non-empty value that differs from the current one.
    /// A status literal that is neither `new` nor `completed` is ignored.
    /// Nothing is written when no field changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task cannot be
    /// loaded, or [`TaskLifecycleError::UpdateNotPersisted`] carrying the
    /// mutated task when the write fails.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let UpdateTaskRequest {
            task_id,
            title,
            description,
            status,
        } = request;
        let mut task = self.repository.find_by_id(task_id).await?;
        let mut changed = false;

        if let Some(new_title) = requested(title, task.title()) {
            task.set_title(new_title);
            changed = true;
        }
        if let Some(new_description) = requested(description, task.description()) {
            task.set_description(new_description);
            changed = true;
        }
        if let Some(new_status) = requested_status(status.as_deref(), task_id)
            .filter(|candidate| *candidate != task.status())
        {
            task.transition_to(new_status, &*self.clock);
            changed = true;
        }

        if !changed {
            tracing::debug!(%task_id, "update request left task unchanged");
            return Ok(task);
        }

        self.persist(task).await
    }

    /// Marks a task completed and stamps its completion time.
    ///
    /// Always writes, so completing a completed task refreshes the
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task cannot be
    /// loaded, or [`TaskLifecycleError::UpdateNotPersisted`] when the write
    /// fails.
    pub async fn complete(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.repository.find_by_id(task_id).await?;
        task.complete(&*self.clock);
        let completed = self.persist(task).await?;
        tracing::info!(%task_id, "task completed");
        Ok(completed)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the repository
    /// rejects the deletion, including when the task does not exist.
    pub async fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(task_id).await?;
        tracing::info!(%task_id, "task deleted");
        Ok(())
    }

    async fn persist(&self, task: Task) -> TaskLifecycleResult<Task> {
        match self.repository.update(&task).await {
            Ok(()) => Ok(task),
            Err(source) => Err(TaskLifecycleError::UpdateNotPersisted {
                task: Box::new(task),
                source,
            }),
        }
    }
}

/// Returns the requested value when it is non-empty and differs from
/// `current`.
fn requested(value: Option<String>, current: &str) -> Option<String> {
    value.filter(|candidate| !candidate.is_empty() && candidate != current)
}

fn requested_status(value: Option<&str>, task_id: TaskId) -> Option<TaskStatus> {
    let raw = value.filter(|candidate| !candidate.is_empty())?;
    match TaskStatus::try_from(raw) {
        Ok(status) => Some(status),
        Err(err) => {
            tracing::warn!(%task_id, error = %err, "ignoring unrecognised status in update");
            None
        }
    }
}
