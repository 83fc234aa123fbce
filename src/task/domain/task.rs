//! Task record and its two-state lifecycle.

use super::{ParseTaskStatusError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open.
    New,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            // "done" is the literal older clients send.
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work tracked by the board.
///
/// A task created with [`Task::new`] has no identifier until the repository
/// stores it. `completed_at` is set only by an explicit transition into
/// [`TaskStatus::Completed`] and cleared when the task is reopened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<TaskId>,
    title: String,
    description: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: String,
    /// Stored lifecycle status.
    pub status: TaskStatus,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new, not yet stored task in the [`TaskStatus::New`] state.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            status: TaskStatus::New,
            created_at: clock.utc(),
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: Some(data.id),
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier, or `None` before the task is stored.
    #[must_use]
    pub const fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Marks the task completed, stamping `completed_at` with the clock time.
    ///
    /// Completing an already completed task refreshes the timestamp.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(clock.utc());
    }

    /// Returns the task to [`TaskStatus::New`] and clears `completed_at`.
    pub const fn reopen(&mut self) {
        self.status = TaskStatus::New;
        self.completed_at = None;
    }

    /// Moves the task into `status`, maintaining the completion timestamp.
    pub fn transition_to(&mut self, status: TaskStatus, clock: &impl Clock) {
        match status {
            TaskStatus::Completed => self.complete(clock),
            TaskStatus::New => self.reopen(),
        }
    }
}
