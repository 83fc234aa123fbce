//! In-memory repository for tests and local runs.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are allocated from a counter starting at 1 and are never
/// reused, even after deletion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Collects matching tasks newest first, breaking timestamp ties by the
/// later identifier.
fn newest_first<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut collected: Vec<Task> = tasks.cloned().collect();
    collected.sort_by_key(|task| Reverse((task.created_at(), task.id())));
    collected
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let state = self.read()?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(newest_first(state.tasks.values()))
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(newest_first(
            state.tasks.values().filter(|task| task.status() == status),
        ))
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write()?;
        state.last_id += 1;
        let id = TaskId::new(state.last_id);

        // Mirror the SQL adapter: the completion timestamp is not inserted.
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            created_at: task.created_at(),
            completed_at: None,
        });
        state.tasks.insert(id, stored);
        Ok(id)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id().ok_or(TaskRepositoryError::MissingIdentifier)?;
        let mut state = self.write()?;
        let slot = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        // The creation timestamp is fixed at insert time.
        let created_at = slot.created_at();
        *slot = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            created_at,
            completed_at: task.completed_at(),
        });
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
