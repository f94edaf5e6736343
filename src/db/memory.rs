use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::db::{StoreError, StoreResult, TaskStore};
use crate::models::{NewTask, Task, TaskId};

/// Thread-safe task store backed by a `BTreeMap`, so iteration order
/// matches id order like the SQLite adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: TaskId,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: NewTask) -> StoreResult<Task> {
        let mut state = self.write()?;
        // ids are never reused, even after deletes
        state.last_id += 1;
        let task = task.into_task(state.last_id);
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.read()?.tasks.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: TaskId) -> StoreResult<bool> {
        Ok(self.read()?.tasks.contains_key(&id))
    }

    async fn save(&self, task: Task) -> StoreResult<Task> {
        let mut state = self.write()?;
        let slot = state
            .tasks
            .get_mut(&task.id)
            .ok_or(StoreError::NotFound(task.id))?;
        *slot = task.clone();
        Ok(task)
    }

    async fn delete_by_id(&self, id: TaskId) -> StoreResult<()> {
        self.write()?
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.read().map(|_| ())
    }
}
