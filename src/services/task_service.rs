use std::sync::Arc;

use chrono::NaiveDateTime;
use mockable::Clock;
use tracing::info;

use crate::db::TaskStore;
use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, TaskId, TaskView, UpdateTaskRequest};

/// CRUD orchestration for tasks.
///
/// Holds only shared handles to its collaborators, so one instance can be
/// cloned into every request handler.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { store, clock }
    }

    pub async fn list(&self) -> Result<Vec<TaskView>, AppError> {
        let tasks = self.store.find_all().await?;
        let now = self.now();
        Ok(tasks
            .into_iter()
            .map(|task| TaskView::from_task(task, now))
            .collect())
    }

    pub async fn get(&self, id: TaskId) -> Result<TaskView, AppError> {
        let task = self.find_existing(id).await?;
        Ok(self.view(task))
    }

    /// Stores a new task stamped with the current clock time.
    pub async fn create(&self, req: CreateTaskRequest) -> Result<TaskView, AppError> {
        let new_task = req.into_new_task(self.now());
        let task = self.store.insert(new_task).await?;
        info!(task_id = task.id, "task created");
        Ok(self.view(task))
    }

    /// Replaces title, description and completion flag. Deadline and
    /// creation time keep their stored values.
    pub async fn update(&self, id: TaskId, req: UpdateTaskRequest) -> Result<TaskView, AppError> {
        let mut task = self.find_existing(id).await?;
        req.apply_to(&mut task);

        // a delete racing this update surfaces as StoreError::NotFound
        let task = self.store.save(task).await?;
        info!(task_id = id, completed = task.completed, "task updated");
        Ok(self.view(task))
    }

    pub async fn delete(&self, id: TaskId) -> Result<(), AppError> {
        if !self.store.exists_by_id(id).await? {
            return Err(AppError::NotFound(id));
        }

        self.store.delete_by_id(id).await?;
        info!(task_id = id, "task deleted");
        Ok(())
    }

    pub async fn health(&self) -> Result<(), AppError> {
        self.store.ping().await?;
        Ok(())
    }

    async fn find_existing(&self, id: TaskId) -> Result<Task, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    fn view(&self, task: Task) -> TaskView {
        TaskView::from_task(task, self.now())
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.local().naive_local()
    }
}
