//! Storage collaborator for tasks.
//!
//! [`TaskStore`] is the only way the service touches persistence. Two
//! adapters ship with the crate: [`SqliteTaskStore`] for the running
//! server and [`InMemoryTaskStore`] for tests and throwaway instances.

pub mod memory;
pub mod repository;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewTask, Task, TaskId};

pub use memory::InMemoryTaskStore;
pub use repository::SqliteTaskStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The row vanished between lookup and write, or never existed.
    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task and returns it with its assigned id.
    async fn insert(&self, task: NewTask) -> StoreResult<Task>;

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// All tasks in storage order (ascending id).
    async fn find_all(&self) -> StoreResult<Vec<Task>>;

    async fn exists_by_id(&self, id: TaskId) -> StoreResult<bool>;

    /// Overwrites an existing task.
    ///
    /// Returns [`StoreError::NotFound`] when no row has `task.id`; a
    /// concurrently deleted task is never resurrected.
    async fn save(&self, task: Task) -> StoreResult<Task>;

    /// Returns [`StoreError::NotFound`] when nothing was deleted.
    async fn delete_by_id(&self, id: TaskId) -> StoreResult<()>;

    /// Cheap round trip used by the health check.
    async fn ping(&self) -> StoreResult<()>;
}
