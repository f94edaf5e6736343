use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::{StoreError, StoreResult, TaskStore};
use crate::models::{NewTask, Task, TaskId};

#[derive(Clone)]
pub struct SqliteTaskStore {
    db: SqlitePool,
}

impl SqliteTaskStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.db).await
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, task: NewTask) -> StoreResult<Task> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, completed, deadline, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.deadline)
        .bind(task.created_at)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        debug!(task_id = id, "inserted task row");
        Ok(task.into_task(id))
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, deadline, created_at
            FROM tasks
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(task)
    }

    async fn find_all(&self) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, deadline, created_at
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    async fn exists_by_id(&self, id: TaskId) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, task: Task) -> StoreResult<Task> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?1, description = ?2, completed = ?3, deadline = ?4, created_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.deadline)
        .bind(task.created_at)
        .bind(task.id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(task.id));
        }

        debug!(task_id = task.id, "updated task row");
        Ok(task)
    }

    async fn delete_by_id(&self, id: TaskId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!(task_id = id, "deleted task row");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}
