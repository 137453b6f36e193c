use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Executor, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{NewTodo, Todo, TodoChanges, TodoId},
};

use super::sparse::{self, ColumnValues};

const SCHEMA: &str = include_str!("../../sql/schema.sql");
const SEED: &str = include_str!("../../sql/insert.sql");
const LIST: &str = "SELECT id, title, due, position, completed, updated FROM todos ORDER BY id";
const BY_ID: &str = "SELECT id, title, due, position, completed, updated FROM todos WHERE id = ?1";

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&*self.pool).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS todos").execute(&mut *tx).await?;
        tracing::info!("table dropped");
        sqlx::query(SCHEMA).execute(&mut *tx).await?;
        tracing::info!("table created");
        (&mut *tx).execute(SEED).await?;
        tracing::info!("data added");
        tx.commit().await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query(LIST)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(row_to_todo).collect::<Result<_, _>>()?)
    }

    async fn todo_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(BY_ID)
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_todo).transpose()?)
    }

    async fn insert(&self, input: NewTodo) -> Result<Todo> {
        let mut query = sparse::insert_statement(ColumnValues::for_insert(&input));
        tracing::debug!(sql = query.sql(), "insert");
        let row = query.build().fetch_one(&*self.pool).await?;
        Ok(row_to_todo(&row)?)
    }

    async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>> {
        if self.todo_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut query = sparse::update_statement(id, ColumnValues::for_update(&changes, Utc::now()));
        tracing::debug!(sql = query.sql(), "update");
        // The row may have been deleted since the lookup above.
        let row = query.build().fetch_optional(&*self.pool).await?;
        Ok(row.as_ref().map(row_to_todo).transpose()?)
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        title: row.try_get("title")?,
        due: row.try_get("due")?,
        position: row.try_get("position")?,
        completed: row.try_get("completed")?,
        updated: row.try_get("updated")?,
    })
}
