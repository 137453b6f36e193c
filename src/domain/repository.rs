use async_trait::async_trait;
use super::todo::{NewTodo, Todo, TodoChanges, TodoId};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Creates the schema when it does not exist yet.
    async fn init(&self) -> anyhow::Result<()>;
    /// Drops the table, recreates the schema and loads the seed rows.
    async fn reset(&self) -> anyhow::Result<()>;
    /// All rows, ordered by id ascending.
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    async fn todo_by_id(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn insert(&self, input: NewTodo) -> anyhow::Result<Todo>;
    /// `Ok(None)` when no row has `id`; nothing is written in that case.
    async fn update(&self, id: TodoId, changes: TodoChanges) -> anyhow::Result<Option<Todo>>;
    /// Returns the number of removed rows. Callers check existence first.
    async fn delete_by_id(&self, id: TodoId) -> anyhow::Result<u64>;
}
