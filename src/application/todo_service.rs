use crate::domain::collection::{self, FilterOptions, SortOptions, SortOrder};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{NewTodo, Todo, TodoChanges, TodoId};
use anyhow::Result;
use async_trait::async_trait;

/// How the list endpoint reshapes the stored rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub completed: Option<bool>,
    pub order: Option<SortOrder>,
}

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self, options: ListOptions) -> Result<Vec<Todo>>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn create(&self, input: NewTodo) -> Result<Todo>;
    async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>>;
    /// `false` when there was nothing to delete.
    async fn delete(&self, id: TodoId) -> Result<bool>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self, options: ListOptions) -> Result<Vec<Todo>> {
        let mut todos = self.repo.list().await?;
        if let Some(completed) = options.completed {
            todos = collection::filter_by_completed(todos, FilterOptions { invert: !completed });
        }
        if let Some(order) = options.order {
            todos = collection::sort_by_position(todos, SortOptions::from(order));
        }
        Ok(todos)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> { self.repo.todo_by_id(id).await }

    async fn create(&self, input: NewTodo) -> Result<Todo> { self.repo.insert(input).await }

    async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>> {
        self.repo.update(id, changes).await
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        if self.repo.todo_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_by_id(id).await?;
        Ok(true)
    }
}
