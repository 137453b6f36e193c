#[cfg(test)]
mod tests {
    use super::super::todo_service::{ListOptions, TodoService, TodoServiceImpl};
    use crate::domain::{
        collection::SortOrder,
        repository::TodoRepository,
        todo::{NewTodo, Todo, TodoChanges, TodoId},
    };
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        items: Arc<Mutex<BTreeMap<i64, Todo>>>,
        deletes: Arc<Mutex<u32>>,
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> { Ok(()) }
        async fn reset(&self) -> Result<()> { self.items.lock().unwrap().clear(); Ok(()) }
        async fn list(&self) -> Result<Vec<Todo>> { Ok(self.items.lock().unwrap().values().cloned().collect()) }
        async fn todo_by_id(&self, id: TodoId) -> Result<Option<Todo>> { Ok(self.items.lock().unwrap().get(&id.0).cloned()) }
        async fn insert(&self, input: NewTodo) -> Result<Todo> {
            let mut map = self.items.lock().unwrap();
            let id = map.keys().next_back().map_or(1, |last| last + 1);
            let todo = Todo {
                id: TodoId(id),
                title: input.title,
                due: input.due,
                position: Some(input.position.unwrap_or(0)),
                completed: input.completed.unwrap_or(false),
                updated: Utc::now(),
            };
            map.insert(id, todo.clone());
            Ok(todo)
        }
        async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>> {
            let mut map = self.items.lock().unwrap();
            let Some(todo) = map.get_mut(&id.0) else { return Ok(None) };
            if let Some(t) = changes.title { todo.title = t; }
            if let Some(d) = changes.due { todo.due = Some(d); }
            if let Some(p) = changes.position { todo.position = Some(p); }
            if let Some(c) = changes.completed { todo.completed = c; }
            todo.updated = Utc::now();
            Ok(Some(todo.clone()))
        }
        async fn delete_by_id(&self, id: TodoId) -> Result<u64> {
            *self.deletes.lock().unwrap() += 1;
            Ok(self.items.lock().unwrap().remove(&id.0).map_or(0, |_| 1))
        }
    }

    async fn seeded() -> (InMemoryRepo, TodoServiceImpl<InMemoryRepo>) {
        let repo = InMemoryRepo::default();
        let service = TodoServiceImpl::new(repo.clone());
        for (title, position, completed) in [("a", 3, true), ("b", 1, false), ("c", 2, true)] {
            service
                .create(NewTodo { title: title.into(), position: Some(position), completed: Some(completed), ..Default::default() })
                .await
                .unwrap();
        }
        (repo, service)
    }

    fn titles(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.title.as_str()).collect()
    }

    #[tokio::test]
    async fn unit_create_and_get() {
        let service = TodoServiceImpl::new(InMemoryRepo::default());
        let created = service.create(NewTodo { title: "X".into(), ..Default::default() }).await.unwrap();
        assert_eq!(created.title, "X");
        assert!(!created.completed);
        let got = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(got.id, created.id);
    }

    #[tokio::test]
    async fn list_without_options_keeps_id_order() {
        let (_, service) = seeded().await;
        let todos = service.list(ListOptions::default()).await.unwrap();
        assert_eq!(titles(&todos), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn list_filters_then_sorts() {
        let (_, service) = seeded().await;
        let done = service
            .list(ListOptions { completed: Some(true), order: Some(SortOrder::Ascending) })
            .await
            .unwrap();
        assert_eq!(titles(&done), vec!["c", "a"]);

        let open = service.list(ListOptions { completed: Some(false), order: None }).await.unwrap();
        assert_eq!(titles(&open), vec!["b"]);

        let desc = service.list(ListOptions { completed: None, order: Some(SortOrder::Descending) }).await.unwrap();
        assert_eq!(titles(&desc), vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let (repo, service) = seeded().await;
        assert!(!service.delete(TodoId(99)).await.unwrap());
        assert_eq!(*repo.deletes.lock().unwrap(), 0);

        assert!(service.delete(TodoId(1)).await.unwrap());
        assert_eq!(*repo.deletes.lock().unwrap(), 1);
        assert!(service.get(TodoId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let (_, service) = seeded().await;
        let changes = TodoChanges { completed: Some(true), ..Default::default() };
        assert!(service.update(TodoId(42), changes).await.unwrap().is_none());
    }
}
