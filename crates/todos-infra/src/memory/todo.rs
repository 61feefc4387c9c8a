use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use todos_core::domain::Todo;
use todos_core::error::RepoError;
use todos_core::ports::{BaseRepository, TodoRepository};

/// In-memory todo store using a HashMap with async RwLock.
pub struct InMemoryTodoRepository {
    store: RwLock<HashMap<Uuid, Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn sorted_by_creation(mut todos: Vec<Todo>) -> Vec<Todo> {
        todos.sort_by_key(|t| t.created_at);
        todos
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Todo, Uuid> for InMemoryTodoRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, todo: Todo) -> Result<Todo, RepoError> {
        let mut store = self.store.write().await;
        store.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&todo.id) {
            return Err(RepoError::NotFound);
        }

        store.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Todo>, RepoError> {
        let store = self.store.read().await;
        let todos = store
            .values()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect();
        Ok(Self::sorted_by_creation(todos))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepoError> {
        let store = self.store.read().await;
        Ok(Self::sorted_by_creation(store.values().cloned().collect()))
    }
}
