//! Todo use-case service.
//!
//! # Responsibility
//! - Build new todos (not done, stamped with `createdAt`) and persist them.
//! - Return post-mutation values so callers can reconcile without re-fetching.
//!
//! # Invariants
//! - The service performs no content validation; callers reject empty text.
//! - All reads and writes go through one collection key.

use crate::model::entity::EntityId;
use crate::model::todo::{Todo, TodoDraft};
use crate::repo::entity_store::{EntityStore, StoreResult};
use crate::repo::kv_storage::KeyValueStorage;
use async_trait::async_trait;
use log::info;

/// Storage key of the todo collection.
pub const TODO_KEY: &str = "todo_db";

/// Contract the presentation layer calls into.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Full current collection, in insertion order.
    async fn load_todos(&self) -> StoreResult<Vec<Todo>>;
    /// Creates a not-done todo and returns it with its assigned id.
    async fn add_todo(&self, text: &str) -> StoreResult<Todo>;
    /// Replaces the stored todo with the same id.
    async fn update_todo(&self, todo: Todo) -> StoreResult<Todo>;
    /// Deletes a todo and echoes its id back.
    async fn remove_todo(&self, id: &EntityId) -> StoreResult<EntityId>;
}

/// `TodoApi` backed by an `EntityStore`.
pub struct TodoService<S: KeyValueStorage> {
    store: EntityStore<S>,
    collection: String,
}

impl<S: KeyValueStorage> TodoService<S> {
    /// Service over the standard `todo_db` collection.
    pub fn new(store: EntityStore<S>) -> Self {
        Self::with_collection(store, TODO_KEY)
    }

    pub fn with_collection(store: EntityStore<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn store(&self) -> &EntityStore<S> {
        &self.store
    }

    /// Looks up a single todo by id.
    pub async fn get_todo(&self, id: &EntityId) -> StoreResult<Todo> {
        self.store.get(&self.collection, id).await
    }
}

#[async_trait]
impl<S: KeyValueStorage> TodoApi for TodoService<S> {
    async fn load_todos(&self) -> StoreResult<Vec<Todo>> {
        let todos = self.store.query::<Todo>(&self.collection).await?;
        info!(
            "event=todos_load module=service status=ok collection={} count={}",
            self.collection,
            todos.len()
        );
        Ok(todos)
    }

    async fn add_todo(&self, text: &str) -> StoreResult<Todo> {
        let todo: Todo = self
            .store
            .post(&self.collection, TodoDraft::created_now(text))
            .await?;
        info!(
            "event=todo_add module=service status=ok collection={} id={}",
            self.collection, todo.id
        );
        Ok(todo)
    }

    async fn update_todo(&self, todo: Todo) -> StoreResult<Todo> {
        self.store.put(&self.collection, todo).await
    }

    async fn remove_todo(&self, id: &EntityId) -> StoreResult<EntityId> {
        self.store.remove::<Todo>(&self.collection, id).await?;
        info!(
            "event=todo_remove module=service status=ok collection={} id={id}",
            self.collection
        );
        Ok(id.clone())
    }
}
