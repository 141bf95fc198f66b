//! Local view state for a single todo list screen.
//!
//! # Responsibility
//! - Own the rendered list together with the add and inline-edit fields.
//! - Apply UI input rules before anything reaches the store.
//!
//! # Invariants
//! - Whitespace-only input never reaches `TodoApi`.
//! - Saving an empty edit leaves edit mode without a store call.
//! - The list is only changed with values returned by `TodoApi`.

use crate::model::entity::EntityId;
use crate::model::todo::{validate_todo_text, Todo};
use crate::repo::entity_store::{StoreError, StoreResult};
use crate::service::todo_service::TodoApi;
use log::debug;

/// Screen state for the local-state variant.
pub struct TodoList<A: TodoApi> {
    api: A,
    todos: Vec<Todo>,
    is_loading: bool,
    new_task_text: String,
    editing_id: Option<EntityId>,
    edit_text: String,
}

impl<A: TodoApi> TodoList<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            is_loading: false,
            new_task_text: String::new(),
            editing_id: None,
            edit_text: String::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn new_task_text(&self) -> &str {
        &self.new_task_text
    }

    pub fn editing_id(&self) -> Option<&EntityId> {
        self.editing_id.as_ref()
    }

    pub fn edit_text(&self) -> &str {
        &self.edit_text
    }

    /// Whether the "empty list" placeholder should show.
    pub fn is_empty_hint(&self) -> bool {
        !self.is_loading && self.todos.is_empty()
    }

    /// Initial load; replaces the list with the stored collection.
    pub async fn mount(&mut self) -> StoreResult<()> {
        self.is_loading = true;
        let result = self.api.load_todos().await;
        self.is_loading = false;
        self.todos = result?;
        Ok(())
    }

    pub fn set_new_task_text(&mut self, text: impl Into<String>) {
        self.new_task_text = text.into();
    }

    /// Creates a todo from the input field.
    ///
    /// Returns `Ok(None)` without touching the store when the input is blank.
    /// The input is cleared only after a successful create.
    pub async fn submit_new_task(&mut self) -> StoreResult<Option<Todo>> {
        if validate_todo_text(&self.new_task_text).is_err() {
            debug!("event=todo_submit module=state status=skipped reason=empty_text");
            return Ok(None);
        }

        let created = self.api.add_todo(&self.new_task_text).await?;
        self.todos.push(created.clone());
        self.new_task_text.clear();
        Ok(Some(created))
    }

    pub async fn toggle_done(&mut self, id: &EntityId) -> StoreResult<Todo> {
        let current = self.find(id)?.clone();
        let updated = self.api.update_todo(current.toggled()).await?;
        self.mirror(updated.clone());
        Ok(updated)
    }

    /// Enters edit mode for `id`, seeding the field with the current text.
    pub fn start_edit(&mut self, id: &EntityId) -> StoreResult<()> {
        let text = self.find(id)?.text.clone();
        self.editing_id = Some(id.clone());
        self.edit_text = text;
        Ok(())
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        self.edit_text = text.into();
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.edit_text.clear();
    }

    /// Persists the edit field onto the todo being edited.
    ///
    /// A blank field just leaves edit mode and returns `Ok(None)`. On store
    /// failure edit mode is kept so the user can retry.
    pub async fn save_edit(&mut self) -> StoreResult<Option<Todo>> {
        let Some(id) = self.editing_id.clone() else {
            return Ok(None);
        };
        if validate_todo_text(&self.edit_text).is_err() {
            self.cancel_edit();
            return Ok(None);
        }

        let current = self.find(&id)?.clone();
        let updated = self
            .api
            .update_todo(current.with_text(self.edit_text.clone()))
            .await?;
        self.mirror(updated.clone());
        self.cancel_edit();
        Ok(Some(updated))
    }

    pub async fn remove(&mut self, id: &EntityId) -> StoreResult<()> {
        let removed = self.api.remove_todo(id).await?;
        self.todos.retain(|todo| todo.id != removed);
        if self.editing_id.as_ref() == Some(&removed) {
            self.cancel_edit();
        }
        Ok(())
    }

    fn find(&self, id: &EntityId) -> StoreResult<&Todo> {
        self.todos
            .iter()
            .find(|todo| &todo.id == id)
            .ok_or_else(|| StoreError::NotFound {
                collection: "local view".to_string(),
                id: id.clone(),
            })
    }

    fn mirror(&mut self, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == updated.id) {
            *slot = updated;
        }
    }
}
