//! Reducer-based todo state container.
//!
//! # Responsibility
//! - Hold the application-wide todo list and loading flag.
//! - Turn async `TodoApi` calls into pending/fulfilled/rejected actions.
//!
//! # Invariants
//! - State changes only through `reduce`.
//! - A rejected mutation never changes the list.

use crate::model::entity::EntityId;
use crate::model::todo::Todo;
use crate::repo::entity_store::StoreResult;
use crate::service::todo_service::TodoApi;
use log::warn;

/// Snapshot rendered by views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub is_loading: bool,
    /// Last failure message, cleared by the next load.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    LoadPending,
    LoadFulfilled(Vec<Todo>),
    LoadRejected(String),
    AddFulfilled(Todo),
    UpdateFulfilled(Todo),
    RemoveFulfilled(EntityId),
    MutationRejected(String),
}

/// Applies one action to the state.
pub fn reduce(state: &mut TodoState, action: TodoAction) {
    match action {
        TodoAction::LoadPending => {
            state.is_loading = true;
            state.error = None;
        }
        TodoAction::LoadFulfilled(todos) => {
            state.is_loading = false;
            state.todos = todos;
        }
        TodoAction::LoadRejected(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        TodoAction::AddFulfilled(todo) => state.todos.push(todo),
        TodoAction::UpdateFulfilled(todo) => {
            if let Some(slot) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                *slot = todo;
            }
        }
        TodoAction::RemoveFulfilled(id) => state.todos.retain(|t| t.id != id),
        TodoAction::MutationRejected(message) => state.error = Some(message),
    }
}

/// Explicit store owned by the application for one session.
pub struct TodoStore<A: TodoApi> {
    api: A,
    state: TodoState,
}

impl<A: TodoApi> TodoStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: TodoState::default(),
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatch(&mut self, action: TodoAction) {
        reduce(&mut self.state, action);
    }

    pub async fn load_todos(&mut self) -> StoreResult<()> {
        self.dispatch(TodoAction::LoadPending);
        match self.api.load_todos().await {
            Ok(todos) => {
                self.dispatch(TodoAction::LoadFulfilled(todos));
                Ok(())
            }
            Err(err) => {
                warn!("event=todos_load module=state status=error error={err}");
                self.dispatch(TodoAction::LoadRejected(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn add_todo(&mut self, text: &str) -> StoreResult<Todo> {
        let result = self.api.add_todo(text).await;
        self.settle(result, TodoAction::AddFulfilled)
    }

    pub async fn update_todo(&mut self, todo: Todo) -> StoreResult<Todo> {
        let result = self.api.update_todo(todo).await;
        self.settle(result, TodoAction::UpdateFulfilled)
    }

    /// Flips `isDone` on `todo` and persists it.
    pub async fn toggle_done(&mut self, todo: &Todo) -> StoreResult<Todo> {
        self.update_todo(todo.toggled()).await
    }

    pub async fn remove_todo(&mut self, id: &EntityId) -> StoreResult<EntityId> {
        let result = self.api.remove_todo(id).await;
        self.settle(result, TodoAction::RemoveFulfilled)
    }

    fn settle<T: Clone>(
        &mut self,
        result: StoreResult<T>,
        fulfilled: fn(T) -> TodoAction,
    ) -> StoreResult<T> {
        match result {
            Ok(value) => {
                self.dispatch(fulfilled(value.clone()));
                Ok(value)
            }
            Err(err) => {
                warn!("event=todo_mutation module=state status=error error={err}");
                self.dispatch(TodoAction::MutationRejected(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, TodoAction, TodoState};
    use crate::model::entity::EntityId;
    use crate::model::todo::Todo;

    fn todo(id: &str, text: &str) -> Todo {
        Todo {
            id: EntityId::from(id),
            text: text.to_string(),
            is_done: false,
            created_at: None,
        }
    }

    #[test]
    fn load_cycle_toggles_loading_flag() {
        let mut state = TodoState::default();
        reduce(&mut state, TodoAction::LoadPending);
        assert!(state.is_loading);

        reduce(&mut state, TodoAction::LoadFulfilled(vec![todo("a", "one")]));
        assert!(!state.is_loading);
        assert_eq!(state.todos.len(), 1);

        reduce(&mut state, TodoAction::LoadPending);
        reduce(&mut state, TodoAction::LoadRejected("boom".to_string()));
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.todos.len(), 1);
    }

    #[test]
    fn update_replaces_in_place_and_ignores_unknown_ids() {
        let mut state = TodoState {
            todos: vec![todo("a", "one"), todo("b", "two"), todo("c", "three")],
            ..TodoState::default()
        };

        reduce(&mut state, TodoAction::UpdateFulfilled(todo("b", "TWO")));
        let texts: Vec<_> = state.todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["one", "TWO", "three"]);

        let before = state.clone();
        reduce(&mut state, TodoAction::UpdateFulfilled(todo("zz", "ghost")));
        assert_eq!(state, before);
    }

    #[test]
    fn add_appends_and_remove_filters_by_id() {
        let mut state = TodoState::default();
        reduce(&mut state, TodoAction::AddFulfilled(todo("a", "one")));
        reduce(&mut state, TodoAction::AddFulfilled(todo("b", "two")));
        reduce(&mut state, TodoAction::RemoveFulfilled(EntityId::from("a")));

        assert_eq!(state.todos, vec![todo("b", "two")]);
    }

    #[test]
    fn rejected_mutation_keeps_list() {
        let mut state = TodoState {
            todos: vec![todo("a", "one")],
            ..TodoState::default()
        };
        reduce(&mut state, TodoAction::MutationRejected("missing".to_string()));
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.error.as_deref(), Some("missing"));
    }
}
