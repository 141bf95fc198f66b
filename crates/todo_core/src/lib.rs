//! Core of the todo application.
//!
//! Layers, leaf first:
//! - `repo`: key-value backends and the generic async entity store.
//! - `service`: the todo collection contract (`TodoApi`).
//! - `state`: reducer-based and local view state bindings.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;

pub use config::{StoreConfig, DEFAULT_LIST_DELAY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{Entity, EntityId, DEFAULT_ID_LENGTH, ID_ALPHABET};
pub use model::todo::{validate_todo_text, Todo, TodoDraft, TodoValidationError};
pub use repo::entity_store::{EntityStore, StoreError, StoreResult};
pub use repo::kv_storage::{
    KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult,
};
pub use service::todo_service::{TodoApi, TodoService, TODO_KEY};
pub use state::local::TodoList;
pub use state::slice::{reduce, TodoAction, TodoState, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
