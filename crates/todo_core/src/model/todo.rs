//! Todo domain model.
//!
//! # Responsibility
//! - Define the persisted todo record and its creation draft.
//! - Provide the text rule used by callers before reaching the store.
//!
//! # Invariants
//! - `id` is assigned by the entity store and never rewritten.
//! - Persisted `text` is never empty or whitespace-only; callers enforce it.
//! - Wire field names are camelCase (`isDone`, `createdAt`).

use crate::model::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// One to-do item as stored in the `todo_db` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: EntityId,
    pub text: String,
    pub is_done: bool,
    /// Unix epoch milliseconds. Absent for records created without a clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Todo {
    /// Returns a copy with the completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            is_done: !self.is_done,
            ..self.clone()
        }
    }

    /// Returns a copy carrying a new label.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// Todo fields supplied at creation time, before an id exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub text: String,
    pub is_done: bool,
    pub created_at: Option<i64>,
}

impl TodoDraft {
    /// Draft with `is_done = false` and no timestamp.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_done: false,
            created_at: None,
        }
    }

    /// Draft stamped with the current wall-clock time.
    pub fn created_now(text: impl Into<String>) -> Self {
        Self {
            created_at: Some(now_epoch_ms()),
            ..Self::new(text)
        }
    }
}

impl Entity for Todo {
    type Draft = TodoDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: TodoDraft) -> Self {
        Self {
            id,
            text: draft.text,
            is_done: draft.is_done,
            created_at: draft.created_at,
        }
    }
}

/// Input rule violations raised by presentation-side checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyText,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Checks that `text` has at least one non-whitespace character.
///
/// The text itself is kept as typed; only the emptiness check trims.
pub fn validate_todo_text(text: &str) -> Result<(), TodoValidationError> {
    if text.trim().is_empty() {
        return Err(TodoValidationError::EmptyText);
    }
    Ok(())
}

/// Current time in Unix epoch milliseconds; `0` if the clock predates 1970.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
