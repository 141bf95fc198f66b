//! Domain model shared by the store, service and state layers.
//!
//! # Responsibility
//! - Define the generic entity contract understood by the entity store.
//! - Define the todo record and its creation draft.
//!
//! # Invariants
//! - Every persisted entity carries a store-assigned `EntityId`.
//! - Ids are unique within one collection and never change after creation.

pub mod entity;
pub mod todo;
