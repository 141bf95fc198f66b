//! Persistence layer: synchronous key-value backends and the async entity store.
//!
//! # Responsibility
//! - Abstract the local key-value medium behind `KeyValueStorage`.
//! - Provide the generic `query/get/post/put/remove` collection contract.
//!
//! # Invariants
//! - A collection is one key holding the JSON array of all its entities.
//! - Writes always replace the whole array; there is no partial update.
//! - Lookups by id surface `StoreError::NotFound` instead of `Option`.

pub mod entity_store;
pub mod kv_storage;
