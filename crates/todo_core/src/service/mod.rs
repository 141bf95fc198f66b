//! Todo use-case services.
//!
//! # Responsibility
//! - Bind the generic entity store to the `todo_db` collection.
//! - Expose the load/create/update/remove contract consumed by state layers.

pub mod todo_service;
