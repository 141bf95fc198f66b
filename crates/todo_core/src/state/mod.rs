//! Presentation-side state bindings.
//!
//! Two interchangeable ways for a view to mirror the todo collection:
//! - `slice`: a reducer-driven container fed by async action thunks.
//! - `local`: per-view state that calls the service directly and also owns
//!   the add/edit form fields.
//!
//! Both reconcile their in-memory list from values returned by `TodoApi`
//! and never re-fetch after a mutation.

pub mod local;
pub mod slice;
