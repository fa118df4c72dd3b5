//! Module: db
//! Responsibility: shared catalog state and the seams to the backing store.
//! Does not own: request parsing or operation contracts (see `service`).

pub mod backend;
pub mod cache;
pub mod predicate;
pub mod query;
pub mod store;
