//! Module: db::store
//! Responsibility: the authoritative in-process snapshot of each catalog.
//! Does not own: persistence; callers publish only what the backing store
//! already confirmed.
//! Boundary: atomicity is per key. Readers never observe a torn entity, and
//! reads of several keys may interleave with concurrent writes.

mod entity;


pub use entity::{EntityStore, StockOutcome};
