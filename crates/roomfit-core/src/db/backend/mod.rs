//! Module: db::backend
//! Responsibility: the contract with the persistent store: indexed query,
//! batch write, and conditional stock decrement.
//! Does not own: entity snapshots or caches; the backend is never read for
//! hydration once ids are known.
//! Boundary: failures surface as [`BackendError`] and are never retried here.

mod memory;


pub use memory::MemoryBackend;

use crate::{
    db::{
        predicate::Predicate,
        query::{SortOrder, Window},
    },
    model::{CatalogEntity, EntityId, furniture::FurnitureItem},
};
use thiserror::Error as ThisError;

///
/// BackendError
///

#[derive(Debug, ThisError)]
pub enum BackendError {
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: EntityId },

    #[error("backing store query failed: {0}")]
    Query(String),
}

///
/// CatalogBackend
///
/// Indexed lookup and batch write over one catalog. Implementations own the
/// bucket association and geometry containment used by [`Predicate`].
///

pub trait CatalogBackend<E: CatalogEntity>: Send + Sync {
    /// Every stored row, in no particular order.
    fn scan(&self) -> Result<Vec<E>, BackendError>;

    /// Number of rows matching `predicate`.
    fn count(&self, predicate: &Predicate) -> Result<u64, BackendError>;

    /// Ids of matching rows, ordered and windowed.
    fn select_ids(
        &self,
        predicate: &Predicate,
        order: SortOrder,
        window: Window,
    ) -> Result<Vec<EntityId>, BackendError>;

    /// Persist a whole batch or nothing.
    fn insert_batch(&self, rows: &[E]) -> Result<(), BackendError>;
}

///
/// StockBackend
///
/// Furniture backend with an atomic conditional decrement.
///

pub trait StockBackend: CatalogBackend<FurnitureItem> {
    /// Decrement stock when it is positive.
    /// Returns the remaining stock, or `None` when the id is unknown or the
    /// stock was already zero.
    fn decrement_stock(&self, id: EntityId) -> Result<Option<u64>, BackendError>;
}
