use crate::model::{CatalogEntity, EntityId, Stocked};
use arc_swap::ArcSwap;
use dashmap::{DashMap, mapref::entry::Entry};
use parking_lot::Mutex;
use std::{collections::HashSet, convert::Infallible, sync::Arc};

///
/// EntityCell
///
/// One independently published entity. Readers load the current value
/// without locking; writers serialize on `write` so read-modify-write
/// sequences (stock decrement) never interleave for the same id.
///

struct EntityCell<E> {
    value: ArcSwap<E>,
    write: Mutex<()>,
}

impl<E> EntityCell<E> {
    fn new(entity: E) -> Self {
        Self {
            value: ArcSwap::from_pointee(entity),
            write: Mutex::new(()),
        }
    }
}

///
/// StockOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StockOutcome {
    Decremented { remaining: u64 },
    NotFound,
    Exhausted,
}

///
/// EntityStore
///
/// Concurrent id → entity map. Cells are sharded through `DashMap`, so
/// furniture and space stores (and unrelated ids within one store) never
/// contend on a shared lock.
///

pub struct EntityStore<E: CatalogEntity> {
    cells: DashMap<EntityId, Arc<EntityCell<E>>>,
}

impl<E: CatalogEntity> EntityStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<Arc<E>> {
        self.cell(id).map(|cell| cell.value.load_full())
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Insert or replace one entity under its own id.
    pub fn put(&self, entity: E) {
        let id = entity.id();

        // the shard guard is released before the cell guard is taken
        let existing = match self.cells.entry(id) {
            Entry::Occupied(occupied) => Arc::clone(occupied.get()),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(EntityCell::new(entity)));
                return;
            }
        };

        let _guard = existing.write.lock();
        existing.value.store(Arc::new(entity));
    }

    /// Replace the whole catalog. Each entity is published individually;
    /// ids absent from `entities` are dropped afterwards.
    pub fn load_all(&self, entities: impl IntoIterator<Item = E>) {
        let mut kept = HashSet::new();
        for entity in entities {
            kept.insert(entity.id());
            self.put(entity);
        }

        self.cells.retain(|id, _| kept.contains(id));
    }

    pub fn clear(&self) {
        self.cells.clear();
    }

    /// Every entity, ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<E>> {
        let mut rows: Vec<Arc<E>> = self
            .cells
            .iter()
            .map(|entry| entry.value().value.load_full())
            .collect();
        rows.sort_by_key(|row| row.id());

        rows
    }

    fn cell(&self, id: EntityId) -> Option<Arc<EntityCell<E>>> {
        self.cells.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}

impl<E: Stocked> EntityStore<E> {
    /// Decrement in memory only.
    pub fn decrement_stock(&self, id: EntityId) -> StockOutcome {
        let outcome = self.decrement_stock_with(id, |current| {
            Ok::<_, Infallible>(Some(current.saturating_sub(1)))
        });

        match outcome {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Decrement through `persist`, which receives the current stock and
    /// returns the remaining stock confirmed by the backing store (`None`
    /// when the store reports nothing left). The per-id guard is held across
    /// `persist`, and the published stock is always the confirmed value.
    pub fn decrement_stock_with<F, Err>(
        &self,
        id: EntityId,
        persist: F,
    ) -> Result<StockOutcome, Err>
    where
        F: FnOnce(u64) -> Result<Option<u64>, Err>,
    {
        let Some(cell) = self.cell(id) else {
            return Ok(StockOutcome::NotFound);
        };

        let _guard = cell.write.lock();
        let current = cell.value.load_full();
        if current.stock() == 0 {
            return Ok(StockOutcome::Exhausted);
        }

        match persist(current.stock())? {
            Some(remaining) => {
                cell.value.store(Arc::new(current.with_stock(remaining)));
                Ok(StockOutcome::Decremented { remaining })
            }
            None => {
                cell.value.store(Arc::new(current.with_stock(0)));
                Ok(StockOutcome::Exhausted)
            }
        }
    }
}

impl<E: CatalogEntity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
