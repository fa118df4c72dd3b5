use crate::{
    db::{
        backend::{BackendError, CatalogBackend, StockBackend},
        predicate::{Predicate, Row},
        query::{SortOrder, Window},
    },
    model::{
        CatalogEntity, EntityId, NumField, Stocked, TextField,
        condition::SearchConditionCatalog, furniture::FurnitureItem, geo::Coordinate,
    },
};
use log::debug;
use parking_lot::RwLock;
use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

///
/// MemoryBackend
///
/// In-process backing store. Rows carry the bucket ids computed from the
/// condition catalog at insert time, the same association a relational store
/// keeps in generated bucket columns.
///

pub struct MemoryBackend<E: CatalogEntity> {
    table: RwLock<BTreeMap<EntityId, IndexedRow<E>>>,
    conditions: Arc<SearchConditionCatalog>,
    unavailable: AtomicBool,
}

impl<E> MemoryBackend<E>
where
    E: CatalogEntity + Row,
{
    #[must_use]
    pub fn new(conditions: Arc<SearchConditionCatalog>) -> Self {
        Self {
            table: RwLock::new(BTreeMap::new()),
            conditions,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Build a backend pre-populated with `rows`.
    pub fn with_rows(
        conditions: Arc<SearchConditionCatalog>,
        rows: &[E],
    ) -> Result<Self, BackendError> {
        let backend = Self::new(conditions);
        backend.insert_batch(rows)?;

        Ok(backend)
    }

    /// Make every subsequent call fail with [`BackendError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Remove every row.
    pub fn clear(&self) {
        self.table.write().clear();
    }

    /// Read one row directly, bypassing predicates.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<E> {
        self.table.read().get(&id).map(|row| row.entity.clone())
    }

    fn check_available(&self) -> Result<(), BackendError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable(format!(
                "{} table is offline",
                E::PATH
            )));
        }

        Ok(())
    }

    fn index(&self, entity: E) -> IndexedRow<E> {
        let buckets = E::BUCKET_FIELDS
            .iter()
            .filter_map(|&field| {
                let value = entity.num(field)?;
                let bucket = self.conditions.range(field).bucket_of(value)?;

                Some((field, bucket))
            })
            .collect();

        IndexedRow { entity, buckets }
    }
}

impl<E> CatalogBackend<E> for MemoryBackend<E>
where
    E: CatalogEntity + Row,
{
    fn scan(&self) -> Result<Vec<E>, BackendError> {
        self.check_available()?;

        Ok(self
            .table
            .read()
            .values()
            .map(|row| row.entity.clone())
            .collect())
    }

    fn count(&self, predicate: &Predicate) -> Result<u64, BackendError> {
        self.check_available()?;
        let table = self.table.read();
        let matched = table.values().filter(|row| predicate.eval(*row)).count();

        Ok(u64::try_from(matched).unwrap_or(u64::MAX))
    }

    fn select_ids(
        &self,
        predicate: &Predicate,
        order: SortOrder,
        window: Window,
    ) -> Result<Vec<EntityId>, BackendError> {
        self.check_available()?;
        let table = self.table.read();
        let matched = table
            .values()
            .filter(|row| predicate.eval(*row))
            .map(|row| &row.entity);
        let ids = window.apply(order.sorted_ids(matched));
        debug!(
            "{} select: {order:?} offset={} limit={} -> {} ids",
            E::PATH,
            window.offset,
            window.limit,
            ids.len()
        );

        Ok(ids)
    }

    fn insert_batch(&self, rows: &[E]) -> Result<(), BackendError> {
        self.check_available()?;
        let mut table = self.table.write();

        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            let id = row.id();
            if table.contains_key(&id) || !seen.insert(id) {
                return Err(BackendError::DuplicateId {
                    entity: E::PATH,
                    id,
                });
            }
        }

        for row in rows {
            table.insert(row.id(), self.index(row.clone()));
        }

        Ok(())
    }
}

impl StockBackend for MemoryBackend<FurnitureItem> {
    fn decrement_stock(&self, id: EntityId) -> Result<Option<u64>, BackendError> {
        self.check_available()?;
        let mut table = self.table.write();

        let Some(row) = table.get_mut(&id) else {
            return Ok(None);
        };
        if row.entity.stock == 0 {
            return Ok(None);
        }

        let remaining = row.entity.stock - 1;
        row.entity = row.entity.with_stock(remaining);

        Ok(Some(remaining))
    }
}

///
/// IndexedRow
///

struct IndexedRow<E> {
    entity: E,
    buckets: Vec<(NumField, i64)>,
}

impl<E: Row> Row for IndexedRow<E> {
    fn num(&self, field: NumField) -> Option<u64> {
        self.entity.num(field)
    }

    fn text(&self, field: TextField) -> Option<&str> {
        self.entity.text(field)
    }

    fn has_feature(&self, tag: &str) -> bool {
        self.entity.has_feature(tag)
    }

    fn remaining_stock(&self) -> Option<u64> {
        self.entity.remaining_stock()
    }

    fn location(&self) -> Option<Coordinate> {
        self.entity.location()
    }

    fn bucket(&self, field: NumField) -> Option<i64> {
        self.buckets
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, bucket)| *bucket)
    }
}
