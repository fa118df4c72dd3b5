//! Module: service
//! Responsibility: the `Catalog` facade the HTTP collaborator calls.
//! Composes backends, entity stores, and caches into the public operations.
//! Does not own: request routing or response encoding.
//! Boundary: every failure leaves as [`Error`]; no-match is an empty success.

pub mod nazotte;
pub mod recommend;
pub mod search;


use crate::{
    config::Limits,
    db::{
        backend::{BackendError, CatalogBackend, StockBackend},
        cache::{CacheManager, Listing},
        predicate::Predicate,
        query::{SortOrder, Window},
        store::{EntityStore, StockOutcome},
    },
    error::{Error, InternalError, ValidationError},
    ingest::{parse_furniture_batch, parse_space_batch},
    model::{
        CatalogEntity, EntityId,
        condition::{FurnitureConditions, SearchConditionCatalog, SpaceConditions},
        furniture::FurnitureItem,
        geo::Coordinate,
        space::Space,
    },
    obs::CacheReport,
};
use log::{debug, info, warn};
use nazotte::LassoQuery;
use parking_lot::RwLock;
use search::{FurnitureSearch, SearchPage, SpaceSearch};
use std::sync::Arc;

///
/// Catalog
///
/// Furniture and space catalogs served from in-process snapshots.
///
/// The backends answer "which ids, in what order"; the entity stores answer
/// "what does that id look like". Furniture and space state never share a
/// lock, and every operation is safe to call from many threads at once.
///
/// Ingestion and purchases hold `writes` shared; `reset` holds it
/// exclusively, so a reload never discards rows committed during its scan.
///

pub struct Catalog {
    limits: Limits,
    conditions: Arc<SearchConditionCatalog>,
    furniture: EntityStore<FurnitureItem>,
    spaces: EntityStore<Space>,
    caches: CacheManager,
    furniture_backend: Arc<dyn StockBackend>,
    space_backend: Arc<dyn CatalogBackend<Space>>,
    writes: RwLock<()>,
}

impl Catalog {
    /// Build a catalog and load both entity stores from the backends.
    pub fn open(
        limits: Limits,
        conditions: Arc<SearchConditionCatalog>,
        furniture_backend: Arc<dyn StockBackend>,
        space_backend: Arc<dyn CatalogBackend<Space>>,
    ) -> Result<Self, Error> {
        let catalog = Self {
            limits,
            conditions,
            furniture: EntityStore::new(),
            spaces: EntityStore::new(),
            caches: CacheManager::new(),
            furniture_backend,
            space_backend,
            writes: RwLock::new(()),
        };
        catalog.reset()?;

        Ok(catalog)
    }

    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    #[must_use]
    pub fn furniture_conditions(&self) -> &FurnitureConditions {
        &self.conditions.furniture
    }

    #[must_use]
    pub fn space_conditions(&self) -> &SpaceConditions {
        &self.conditions.space
    }

    #[must_use]
    pub fn cache_report(&self) -> CacheReport {
        self.caches.report()
    }

    ///
    /// LIFECYCLE
    ///

    /// Clear every derived cache and reload both entity stores from the
    /// backends. A failing scan leaves the current state in place.
    pub fn reset(&self) -> Result<(), Error> {
        let _exclusive = self.writes.write();

        let furniture = self
            .furniture_backend
            .scan()
            .map_err(backend_failure(FurnitureItem::PATH, "scan"))?;
        let spaces = self
            .space_backend
            .scan()
            .map_err(backend_failure(Space::PATH, "scan"))?;
        let (furniture_rows, space_rows) = (furniture.len(), spaces.len());

        self.furniture.load_all(furniture);
        self.spaces.load_all(spaces);
        self.caches.reset();

        info!("catalog loaded: {furniture_rows} furniture, {space_rows} spaces");

        Ok(())
    }

    ///
    /// FURNITURE
    ///

    /// A furniture item that is still purchasable.
    pub fn furniture_detail(&self, id: EntityId) -> Result<Arc<FurnitureItem>, Error> {
        self.furniture
            .get(id)
            .filter(|item| item.is_in_stock())
            .ok_or_else(|| Error::not_found(FurnitureItem::PATH, id))
    }

    pub fn search_furniture(
        &self,
        search: &FurnitureSearch,
    ) -> Result<SearchPage<FurnitureItem>, Error> {
        let predicate = search.predicate()?;

        run_search(
            &*self.furniture_backend,
            &self.furniture,
            &predicate,
            search.pagination.window(),
        )
    }

    /// The cheapest in-stock furniture, price ascending.
    pub fn cheap_furniture(&self) -> Result<Listing<FurnitureItem>, Error> {
        self.caches.cheap_furniture().get_or_compute(|| {
            select_hydrated(
                &*self.furniture_backend,
                &self.furniture,
                &Predicate::InStock,
                SortOrder::ListPrice,
                Window::first(self.limits.low_price),
            )
        })
    }

    /// Buy one unit. A sold-out or unknown item reports `NotFound`.
    pub fn buy_furniture(&self, id: EntityId, email: Option<&str>) -> Result<(), Error> {
        require_email(email)?;

        let _shared = self.writes.read();
        let backend = &self.furniture_backend;
        let outcome = self
            .furniture
            .decrement_stock_with(id, |_| backend.decrement_stock(id))
            .map_err(backend_failure(FurnitureItem::PATH, "decrement"))?;

        match outcome {
            StockOutcome::Decremented { remaining } => {
                self.caches.invalidate_furniture();
                debug!("furniture {id} bought, {remaining} left");

                Ok(())
            }
            StockOutcome::NotFound | StockOutcome::Exhausted => {
                Err(Error::not_found(FurnitureItem::PATH, id))
            }
        }
    }

    /// Parse, persist, and publish a furniture batch. Returns the number of
    /// rows created.
    pub fn ingest_furniture<R, S>(&self, records: &[R]) -> Result<usize, Error>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let rows = parse_furniture_batch(records)?;

        let _shared = self.writes.read();
        self.furniture_backend
            .insert_batch(&rows)
            .map_err(backend_failure(FurnitureItem::PATH, "insert"))?;

        let created = rows.len();
        for row in rows {
            self.furniture.put(row);
        }
        self.caches.invalidate_furniture();
        info!("ingested {created} furniture rows");

        Ok(created)
    }

    ///
    /// SPACES
    ///

    pub fn space_detail(&self, id: EntityId) -> Result<Arc<Space>, Error> {
        self.spaces
            .get(id)
            .ok_or_else(|| Error::not_found(Space::PATH, id))
    }

    pub fn search_spaces(&self, search: &SpaceSearch) -> Result<SearchPage<Space>, Error> {
        let predicate = search.predicate()?;

        run_search(
            &*self.space_backend,
            &self.spaces,
            &predicate,
            search.pagination.window(),
        )
    }

    /// The cheapest spaces, rent ascending.
    pub fn cheap_spaces(&self) -> Result<Listing<Space>, Error> {
        self.caches.cheap_spaces().get_or_compute(|| {
            select_hydrated(
                &*self.space_backend,
                &self.spaces,
                &Predicate::True,
                SortOrder::ListPrice,
                Window::first(self.limits.low_price),
            )
        })
    }

    /// Spaces whose door admits the furniture item, most popular first.
    /// Unknown items yield (and memoize) an empty list.
    pub fn recommend_spaces(&self, furniture_id: EntityId) -> Result<Listing<Space>, Error> {
        self.caches
            .recommendations()
            .get_or_compute(furniture_id, || {
                let Some(item) = self.furniture.get(furniture_id) else {
                    debug!("recommendations for unknown furniture {furniture_id}");
                    return Ok(Vec::new());
                };

                select_hydrated(
                    &*self.space_backend,
                    &self.spaces,
                    &recommend::fit_predicate(&item),
                    SortOrder::Popularity,
                    Window::first(self.limits.recommend),
                )
            })
    }

    /// Spaces strictly inside the lasso drawn through `points`.
    pub fn search_spaces_in_polygon(
        &self,
        points: &[Coordinate],
    ) -> Result<SearchPage<Space>, Error> {
        let lasso = LassoQuery::new(points)?;
        let items = select_hydrated(
            &*self.space_backend,
            &self.spaces,
            &lasso.predicate(),
            SortOrder::Popularity,
            Window::first(self.limits.nazotte),
        )?;
        debug!(
            "lasso over {} points matched {} spaces",
            points.len(),
            items.len()
        );

        Ok(SearchPage {
            count: u64::try_from(items.len()).unwrap_or(u64::MAX),
            items,
        })
    }

    pub fn request_space_document(&self, id: EntityId, email: Option<&str>) -> Result<(), Error> {
        require_email(email)?;

        if self.spaces.contains(id) {
            Ok(())
        } else {
            Err(Error::not_found(Space::PATH, id))
        }
    }

    pub fn ingest_spaces<R, S>(&self, records: &[R]) -> Result<usize, Error>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let rows = parse_space_batch(records)?;

        let _shared = self.writes.read();
        self.space_backend
            .insert_batch(&rows)
            .map_err(backend_failure(Space::PATH, "insert"))?;

        let created = rows.len();
        for row in rows {
            self.spaces.put(row);
        }
        self.caches.invalidate_spaces();
        info!("ingested {created} space rows");

        Ok(created)
    }
}

// Count, then one ordered page of ids, then hydration from the store.
fn run_search<E, B>(
    backend: &B,
    store: &EntityStore<E>,
    predicate: &Predicate,
    window: Window,
) -> Result<SearchPage<E>, Error>
where
    E: CatalogEntity,
    B: CatalogBackend<E> + ?Sized,
{
    let count = backend
        .count(predicate)
        .map_err(backend_failure(E::PATH, "count"))?;
    if count == 0 {
        return Ok(SearchPage::empty());
    }

    let items = select_hydrated(backend, store, predicate, SortOrder::Popularity, window)?;

    Ok(SearchPage { count, items })
}

fn select_hydrated<E, B>(
    backend: &B,
    store: &EntityStore<E>,
    predicate: &Predicate,
    order: SortOrder,
    window: Window,
) -> Result<Vec<Arc<E>>, Error>
where
    E: CatalogEntity,
    B: CatalogBackend<E> + ?Sized,
{
    let ids = backend
        .select_ids(predicate, order, window)
        .map_err(backend_failure(E::PATH, "select"))?;
    if ids.len() > window.limit {
        return Err(InternalError::query_invariant(format!(
            "{} select returned {} ids for a window of {}",
            E::PATH,
            ids.len(),
            window.limit
        ))
        .into());
    }

    Ok(hydrate(store, &ids))
}

// An id the backend already holds but the store has not published yet
// belongs to an ingest still in flight; it is skipped, not an error.
fn hydrate<E: CatalogEntity>(store: &EntityStore<E>, ids: &[EntityId]) -> Vec<Arc<E>> {
    ids.iter()
        .filter_map(|&id| {
            let entity = store.get(id);
            if entity.is_none() {
                warn!("{} {id} not yet visible, skipped", E::PATH);
            }

            entity
        })
        .collect()
}

fn require_email(email: Option<&str>) -> Result<(), ValidationError> {
    match email {
        Some(email) if !email.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::MissingEmail),
    }
}

fn backend_failure(entity: &'static str, op: &'static str) -> impl Fn(BackendError) -> Error {
    move |err| {
        warn!("{entity} {op} failed: {err}");
        Error::Storage(err)
    }
}
