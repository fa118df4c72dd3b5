use crate::obs::CacheCounters;
use arc_swap::ArcSwapOption;
use log::debug;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

///
/// Listing
///
/// Shared, immutable result list handed out by the caches.
///

pub type Listing<E> = Arc<[Arc<E>]>;

struct Snapshot<E> {
    generation: u64,
    rows: Listing<E>,
}

///
/// LowPriceCache
///
/// Single slot holding the cheapest-first listing of one catalog.
///
/// Every invalidation bumps `generation`; a snapshot is served only while its
/// generation is current, so a recompute that raced an invalidation can never
/// resurface stale rows.
///

pub struct LowPriceCache<E> {
    name: &'static str,
    slot: ArcSwapOption<Snapshot<E>>,
    generation: AtomicU64,
    counters: CacheCounters,
}

impl<E> LowPriceCache<E> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: ArcSwapOption::empty(),
            generation: AtomicU64::new(0),
            counters: CacheCounters::default(),
        }
    }

    /// Current listing if it is still fresh.
    #[must_use]
    pub fn peek(&self) -> Option<Listing<E>> {
        let generation = self.generation.load(Ordering::Acquire);
        let guard = self.slot.load();

        (*guard)
            .as_ref()
            .filter(|snapshot| snapshot.generation == generation)
            .map(|snapshot| Arc::clone(&snapshot.rows))
    }

    /// Serve the cached listing or recompute it with `compute`.
    pub fn get_or_compute<Err>(
        &self,
        compute: impl FnOnce() -> Result<Vec<Arc<E>>, Err>,
    ) -> Result<Listing<E>, Err> {
        if let Some(rows) = self.peek() {
            self.counters.record_hit();
            return Ok(rows);
        }

        self.counters.record_miss();
        let generation = self.generation.load(Ordering::Acquire);
        let rows: Listing<E> = compute()?.into();
        debug!("{} recomputed: {} rows", self.name, rows.len());

        if self.generation.load(Ordering::Acquire) == generation {
            self.slot.store(Some(Arc::new(Snapshot {
                generation,
                rows: Arc::clone(&rows),
            })));
        }

        Ok(rows)
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.slot.store(None);
        self.counters.record_invalidation();
    }

    pub(crate) const fn counters(&self) -> &CacheCounters {
        &self.counters
    }
}
