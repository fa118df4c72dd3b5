use crate::{db::cache::Listing, model::EntityId, obs::CacheCounters};
use dashmap::DashMap;
use log::debug;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

struct Memo<E> {
    generation: u64,
    rows: Listing<E>,
}

///
/// RecommendationCache
///
/// Per-furniture memo of compatible spaces. Entries are never invalidated
/// individually; only [`RecommendationCache::clear`] drops them.
///
/// Concurrent first computations for one id may both run; the first stored
/// listing wins and every caller receives that one. Each memo is tagged with
/// the generation it was computed in, and `clear` advances the generation,
/// so a computation that straddles a clear is served to its caller but never
/// kept.
///

pub struct RecommendationCache<E> {
    entries: DashMap<EntityId, Memo<E>>,
    generation: AtomicU64,
    counters: CacheCounters,
}

impl<E> RecommendationCache<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            generation: AtomicU64::new(0),
            counters: CacheCounters::default(),
        }
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<Listing<E>> {
        let generation = self.generation.load(Ordering::Acquire);

        self.entries
            .get(&id)
            .filter(|memo| memo.generation == generation)
            .map(|memo| Arc::clone(&memo.rows))
    }

    /// Number of memos from the current generation.
    #[must_use]
    pub fn len(&self) -> usize {
        let generation = self.generation.load(Ordering::Acquire);

        self.entries
            .iter()
            .filter(|memo| memo.generation == generation)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_or_compute<Err>(
        &self,
        id: EntityId,
        compute: impl FnOnce() -> Result<Vec<Arc<E>>, Err>,
    ) -> Result<Listing<E>, Err> {
        if let Some(rows) = self.get(id) {
            self.counters.record_hit();
            return Ok(rows);
        }

        // computed outside any shard guard so a slow backend never blocks
        // readers of unrelated ids
        self.counters.record_miss();
        let generation = self.generation.load(Ordering::Acquire);
        let rows: Listing<E> = compute()?.into();
        debug!("recommendations for {id} computed: {} rows", rows.len());

        let mut memo = self.entries.entry(id).or_insert_with(|| Memo {
            generation,
            rows: Arc::clone(&rows),
        });
        if memo.generation < generation {
            *memo = Memo {
                generation,
                rows: Arc::clone(&rows),
            };
        }

        // a clear that landed mid-compute leaves this result unshared
        if memo.generation == generation && self.generation.load(Ordering::Acquire) == generation
        {
            Ok(Arc::clone(&memo.rows))
        } else {
            Ok(rows)
        }
    }

    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.entries.clear();
        self.counters.record_invalidation();
    }

    pub(crate) const fn counters(&self) -> &CacheCounters {
        &self.counters
    }
}

impl<E> Default for RecommendationCache<E> {
    fn default() -> Self {
        Self::new()
    }
}
