//! Module: db::cache
//! Responsibility: derived listings (cheapest-first, fit recommendations)
//! and their lifecycle.
//! Does not own: how listings are computed; callers pass the computation in.
//! Boundary: single-writer-many-reader slots; a write replaces a whole value.

mod low_price;
mod recommend;


pub use low_price::{Listing, LowPriceCache};
pub use recommend::RecommendationCache;

use crate::{
    model::{furniture::FurnitureItem, space::Space},
    obs::CacheReport,
};
use log::info;

///
/// CacheManager
///
/// Owns every derived cache so invalidation and reset are explicit calls
/// rather than scattered global state.
///

pub struct CacheManager {
    cheap_furniture: LowPriceCache<FurnitureItem>,
    cheap_spaces: LowPriceCache<Space>,
    recommendations: RecommendationCache<Space>,
}

impl CacheManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cheap_furniture: LowPriceCache::new("cheap furniture"),
            cheap_spaces: LowPriceCache::new("cheap spaces"),
            recommendations: RecommendationCache::new(),
        }
    }

    #[must_use]
    pub const fn cheap_furniture(&self) -> &LowPriceCache<FurnitureItem> {
        &self.cheap_furniture
    }

    #[must_use]
    pub const fn cheap_spaces(&self) -> &LowPriceCache<Space> {
        &self.cheap_spaces
    }

    #[must_use]
    pub const fn recommendations(&self) -> &RecommendationCache<Space> {
        &self.recommendations
    }

    /// Furniture ingestion or a successful buy.
    pub fn invalidate_furniture(&self) {
        self.cheap_furniture.invalidate();
    }

    /// Space ingestion.
    pub fn invalidate_spaces(&self) {
        self.cheap_spaces.invalidate();
    }

    /// Drop every cached value and zero the counters.
    pub fn reset(&self) {
        self.cheap_furniture.invalidate();
        self.cheap_spaces.invalidate();
        self.recommendations.clear();

        self.cheap_furniture.counters().reset();
        self.cheap_spaces.counters().reset();
        self.recommendations.counters().reset();
        info!("caches reset");
    }

    #[must_use]
    pub fn report(&self) -> CacheReport {
        CacheReport {
            cheap_furniture: self.cheap_furniture.counters().snapshot(),
            cheap_spaces: self.cheap_spaces.counters().snapshot(),
            recommendations: self.recommendations.counters().snapshot(),
            recommendation_entries: self.recommendations.len(),
        }
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}
