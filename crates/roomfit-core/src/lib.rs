//! Core runtime for roomfit: catalog entities, the in-memory entity stores,
//! derived caches, bucketed search, fit recommendations, lasso queries, and
//! bulk ingestion.
//!
//! The HTTP layer and the persistent store are collaborators. The HTTP layer
//! calls the operations on [`service::Catalog`]; the persistent store is
//! reached only through [`db::backend::CatalogBackend`].
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod model;
pub mod obs;
pub mod service;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// CONSTANTS
///

/// Default size of the cheapest-first listing for each catalog.
pub const LOW_PRICE_LIMIT: usize = 20;

/// Default cap on fit recommendations returned for one furniture item.
pub const RECOMMEND_LIMIT: usize = 20;

/// Default cap on spaces returned by one lasso query.
pub const NAZOTTE_LIMIT: usize = 50;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or backends are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{
            EntityId,
            condition::SearchConditionCatalog,
            furniture::FurnitureItem,
            geo::{BoundingBox, Coordinate, Polygon},
            space::Space,
        },
        service::{
            Catalog,
            search::{FurnitureSearch, SearchPage, SpaceSearch},
        },
    };
}
