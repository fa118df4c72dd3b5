//! Module: model
//! Responsibility: catalog entity shapes and the vocabulary shared by stores,
//! backends, and the service layer.
//! Does not own: persistence, ordering, or cache lifecycle.

pub mod condition;
pub mod furniture;
pub mod geo;
pub mod space;

#[cfg(test)]
mod tests;

use derive_more::Deref;
use serde::{Serialize, Serializer};
use std::fmt::Debug;

///
/// EntityId
///
/// Identifier of a catalog object; unique within its catalog and immutable.
///

pub type EntityId = u64;

///
/// CatalogEntity
///
/// Behaviour every catalog object exposes to stores, caches, and backends.
///

pub trait CatalogEntity: Clone + Debug + Send + Sync + 'static {
    /// Stable catalog name used in logs and error messages.
    const PATH: &'static str;

    /// Numeric attributes the backing store discretizes into buckets.
    const BUCKET_FIELDS: &'static [NumField];

    fn id(&self) -> EntityId;

    /// Internal ranking score; never exposed to clients.
    fn popularity(&self) -> i64;

    /// Listing price used by the cheapest-first ordering (price or rent).
    fn list_price(&self) -> u64;
}

///
/// Stocked
///
/// Entities carrying a purchasable stock counter.
///

pub trait Stocked: CatalogEntity {
    fn stock(&self) -> u64;

    #[must_use]
    fn with_stock(&self, stock: u64) -> Self;
}

///
/// NumField
///
/// Numeric attributes addressable by predicates.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NumField {
    Price,
    Height,
    Width,
    Depth,
    Rent,
    DoorWidth,
    DoorHeight,
}

///
/// TextField
///
/// Categorical attributes matched by exact value.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextField {
    Color,
    Kind,
}

///
/// FeatureSet
///
/// Comma-joined feature tags. Membership is order-irrelevant; the raw text is
/// kept so serialization returns exactly what was ingested.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct FeatureSet {
    raw: String,
    #[deref]
    tags: Vec<String>,
}

impl FeatureSet {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let tags = raw
            .split(',')
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            raw: raw.to_string(),
            tags,
        }
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for FeatureSet {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
