use crate::model::{CatalogEntity, EntityId, FeatureSet, NumField, Stocked};
use serde::Serialize;

///
/// FurnitureItem
///
/// A purchasable piece of furniture. `popularity` and `stock` are internal
/// and never serialized to clients.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FurnitureItem {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub price: u64,
    pub height: u64,
    pub width: u64,
    pub depth: u64,
    pub color: String,
    pub features: FeatureSet,
    pub kind: String,
    #[serde(skip)]
    pub popularity: i64,
    #[serde(skip)]
    pub stock: u64,
}

impl FurnitureItem {
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The three physical dimensions sorted ascending.
    #[must_use]
    pub fn sorted_dimensions(&self) -> [u64; 3] {
        let mut dims = [self.width, self.height, self.depth];
        dims.sort_unstable();

        dims
    }
}

impl CatalogEntity for FurnitureItem {
    const PATH: &'static str = "furniture";
    const BUCKET_FIELDS: &'static [NumField] = &[
        NumField::Price,
        NumField::Height,
        NumField::Width,
        NumField::Depth,
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn popularity(&self) -> i64 {
        self.popularity
    }

    fn list_price(&self) -> u64 {
        self.price
    }
}

impl Stocked for FurnitureItem {
    fn stock(&self) -> u64 {
        self.stock
    }

    fn with_stock(&self, stock: u64) -> Self {
        Self {
            stock,
            ..self.clone()
        }
    }
}
