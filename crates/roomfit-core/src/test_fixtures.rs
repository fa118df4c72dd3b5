use crate::{
    config::Limits,
    db::backend::MemoryBackend,
    model::{
        EntityId, FeatureSet, condition::SearchConditionCatalog, furniture::FurnitureItem,
        space::Space,
    },
    service::Catalog,
};
use std::sync::Arc;

/// A mid-sized in-stock chair; override fields with struct update syntax.
pub(crate) fn chair(id: EntityId) -> FurnitureItem {
    FurnitureItem {
        id,
        name: format!("chair {id}"),
        description: format!("description of chair {id}"),
        thumbnail: format!("/images/chair/{id}.png"),
        price: 5000,
        height: 100,
        width: 60,
        depth: 70,
        color: "黒".to_string(),
        features: FeatureSet::parse("肘掛け"),
        kind: "座椅子".to_string(),
        popularity: 0,
        stock: 5,
    }
}

/// A space in central Tokyo with a 100x100 door.
pub(crate) fn estate(id: EntityId) -> Space {
    Space {
        id,
        name: format!("estate {id}"),
        description: format!("description of estate {id}"),
        thumbnail: format!("/images/estate/{id}.png"),
        address: format!("{id} Chiyoda, Tokyo"),
        latitude: 35.68,
        longitude: 139.76,
        rent: 80_000,
        door_height: 100,
        door_width: 100,
        features: FeatureSet::parse("エアコン付き"),
        popularity: 0,
    }
}

/// The furniture record fields for `item`, in ingestion order.
pub(crate) fn chair_record(item: &FurnitureItem) -> Vec<String> {
    vec![
        item.id.to_string(),
        item.name.clone(),
        item.description.clone(),
        item.thumbnail.clone(),
        item.price.to_string(),
        item.height.to_string(),
        item.width.to_string(),
        item.depth.to_string(),
        item.color.clone(),
        item.features.as_str().to_string(),
        item.kind.clone(),
        item.popularity.to_string(),
        item.stock.to_string(),
    ]
}

/// The space record fields for `space`, in ingestion order.
pub(crate) fn estate_record(space: &Space) -> Vec<String> {
    vec![
        space.id.to_string(),
        space.name.clone(),
        space.description.clone(),
        space.thumbnail.clone(),
        space.address.clone(),
        space.latitude.to_string(),
        space.longitude.to_string(),
        space.rent.to_string(),
        space.door_height.to_string(),
        space.door_width.to_string(),
        space.features.as_str().to_string(),
        space.popularity.to_string(),
    ]
}

///
/// Fixture
///
/// A catalog over in-memory backends, with the backends kept reachable for
/// failure injection and direct inspection.
///

pub(crate) struct Fixture {
    pub(crate) catalog: Catalog,
    pub(crate) furniture: Arc<MemoryBackend<FurnitureItem>>,
    pub(crate) spaces: Arc<MemoryBackend<Space>>,
}

pub(crate) fn fixture(furniture: &[FurnitureItem], spaces: &[Space]) -> Fixture {
    fixture_with_limits(Limits::default(), furniture, spaces)
}

pub(crate) fn fixture_with_limits(
    limits: Limits,
    furniture: &[FurnitureItem],
    spaces: &[Space],
) -> Fixture {
    let conditions = Arc::new(SearchConditionCatalog::standard());
    let furniture = Arc::new(
        MemoryBackend::with_rows(Arc::clone(&conditions), furniture)
            .expect("furniture fixture rows should insert"),
    );
    let spaces = Arc::new(
        MemoryBackend::with_rows(Arc::clone(&conditions), spaces)
            .expect("space fixture rows should insert"),
    );

    let catalog = Catalog::open(
        limits,
        conditions,
        Arc::clone(&furniture) as _,
        Arc::clone(&spaces) as _,
    )
    .expect("catalog should open over fixture backends");

    Fixture {
        catalog,
        furniture,
        spaces,
    }
}
