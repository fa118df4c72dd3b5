use crate::model::{CatalogEntity, EntityId, FeatureSet, NumField, geo::Coordinate};
use serde::Serialize;

///
/// Space
///
/// A rentable space with a geographic location and a door opening.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rent: u64,
    pub door_height: u64,
    pub door_width: u64,
    pub features: FeatureSet,
    #[serde(skip)]
    pub popularity: i64,
}

impl Space {
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl CatalogEntity for Space {
    const PATH: &'static str = "space";
    const BUCKET_FIELDS: &'static [NumField] =
        &[NumField::Rent, NumField::DoorWidth, NumField::DoorHeight];

    fn id(&self) -> EntityId {
        self.id
    }

    fn popularity(&self) -> i64 {
        self.popularity
    }

    fn list_price(&self) -> u64 {
        self.rent
    }
}
