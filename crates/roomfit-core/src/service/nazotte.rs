//! Lasso ("nazotte") query planning: a bounding-box pre-filter joined with
//! exact polygon containment.

use crate::{
    db::predicate::Predicate,
    error::ValidationError,
    model::geo::{BoundingBox, Coordinate, Polygon},
};

///
/// LassoQuery
///

#[derive(Clone, Debug, PartialEq)]
pub struct LassoQuery {
    pub bbox: BoundingBox,
    pub polygon: Polygon,
}

impl LassoQuery {
    /// The user-drawn ring is implicitly closed; at least one point is
    /// required.
    pub fn new(points: &[Coordinate]) -> Result<Self, ValidationError> {
        let polygon = Polygon::new(points.to_vec());
        let bbox = polygon
            .bounding_box()
            .ok_or(ValidationError::EmptyPolygon)?;

        Ok(Self { bbox, polygon })
    }

    /// Box first so stores with a spatial index can prune before the exact
    /// containment check.
    #[must_use]
    pub fn predicate(&self) -> Predicate {
        Predicate::and([
            Predicate::WithinBox(self.bbox),
            Predicate::WithinPolygon(self.polygon.clone()),
        ])
    }
}
