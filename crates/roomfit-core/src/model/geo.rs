//! Geographic primitives for lasso queries.
//!
//! Latitude is treated as the x axis and longitude as the y axis; the
//! polygon arithmetic is planar and makes no attempt at great-circle
//! correctness.

use derive_more::IntoIterator;
use serde::{Deserialize, Serialize};

///
/// Coordinate
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

///
/// BoundingBox
///
/// Axis-aligned box; `min` holds the smallest latitude and longitude,
/// `max` the largest. Containment is inclusive on every edge.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    /// Box spanning every supplied point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self {
            min: *first,
            max: *first,
        };

        for point in rest {
            bbox.min.latitude = bbox.min.latitude.min(point.latitude);
            bbox.min.longitude = bbox.min.longitude.min(point.longitude);
            bbox.max.latitude = bbox.max.latitude.max(point.latitude);
            bbox.max.longitude = bbox.max.longitude.max(point.longitude);
        }

        Some(bbox)
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.latitude >= self.min.latitude
            && point.latitude <= self.max.latitude
            && point.longitude >= self.min.longitude
            && point.longitude <= self.max.longitude
    }
}

///
/// Polygon
///
/// Ordered vertices of a closed region; the last vertex connects back to the
/// first. Containment is strict: boundary points are outside, and a polygon
/// with fewer than three vertices has no interior.
///

#[derive(Clone, Debug, IntoIterator, PartialEq)]
pub struct Polygon(#[into_iterator(owned, ref)] Vec<Coordinate>);

impl Polygon {
    #[must_use]
    pub const fn new(vertices: Vec<Coordinate>) -> Self {
        Self(vertices)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.0)
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        let vertices = &self.0;
        if vertices.len() < 3 {
            return false;
        }

        let edges = || {
            vertices
                .iter()
                .zip(vertices.iter().cycle().skip(1))
                .map(|(a, b)| (*a, *b))
        };

        if edges().any(|(a, b)| on_segment(point, a, b)) {
            return false;
        }

        // even-odd ray cast along +latitude
        let (x, y) = (point.latitude, point.longitude);
        let mut inside = false;
        for (a, b) in edges() {
            let (ax, ay) = (a.latitude, a.longitude);
            let (bx, by) = (b.latitude, b.longitude);
            if (ay > y) != (by > y) {
                let cross_x = (bx - ax) * (y - ay) / (by - ay) + ax;
                if x < cross_x {
                    inside = !inside;
                }
            }
        }

        inside
    }
}

impl From<Vec<Coordinate>> for Polygon {
    fn from(vertices: Vec<Coordinate>) -> Self {
        Self(vertices)
    }
}

fn on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    let cross = (b.latitude - a.latitude) * (p.longitude - a.longitude)
        - (b.longitude - a.longitude) * (p.latitude - a.latitude);
    if cross.abs() > f64::EPSILON {
        return false;
    }

    p.latitude >= a.latitude.min(b.latitude)
        && p.latitude <= a.latitude.max(b.latitude)
        && p.longitude >= a.longitude.min(b.longitude)
        && p.longitude <= a.longitude.max(b.longitude)
}
