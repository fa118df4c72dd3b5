//! Module: db::predicate
//! Responsibility: the predicate AST handed to the backing store and its
//! reference evaluation over rows.
//! Does not own: bucket assignment (the backing store attaches bucket ids to
//! rows) or ordering/windowing (see `db::query`).

#[cfg(test)]
mod tests;

use crate::model::{
    NumField, TextField,
    furniture::FurnitureItem,
    geo::{BoundingBox, Coordinate, Polygon},
    space::Space,
};

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    And(Vec<Self>),
    Or(Vec<Self>),

    /// Row's attribute falls into the bucket with this id.
    InBucket { field: NumField, bucket: i64 },

    TextEq { field: TextField, value: String },

    HasFeature(String),

    InStock,

    AtLeast { field: NumField, value: u64 },

    WithinBox(BoundingBox),

    WithinPolygon(Polygon),
}

impl Predicate {
    /// Conjunction that flattens nested `And` nodes and drops `True`.
    #[must_use]
    pub fn and(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Self::True => {}
                Self::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Self::True,
            1 => flat.pop().unwrap_or(Self::True),
            _ => Self::And(flat),
        }
    }

    #[must_use]
    pub fn or(parts: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(parts.into_iter().collect())
    }

    #[must_use]
    pub const fn at_least(field: NumField, value: u64) -> Self {
        Self::AtLeast { field, value }
    }

    /// Evaluate against a row.
    #[must_use]
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> bool {
        match self {
            Self::True => true,
            Self::And(parts) => parts.iter().all(|p| p.eval(row)),
            Self::Or(parts) => parts.iter().any(|p| p.eval(row)),
            Self::InBucket { field, bucket } => row.bucket(*field) == Some(*bucket),
            Self::TextEq { field, value } => row.text(*field) == Some(value.as_str()),
            Self::HasFeature(tag) => row.has_feature(tag),
            Self::InStock => row.remaining_stock().is_some_and(|stock| stock > 0),
            Self::AtLeast { field, value } => row.num(*field).is_some_and(|v| v >= *value),
            Self::WithinBox(bbox) => row.location().is_some_and(|p| bbox.contains(p)),
            Self::WithinPolygon(polygon) => row.location().is_some_and(|p| polygon.contains(p)),
        }
    }
}

///
/// Row
///
/// Field access used by predicate evaluation. Attributes an entity does not
/// carry report `None` and never match.
///

pub trait Row {
    fn num(&self, field: NumField) -> Option<u64>;

    fn text(&self, field: TextField) -> Option<&str>;

    fn has_feature(&self, tag: &str) -> bool;

    fn remaining_stock(&self) -> Option<u64> {
        None
    }

    fn location(&self) -> Option<Coordinate> {
        None
    }

    /// Bucket id assigned by the backing store.
    fn bucket(&self, _field: NumField) -> Option<i64> {
        None
    }
}

impl Row for FurnitureItem {
    fn num(&self, field: NumField) -> Option<u64> {
        match field {
            NumField::Price => Some(self.price),
            NumField::Height => Some(self.height),
            NumField::Width => Some(self.width),
            NumField::Depth => Some(self.depth),
            NumField::Rent | NumField::DoorWidth | NumField::DoorHeight => None,
        }
    }

    fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Color => Some(&self.color),
            TextField::Kind => Some(&self.kind),
        }
    }

    fn has_feature(&self, tag: &str) -> bool {
        self.features.contains(tag)
    }

    fn remaining_stock(&self) -> Option<u64> {
        Some(self.stock)
    }
}

impl Row for Space {
    fn num(&self, field: NumField) -> Option<u64> {
        match field {
            NumField::Rent => Some(self.rent),
            NumField::DoorWidth => Some(self.door_width),
            NumField::DoorHeight => Some(self.door_height),
            NumField::Price | NumField::Height | NumField::Width | NumField::Depth => None,
        }
    }

    fn text(&self, _field: TextField) -> Option<&str> {
        None
    }

    fn has_feature(&self, tag: &str) -> bool {
        self.features.contains(tag)
    }

    fn location(&self) -> Option<Coordinate> {
        Some(Space::location(self))
    }
}
