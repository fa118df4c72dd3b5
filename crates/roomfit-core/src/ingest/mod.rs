//! Module: ingest
//! Responsibility: conversion of fixed-arity text records into catalog
//! entities.
//! Does not own: file framing (records arrive already split into fields) or
//! persistence and publication (see `service`).
//! Boundary: the first failing record or field rejects the whole batch.


use crate::model::{EntityId, FeatureSet, furniture::FurnitureItem, space::Space};
use std::str::FromStr;
use thiserror::Error as ThisError;

/// Field order of a furniture record.
pub const FURNITURE_FIELDS: [&str; 13] = [
    "id",
    "name",
    "description",
    "thumbnail",
    "price",
    "height",
    "width",
    "depth",
    "color",
    "features",
    "kind",
    "popularity",
    "stock",
];

/// Field order of a space record.
pub const SPACE_FIELDS: [&str; 12] = [
    "id",
    "name",
    "description",
    "thumbnail",
    "address",
    "latitude",
    "longitude",
    "rent",
    "door_height",
    "door_width",
    "features",
    "popularity",
];

///
/// ParseError
///

#[derive(Debug, ThisError)]
pub enum ParseError {
    #[error("record {record}: expected {expected} fields, found {found}")]
    Arity {
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {record}: field '{field}' expects {expected}, got '{value}'")]
    Field {
        record: usize,
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

///
/// RecordReader
///
/// Strict left-to-right cursor over one record's fields.
///

struct RecordReader<'a, S> {
    record: usize,
    names: &'static [&'static str],
    fields: &'a [S],
    offset: usize,
}

impl<'a, S: AsRef<str>> RecordReader<'a, S> {
    fn new(
        record: usize,
        names: &'static [&'static str],
        fields: &'a [S],
    ) -> Result<Self, ParseError> {
        if fields.len() != names.len() {
            return Err(ParseError::Arity {
                record,
                expected: names.len(),
                found: fields.len(),
            });
        }

        Ok(Self {
            record,
            names,
            fields,
            offset: 0,
        })
    }

    fn next_str(&mut self) -> (&'static str, &'a str) {
        let at = self.offset;
        self.offset += 1;

        (self.names[at], self.fields[at].as_ref())
    }

    fn next_string(&mut self) -> String {
        self.next_str().1.to_string()
    }

    fn next_parsed<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        self.next_checked(expected, |_| true)
    }

    /// Parse the next field and reject values failing `valid`.
    fn next_checked<T: FromStr>(
        &mut self,
        expected: &'static str,
        valid: impl FnOnce(&T) -> bool,
    ) -> Result<T, ParseError> {
        let (field, raw) = self.next_str();

        raw.parse()
            .ok()
            .filter(valid)
            .ok_or_else(|| ParseError::Field {
                record: self.record,
                field,
                expected,
                value: raw.to_string(),
            })
    }

    fn next_id(&mut self) -> Result<EntityId, ParseError> {
        self.next_parsed("a non-negative integer")
    }

    fn next_count(&mut self) -> Result<u64, ParseError> {
        self.next_parsed("a non-negative integer")
    }

    // item and door sizes; zero is not a physical size
    fn next_dimension(&mut self) -> Result<u64, ParseError> {
        self.next_checked("a positive integer", |&n: &u64| n > 0)
    }

    fn next_int(&mut self) -> Result<i64, ParseError> {
        self.next_parsed("an integer")
    }

    fn next_coordinate(&mut self) -> Result<f64, ParseError> {
        self.next_checked("a finite number", |n: &f64| n.is_finite())
    }
}

/// Parse one furniture record (13 fields).
pub fn parse_furniture<S: AsRef<str>>(
    record: usize,
    fields: &[S],
) -> Result<FurnitureItem, ParseError> {
    let mut r = RecordReader::new(record, &FURNITURE_FIELDS, fields)?;

    Ok(FurnitureItem {
        id: r.next_id()?,
        name: r.next_string(),
        description: r.next_string(),
        thumbnail: r.next_string(),
        price: r.next_count()?,
        height: r.next_dimension()?,
        width: r.next_dimension()?,
        depth: r.next_dimension()?,
        color: r.next_string(),
        features: FeatureSet::parse(r.next_str().1),
        kind: r.next_string(),
        popularity: r.next_int()?,
        stock: r.next_count()?,
    })
}

/// Parse one space record (12 fields).
pub fn parse_space<S: AsRef<str>>(record: usize, fields: &[S]) -> Result<Space, ParseError> {
    let mut r = RecordReader::new(record, &SPACE_FIELDS, fields)?;

    Ok(Space {
        id: r.next_id()?,
        name: r.next_string(),
        description: r.next_string(),
        thumbnail: r.next_string(),
        address: r.next_string(),
        latitude: r.next_coordinate()?,
        longitude: r.next_coordinate()?,
        rent: r.next_count()?,
        door_height: r.next_dimension()?,
        door_width: r.next_dimension()?,
        features: FeatureSet::parse(r.next_str().1),
        popularity: r.next_int()?,
    })
}

/// Parse a whole furniture batch; any failure rejects the batch.
pub fn parse_furniture_batch<R, S>(records: &[R]) -> Result<Vec<FurnitureItem>, ParseError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    records
        .iter()
        .enumerate()
        .map(|(i, record)| parse_furniture(i, record.as_ref()))
        .collect()
}

/// Parse a whole space batch; any failure rejects the batch.
pub fn parse_space_batch<R, S>(records: &[R]) -> Result<Vec<Space>, ParseError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    records
        .iter()
        .enumerate()
        .map(|(i, record)| parse_space(i, record.as_ref()))
        .collect()
}
