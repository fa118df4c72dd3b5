//! Module: service::search
//! Responsibility: turning raw query parameters into typed searches and
//! their predicates, plus the page payload returned to clients.
//! Does not own: execution (see `Catalog::search_furniture` and
//! `Catalog::search_spaces`).

use crate::{
    db::{
        predicate::Predicate,
        query::{Pagination, parse_int},
    },
    error::ValidationError,
    model::{CatalogEntity, EntityId, NumField, TextField},
};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

///
/// SearchPage
///
/// One page of results plus the total number of matches.
///

#[derive(Clone, Debug, Serialize)]
pub struct SearchPage<E> {
    pub count: u64,
    pub items: Vec<Arc<E>>,
}

impl<E> SearchPage<E> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of the items on this page, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId>
    where
        E: CatalogEntity,
    {
        self.items.iter().map(|item| item.id()).collect()
    }
}

///
/// QueryParams
///
/// Raw query string pairs; the last occurrence of a name wins and empty
/// values count as absent.
///

struct QueryParams<'a>(HashMap<&'a str, &'a str>);

impl<'a> QueryParams<'a> {
    fn new(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.0.get(name).copied().filter(|value| !value.is_empty())
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn bucket(&self, name: &'static str) -> Result<Option<i64>, ValidationError> {
        self.get(name)
            .map(|raw| parse_int(name, Some(raw)))
            .transpose()
    }

    fn features(&self) -> Vec<String> {
        self.get("features")
            .map(|raw| {
                raw.split(',')
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parsed after the filters: a filterless query reports `NoFilter`
    /// whatever its paging parameters.
    fn pagination(&self) -> Result<Pagination, ValidationError> {
        Pagination::parse(self.0.get("page").copied(), self.0.get("perPage").copied())
    }
}

///
/// FurnitureSearch
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FurnitureSearch {
    pub price: Option<i64>,
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub depth: Option<i64>,
    pub kind: Option<String>,
    pub color: Option<String>,
    pub features: Vec<String>,
    pub pagination: Pagination,
}

impl FurnitureSearch {
    /// Build from query string pairs (`priceRangeId`, `heightRangeId`,
    /// `widthRangeId`, `depthRangeId`, `kind`, `color`, `features`, `page`,
    /// `perPage`).
    pub fn from_query<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ValidationError> {
        let params = QueryParams::new(pairs);

        let price = params.bucket("priceRangeId")?;
        let height = params.bucket("heightRangeId")?;
        let width = params.bucket("widthRangeId")?;
        let depth = params.bucket("depthRangeId")?;
        let kind = params.text("kind");
        let color = params.text("color");
        let features = params.features();

        let has_filter = [price, height, width, depth].iter().any(Option::is_some)
            || kind.is_some()
            || color.is_some()
            || !features.is_empty();
        if !has_filter {
            return Err(ValidationError::NoFilter);
        }

        Ok(Self {
            price,
            height,
            width,
            depth,
            kind,
            color,
            features,
            pagination: params.pagination()?,
        })
    }

    fn filter_count(&self) -> usize {
        [self.price, self.height, self.width, self.depth]
            .iter()
            .filter(|bucket| bucket.is_some())
            .count()
            + usize::from(self.kind.is_some())
            + usize::from(self.color.is_some())
            + self.features.len()
    }

    /// Filter predicate; sold-out items are always excluded.
    pub fn predicate(&self) -> Result<Predicate, ValidationError> {
        if self.filter_count() == 0 {
            return Err(ValidationError::NoFilter);
        }

        let buckets = [
            (NumField::Price, self.price),
            (NumField::Height, self.height),
            (NumField::Width, self.width),
            (NumField::Depth, self.depth),
        ]
        .into_iter()
        .filter_map(|(field, bucket)| Some(Predicate::InBucket { field, bucket: bucket? }));

        let texts = [(TextField::Kind, &self.kind), (TextField::Color, &self.color)]
            .into_iter()
            .filter_map(|(field, value)| {
                value.as_ref().map(|value| Predicate::TextEq {
                    field,
                    value: value.clone(),
                })
            });

        let features = self.features.iter().cloned().map(Predicate::HasFeature);

        Ok(Predicate::and(
            buckets
                .chain(texts)
                .chain(features)
                .chain(std::iter::once(Predicate::InStock)),
        ))
    }
}

///
/// SpaceSearch
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpaceSearch {
    pub door_height: Option<i64>,
    pub door_width: Option<i64>,
    pub rent: Option<i64>,
    pub features: Vec<String>,
    pub pagination: Pagination,
}

impl SpaceSearch {
    /// Build from query string pairs (`doorHeightRangeId`,
    /// `doorWidthRangeId`, `rentRangeId`, `features`, `page`, `perPage`).
    pub fn from_query<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ValidationError> {
        let params = QueryParams::new(pairs);

        let door_height = params.bucket("doorHeightRangeId")?;
        let door_width = params.bucket("doorWidthRangeId")?;
        let rent = params.bucket("rentRangeId")?;
        let features = params.features();

        let has_filter =
            [door_height, door_width, rent].iter().any(Option::is_some) || !features.is_empty();
        if !has_filter {
            return Err(ValidationError::NoFilter);
        }

        Ok(Self {
            door_height,
            door_width,
            rent,
            features,
            pagination: params.pagination()?,
        })
    }

    fn filter_count(&self) -> usize {
        [self.door_height, self.door_width, self.rent]
            .iter()
            .filter(|bucket| bucket.is_some())
            .count()
            + self.features.len()
    }

    pub fn predicate(&self) -> Result<Predicate, ValidationError> {
        if self.filter_count() == 0 {
            return Err(ValidationError::NoFilter);
        }

        let buckets = [
            (NumField::DoorHeight, self.door_height),
            (NumField::DoorWidth, self.door_width),
            (NumField::Rent, self.rent),
        ]
        .into_iter()
        .filter_map(|(field, bucket)| Some(Predicate::InBucket { field, bucket: bucket? }));

        let features = self.features.iter().cloned().map(Predicate::HasFeature);

        Ok(Predicate::and(buckets.chain(features)))
    }
}
