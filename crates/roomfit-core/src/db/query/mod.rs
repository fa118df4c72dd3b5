//! Module: db::query
//! Responsibility: result ordering and offset windows shared by the backing
//! store contract and the service layer.


use crate::{
    error::ValidationError,
    model::{CatalogEntity, EntityId},
};
use std::cmp::Ordering;

///
/// SortOrder
///
/// Every order breaks ties by ascending id, so results are total and stable.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    /// Descending popularity.
    Popularity,
    /// Ascending price or rent.
    ListPrice,
}

impl SortOrder {
    #[must_use]
    pub fn compare<E: CatalogEntity>(self, a: &E, b: &E) -> Ordering {
        let primary = match self {
            Self::Popularity => b.popularity().cmp(&a.popularity()),
            Self::ListPrice => a.list_price().cmp(&b.list_price()),
        };

        primary.then_with(|| a.id().cmp(&b.id()))
    }

    /// Sort and return ids only.
    #[must_use]
    pub fn sorted_ids<'a, E, I>(self, rows: I) -> Vec<EntityId>
    where
        E: CatalogEntity,
        I: IntoIterator<Item = &'a E>,
    {
        let mut rows: Vec<&E> = rows.into_iter().collect();
        rows.sort_by(|a, b| self.compare(*a, *b));

        rows.into_iter().map(CatalogEntity::id).collect()
    }
}

///
/// Window
///
/// Offset/limit slice applied after ordering.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    #[must_use]
    pub const fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Apply this window to an already ordered sequence.
    pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

///
/// Pagination
///
/// Zero-based page index and a positive page size.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Result<Self, ValidationError> {
        let page = usize::try_from(page).map_err(|_| ValidationError::NegativePage(page))?;
        let per_page = match usize::try_from(per_page) {
            Ok(n) if n > 0 => n,
            _ => return Err(ValidationError::PerPageNotPositive(per_page)),
        };

        Ok(Self { page, per_page })
    }

    /// Parse raw query parameters; both must be integers.
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Result<Self, ValidationError> {
        let page = parse_int("page", page)?;
        let per_page = parse_int("perPage", per_page)?;

        Self::new(page, per_page)
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    #[must_use]
    pub const fn window(&self) -> Window {
        Window {
            offset: self.page.saturating_mul(self.per_page),
            limit: self.per_page,
        }
    }
}

pub(crate) fn parse_int(param: &'static str, raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingParam { param })?;

    raw.parse().map_err(|_| ValidationError::NotAnInteger {
        param,
        value: raw.to_string(),
    })
}
