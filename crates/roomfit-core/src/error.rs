use crate::{db::backend::BackendError, ingest::ParseError, model::EntityId};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Public error surface of every catalog operation.
/// The HTTP collaborator maps [`ErrorClass`] to a status code; nothing else
/// about the variant shape is part of that contract.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    #[error(transparent)]
    Storage(#[from] BackendError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    pub(crate) const fn not_found(entity: &'static str, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Storage(_) => ErrorClass::Storage,
            Self::Internal(err) => err.class,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Validation(ValidationError::Record(err))
    }
}

///
/// ValidationError
///
/// Malformed or missing caller input. Never retried.
///

#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("search requires at least one filter condition")]
    NoFilter,

    #[error("parameter '{param}' must be an integer, got '{value}'")]
    NotAnInteger { param: &'static str, value: String },

    #[error("parameter '{param}' is required")]
    MissingParam { param: &'static str },

    #[error("page must not be negative, got {0}")]
    NegativePage(i64),

    #[error("perPage must be positive, got {0}")]
    PerPageNotPositive(i64),

    #[error("buyer email is required")]
    MissingEmail,

    #[error("polygon requires at least one coordinate")]
    EmptyPolygon,

    #[error(transparent)]
    Record(#[from] ParseError),
}

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Raised when the core's own invariants fail, never for caller input.
///

#[derive(Debug, ThisError)]
#[error("{origin}: {message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a query-origin invariant violation.
    pub(crate) fn query_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Query, message)
    }
}

///
/// ErrorClass
/// Error taxonomy shared with the HTTP collaborator.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Validation,
    NotFound,
    Storage,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Subsystem an [`InternalError`] was raised from.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Query,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Query => "query",
        };
        write!(f, "{label}")
    }
}
