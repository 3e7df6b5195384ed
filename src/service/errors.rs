//! Catalog service errors.

use thiserror::Error;

use crate::{
    catalog::repository::StorageError, contacts::form::ContactFormError, pricing::PricingError,
};

/// Errors a dispatcher maps to user-visible responses
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The requested record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind
        entity: &'static str,
        /// Requested identity
        id: i64,
    },

    /// Calculator input was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] PricingError),

    /// Contact form input was rejected.
    #[error("invalid contact details: {0}")]
    InvalidContact(#[from] ContactFormError),

    /// The store failed.
    #[error("storage error")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Storage(other),
        }
    }
}
