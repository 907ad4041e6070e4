//! Remote CRUD operations over the product collection.
//!
//! [`ProductGateway`] is the seam between the desk and whatever serves the
//! products. Two backends ship with the crate:
//!
//! - [`RestGateway`] talks JSON to a REST collection over HTTP.
//! - [`StoreGateway`] talks to an in-process [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Every call is one-shot: no retries, no caching, no queued writes.

pub mod rest;
pub mod store;

pub use rest::RestGateway;
pub use store::StoreGateway;

use async_trait::async_trait;
use thiserror::Error;

use crate::framework::FrameworkError;
use crate::model::Product;

/// Errors surfaced by a gateway call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The configured base URL cannot carry a product path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product already exists: {0}")]
    Conflict(String),

    /// The backend refused the record.
    #[error("Product rejected: {0}")]
    Rejected(String),

    /// The backend is gone (store actor stopped).
    #[error("Product service unavailable")]
    Unavailable,
}

impl From<FrameworkError> for GatewayError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => GatewayError::Unavailable,
            FrameworkError::NotFound(id) => GatewayError::NotFound(id),
            FrameworkError::AlreadyExists(id) => GatewayError::Conflict(id),
            FrameworkError::Rejected(reason) => GatewayError::Rejected(reason),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            GatewayError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

/// Asynchronous CRUD access to the product collection.
///
/// Implementations must be shareable across tasks: the desk runs fetches on a
/// spawned task while mutations run on the caller's.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Fetch the current collection.
    async fn list(&self) -> Result<Vec<Product>, GatewayError>;

    /// Store a new record. The record already carries its identifier.
    async fn create(&self, product: &Product) -> Result<(), GatewayError>;

    /// Replace the record with the same identifier.
    async fn update(&self, product: &Product) -> Result<(), GatewayError>;

    /// Remove the record with this identifier.
    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_errors_map_to_gateway_errors() {
        assert_eq!(GatewayError::from(FrameworkError::ActorClosed), GatewayError::Unavailable);
        assert_eq!(GatewayError::from(FrameworkError::ActorDropped), GatewayError::Unavailable);
        assert_eq!(
            GatewayError::from(FrameworkError::NotFound("x".into())),
            GatewayError::NotFound("x".into())
        );
        assert_eq!(
            GatewayError::from(FrameworkError::AlreadyExists("x".into())),
            GatewayError::Conflict("x".into())
        );
    }
}
