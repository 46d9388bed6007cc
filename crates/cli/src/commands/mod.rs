//! Subcommand implementations and the composition root.

pub mod cart;
pub mod products;

use std::sync::Arc;

use catalog_core::ValidationErrors;
use catalog_storefront::api::HttpProductApi;
use catalog_storefront::cart_store::CartStore;
use catalog_storefront::config::StorefrontConfig;
use catalog_storefront::error::RequestError;
use catalog_storefront::gateway::ProductGateway;
use catalog_storefront::session::UserSession;
use catalog_storefront::state::StateContainer;
use catalog_storefront::storage::{FileStore, KeyValueStore, StorageError};
use catalog_storefront::views::detail::DetailError;
use thiserror::Error;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A product API request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The cart could not be persisted.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product id was missing or malformed.
    #[error("Product not found: {0}")]
    NotFound(DetailError),

    /// The product form was rejected.
    #[error("Invalid product: {0}")]
    Invalid(ValidationErrors),

    /// The product could not be created.
    #[error("Error creating product: {0}")]
    CreateFailed(String),
}

impl From<DetailError> for CommandError {
    fn from(error: DetailError) -> Self {
        match error {
            DetailError::Fetch(e) => Self::Request(e),
            other => Self::NotFound(other),
        }
    }
}

/// Wire the storefront together from configuration.
pub fn connect(config: &StorefrontConfig) -> ProductGateway<HttpProductApi> {
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage_path.clone()));
    let session = UserSession::new(Arc::clone(&storage));
    if session.is_logged_in() {
        tracing::debug!("Requests will carry the user marker");
    }

    let api = HttpProductApi::new(&config.api_url, session);
    ProductGateway::new(api, StateContainer::new(), CartStore::new(storage))
}
