//! Product API capability.
//!
//! [`ProductApi`] is the seam between the gateway and the network: three
//! asynchronous operations returning raw [`TransportError`]s. The gateway owns
//! classification and state updates, so implementations only move bytes.
//!
//! No implementation applies a timeout or retries a request.

mod http;

use std::future::Future;

use catalog_core::{NewProduct, Product, ProductId};

pub use http::HttpProductApi;

use crate::error::TransportError;

/// Remote product operations.
pub trait ProductApi: Send + Sync {
    /// List every product.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, TransportError>> + Send;

    /// Fetch one product by identifier.
    fn fetch_one(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, TransportError>> + Send;

    /// Create a product; the server assigns its identifier.
    fn create(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, TransportError>> + Send;
}
