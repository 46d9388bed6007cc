//! Product detail screen.
//!
//! Every failure on this screen ends in the same place: the caller navigates
//! to its not-found view.

use catalog_core::{Product, ProductId};
use thiserror::Error;
use tracing::warn;

use crate::api::ProductApi;
use crate::error::RequestError;
use crate::gateway::ProductGateway;

/// Label shown when a product has no category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Reasons the detail screen redirects to not-found.
#[derive(Debug, Error)]
pub enum DetailError {
    /// The route carried no identifier.
    #[error("missing product id")]
    MissingId,

    /// The identifier is not an integer.
    #[error("invalid product id: {0:?}")]
    InvalidId(String),

    /// Fetching the product failed.
    #[error(transparent)]
    Fetch(#[from] RequestError),
}

/// Data displayed by the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub in_cart: bool,
}

impl ProductDetail {
    #[must_use]
    pub fn category(&self) -> &str {
        self.product.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// Parse the `id` route parameter.
///
/// # Errors
///
/// Returns [`DetailError::MissingId`] or [`DetailError::InvalidId`].
pub fn parse_product_id(param: Option<&str>) -> Result<ProductId, DetailError> {
    let raw = param
        .filter(|p| !p.is_empty())
        .ok_or(DetailError::MissingId)?;
    raw.parse()
        .map_err(|_| DetailError::InvalidId(raw.to_owned()))
}

/// Resolve the route parameter and fetch the product.
///
/// # Errors
///
/// Returns a [`DetailError`] when the parameter is unusable or the fetch
/// fails; the caller should show its not-found view.
pub async fn load_product<A: ProductApi>(
    gateway: &ProductGateway<A>,
    param: Option<&str>,
) -> Result<ProductDetail, DetailError> {
    let id = parse_product_id(param)?;
    let product = gateway.get_product_by_id(id).await.inspect_err(|e| {
        warn!(%id, error = %e, "Error fetching product");
    })?;
    Ok(ProductDetail {
        in_cart: gateway.state().is_in_cart(product.id),
        product,
    })
}
