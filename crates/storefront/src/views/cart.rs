//! Cart screen.

use catalog_core::{Price, Product};

use crate::api::ProductApi;
use crate::error::RequestError;
use crate::gateway::ProductGateway;
use crate::state::AppState;

/// Cart contents resolved against the loaded products.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// Cart products in cart order.
    pub items: Vec<Product>,
    /// Sum of item prices.
    pub total: Price,
}

impl CartSummary {
    /// Resolve the cart of `state`.
    ///
    /// Identifiers whose product is not loaded are left out.
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let items: Vec<Product> = state
            .cart
            .iter()
            .filter_map(|id| state.product_by_id(*id).cloned())
            .collect();
        let total: Price = items.iter().map(|p| p.price).sum();
        Self { items, total }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build the cart screen, loading products first if none are loaded yet.
///
/// # Errors
///
/// Returns the classified error if the product list had to be fetched and the
/// request failed.
pub async fn load_cart_view<A: ProductApi>(
    gateway: &ProductGateway<A>,
) -> Result<CartSummary, RequestError> {
    if gateway.state().current_state().products.is_empty() {
        gateway.get_all_products().await?;
    }
    Ok(CartSummary::from_state(&gateway.state().current_state()))
}
