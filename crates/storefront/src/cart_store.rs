//! Persistent cart store.
//!
//! The cart is a JSON array of product identifiers under a single storage key.
//! Loading is forgiving: an absent, malformed, or unreadable record yields an
//! empty cart. Writes are write-through and report failures to the caller.

use std::sync::Arc;

use catalog_core::ProductId;
use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the cart.
pub const CART_KEY: &str = "cart";

/// Reads and writes the cart identifier list.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Create a cart store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Load the persisted cart.
    #[must_use]
    pub fn load(&self) -> Vec<ProductId> {
        let raw = match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Cart storage unreadable, starting with an empty cart");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ProductId>>(&raw) {
            Ok(cart) => {
                info!(?cart, "Cart loaded from storage");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Discarding malformed cart record");
                Vec::new()
            }
        }
    }

    /// Persist `cart`, replacing the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn save(&self, cart: &[ProductId]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set(CART_KEY, &raw)?;
        info!(?cart, "Cart saved to storage");
        Ok(())
    }

    /// Remove the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CART_KEY)?;
        info!("Cart removed from storage");
        Ok(())
    }
}
