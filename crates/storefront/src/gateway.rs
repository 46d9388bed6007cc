//! Remote product gateway.
//!
//! Every network operation follows the same pipeline:
//!
//! 1. mark the container as loading and clear the previous error
//! 2. await the [`ProductApi`]
//! 3. on success, write the result into the container and stop loading
//! 4. on failure, stop loading, [`classify`] the error, publish its message,
//!    and return it to the caller
//!
//! A failure never touches products or the cart. Overlapping calls are not
//! sequenced: the first to finish turns `loading` off even while others are
//! in flight, and an error published by any of them stays until the next call
//! starts.
//!
//! Cart operations update the container first and then write the resulting
//! list through to the [`CartStore`].

use catalog_core::{NewProduct, Product, ProductId};
use tracing::{info, instrument};

use crate::api::ProductApi;
use crate::cart_store::CartStore;
use crate::error::{RequestError, TransportError, classify};
use crate::state::StateContainer;
use crate::storage::StorageError;

/// Product operations bound to a state container and a cart store.
pub struct ProductGateway<A> {
    api: A,
    state: StateContainer,
    cart_store: CartStore,
}

impl<A: ProductApi> ProductGateway<A> {
    /// Create the gateway and hydrate the container's cart from storage.
    pub fn new(api: A, state: StateContainer, cart_store: CartStore) -> Self {
        state.set_cart(cart_store.load());
        Self {
            api,
            state,
            cart_store,
        }
    }

    /// The state container this gateway writes to.
    #[must_use]
    pub const fn state(&self) -> &StateContainer {
        &self.state
    }

    /// The underlying API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch every product and replace the container's product list.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> Result<Vec<Product>, RequestError> {
        self.begin_request();
        match self.api.fetch_all().await {
            Ok(products) => {
                self.state.set_products(products.clone());
                self.state.set_loading(false);
                Ok(products)
            }
            Err(e) => Err(self.fail_request(&e)),
        }
    }

    /// Fetch one product and merge it into the container's product list.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, RequestError> {
        self.begin_request();
        match self.api.fetch_one(id).await {
            Ok(product) => {
                self.state.upsert_product(product.clone());
                self.state.set_loading(false);
                Ok(product)
            }
            Err(e) => Err(self.fail_request(&e)),
        }
    }

    /// Create a product and append the server's copy to the container.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the request fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, RequestError> {
        self.begin_request();
        match self.api.create(product).await {
            Ok(created) => {
                info!(id = %created.id, "Product created");
                self.state.add_product(created.clone());
                self.state.set_loading(false);
                Ok(created)
            }
            Err(e) => Err(self.fail_request(&e)),
        }
    }

    fn begin_request(&self) {
        self.state.set_loading(true);
        self.state.clear_error();
    }

    fn fail_request(&self, error: &TransportError) -> RequestError {
        self.state.set_loading(false);
        let error = classify(error);
        self.state.set_error(Some(error.message().to_owned()));
        error
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Add `id` to the cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted; the container has
    /// already been updated.
    pub fn add_to_cart(&self, id: ProductId) -> Result<(), StorageError> {
        self.state.add_to_cart(id);
        self.cart_store.save(&self.state.current_state().cart)
    }

    /// Remove `id` from the cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted; the container has
    /// already been updated.
    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), StorageError> {
        self.state.remove_from_cart(id);
        self.cart_store.save(&self.state.current_state().cart)
    }

    /// Add `id` if absent, remove it otherwise. Returns whether it is now in
    /// the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn toggle_cart(&self, id: ProductId) -> Result<bool, StorageError> {
        if self.state.is_in_cart(id) {
            self.remove_from_cart(id)?;
            Ok(false)
        } else {
            self.add_to_cart(id)?;
            Ok(true)
        }
    }

    /// Empty the cart and delete the persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    pub fn clear_cart(&self) -> Result<(), StorageError> {
        self.state.clear_cart();
        self.cart_store.clear()
    }
}
