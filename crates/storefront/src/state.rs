//! Application state container.
//!
//! One [`AppState`] snapshot is current at a time. Every mutation builds a new
//! snapshot, swaps it in, and then hands it to every observer synchronously in
//! registration order. Observers never see a half-applied transition, and they
//! can compare snapshots with [`Arc::ptr_eq`] to detect change.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use catalog_core::{Product, ProductId};

/// Snapshot of the storefront state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Products loaded from the API.
    pub products: Vec<Product>,
    /// Product identifiers in the cart, without duplicates.
    pub cart: Vec<ProductId>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Message of the last failed request.
    pub error: Option<String>,
}

impl AppState {
    /// Number of products in the cart.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }

    /// Whether `id` is in the cart.
    #[must_use]
    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.cart.contains(&id)
    }

    /// Find a loaded product by identifier.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

type Observer = Arc<dyn Fn(&Arc<AppState>) + Send + Sync>;

struct Inner {
    snapshot: RwLock<Arc<AppState>>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer_id: AtomicU64,
}

impl Inner {
    fn remove_observer(&self, id: u64) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(observer_id, _)| *observer_id != id);
    }
}

/// Holder of the current [`AppState`] snapshot.
///
/// Cheaply cloneable; clones share the same state and observers.
#[derive(Clone)]
pub struct StateContainer {
    inner: Arc<Inner>,
}

impl Default for StateContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl StateContainer {
    /// Create a container holding the empty initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Create a container holding `state`.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(Inner {
                snapshot: RwLock::new(Arc::new(state)),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(0),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current snapshot.
    #[must_use]
    pub fn current_state(&self) -> Arc<AppState> {
        self.inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.current_state().products.clone()
    }

    #[must_use]
    pub fn cart(&self) -> Vec<ProductId> {
        self.current_state().cart.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.current_state().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.current_state().error.clone()
    }

    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.current_state().cart_count()
    }

    #[must_use]
    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.current_state().is_in_cart(id)
    }

    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<Product> {
        self.current_state().product_by_id(id).cloned()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the product list.
    pub fn set_products(&self, products: Vec<Product>) {
        self.update(|state| {
            Some(AppState {
                products,
                ..state.clone()
            })
        });
    }

    /// Append a newly created product.
    pub fn add_product(&self, product: Product) {
        self.update(|state| {
            let mut next = state.clone();
            next.products.push(product);
            Some(next)
        });
    }

    /// Replace the product with the same identifier, or append it.
    pub fn upsert_product(&self, product: Product) {
        self.update(|state| {
            let mut next = state.clone();
            match next.products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => next.products.push(product),
            }
            Some(next)
        });
    }

    /// Replace the cart. Repeated identifiers keep their first position.
    pub fn set_cart(&self, cart: Vec<ProductId>) {
        let mut deduped: Vec<ProductId> = Vec::with_capacity(cart.len());
        for id in cart {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        self.update(|state| {
            Some(AppState {
                cart: deduped,
                ..state.clone()
            })
        });
    }

    /// Add `id` to the cart. No-op if already present.
    pub fn add_to_cart(&self, id: ProductId) {
        self.update(|state| {
            if state.is_in_cart(id) {
                return None;
            }
            let mut next = state.clone();
            next.cart.push(id);
            Some(next)
        });
    }

    /// Remove `id` from the cart. No-op if absent.
    pub fn remove_from_cart(&self, id: ProductId) {
        self.update(|state| {
            if !state.is_in_cart(id) {
                return None;
            }
            let mut next = state.clone();
            next.cart.retain(|c| *c != id);
            Some(next)
        });
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.update(|state| {
            Some(AppState {
                cart: Vec::new(),
                ..state.clone()
            })
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|state| {
            Some(AppState {
                loading,
                ..state.clone()
            })
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.update(|state| {
            Some(AppState {
                error,
                ..state.clone()
            })
        });
    }

    pub fn clear_error(&self) {
        self.set_error(None);
    }

    /// Apply a transition. `None` leaves the snapshot untouched and notifies
    /// nobody.
    fn update(&self, transition: impl FnOnce(&AppState) -> Option<AppState>) {
        let next = {
            let mut snapshot = self
                .inner
                .snapshot
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let Some(next) = transition(&snapshot) else {
                return;
            };
            let next = Arc::new(next);
            *snapshot = Arc::clone(&next);
            next
        };

        // Notify outside the locks so observers may read or mutate re-entrantly.
        let observers: Vec<Observer> = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&next);
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Register `observer`.
    ///
    /// The observer is called immediately with the current snapshot, then with
    /// every new snapshot until the returned [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        observer: impl Fn(&Arc<AppState>) + Send + Sync + 'static,
    ) -> Subscription {
        let observer: Observer = Arc::new(observer);
        let id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::clone(&observer)));

        observer(&self.current_state());

        Subscription {
            container: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Register an observer of one derived slice of the state.
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    ///
    /// use catalog_core::ProductId;
    /// use catalog_storefront::state::{AppState, StateContainer};
    ///
    /// let state = StateContainer::new();
    /// let counts = Arc::new(Mutex::new(Vec::new()));
    /// let seen = counts.clone();
    /// let _sub = state.subscribe_slice(AppState::cart_count, move |n| {
    ///     seen.lock().unwrap().push(n);
    /// });
    ///
    /// state.add_to_cart(ProductId::new(1));
    /// assert_eq!(*counts.lock().unwrap(), vec![0, 1]);
    /// ```
    pub fn subscribe_slice<T>(
        &self,
        selector: impl Fn(&AppState) -> T + Send + Sync + 'static,
        observer: impl Fn(T) + Send + Sync + 'static,
    ) -> Subscription {
        self.subscribe(move |state| observer(selector(state)))
    }
}

/// Registration handle returned by [`StateContainer::subscribe`].
///
/// Dropping it deregisters the observer.
#[must_use = "dropping a Subscription immediately deregisters the observer"]
pub struct Subscription {
    container: Weak<Inner>,
    id: u64,
}

impl Subscription {
    /// Deregister the observer now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.container.upgrade() {
            inner.remove_observer(self.id);
        }
    }
}
