//! Integration test harness for the catalog storefront.
//!
//! [`FakeApi`] serves the product collection from memory on an ephemeral
//! localhost port so the real [`HttpProductApi`] can be exercised end to end.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-integration-tests
//! ```

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog_core::{NewProduct, Product, ProductId};
use catalog_storefront::api::HttpProductApi;
use catalog_storefront::cart_store::CartStore;
use catalog_storefront::gateway::ProductGateway;
use catalog_storefront::session::{USER_EMAIL_HEADER, UserSession};
use catalog_storefront::state::StateContainer;
use catalog_storefront::storage::KeyValueStore;
use url::Url;

/// How the fake answers the next requests.
#[derive(Debug, Clone)]
enum Behavior {
    Normal,
    Status(StatusCode),
    RawBody(String),
}

struct Shared {
    products: Mutex<Vec<Product>>,
    behavior: Mutex<Behavior>,
    seen_users: Mutex<Vec<Option<String>>>,
}

impl Shared {
    fn record(&self, headers: &HeaderMap) {
        let user = headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        lock(&self.seen_users).push(user);
    }

    fn overridden(&self) -> Option<Response> {
        match lock(&self.behavior).clone() {
            Behavior::Normal => None,
            Behavior::Status(status) => Some((status, "forced failure").into_response()),
            Behavior::RawBody(body) => Some(
                (
                    StatusCode::OK,
                    [("content-type", "application/json")],
                    body,
                )
                    .into_response(),
            ),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory product API listening on `127.0.0.1`.
pub struct FakeApi {
    endpoint: Url,
    shared: Arc<Shared>,
}

impl FakeApi {
    /// Bind an ephemeral port and start serving `products`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(products: Vec<Product>) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            products: Mutex::new(products),
            behavior: Mutex::new(Behavior::Normal),
            seen_users: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", get(get_product))
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let endpoint = Url::parse(&format!("http://{addr}/products")).map_err(io::Error::other)?;
        Ok(Self { endpoint, shared })
    }

    /// Collection URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Answer every request with `status` from now on.
    pub fn fail_with(&self, status: u16) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        *lock(&self.shared.behavior) = Behavior::Status(status);
    }

    /// Answer every request with `200 OK` and `body` from now on.
    pub fn respond_with_body(&self, body: &str) {
        *lock(&self.shared.behavior) = Behavior::RawBody(body.to_owned());
    }

    /// Go back to serving the collection.
    pub fn recover(&self) {
        *lock(&self.shared.behavior) = Behavior::Normal;
    }

    /// Current server-side collection.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.shared.products).clone()
    }

    /// `X-User-Email` value of every request received, in order.
    #[must_use]
    pub fn seen_users(&self) -> Vec<Option<String>> {
        lock(&self.shared.seen_users).clone()
    }

    /// Build a gateway talking to this server, persisting to `storage`.
    #[must_use]
    pub fn gateway(&self, storage: &Arc<dyn KeyValueStore>) -> ProductGateway<HttpProductApi> {
        let session = UserSession::new(Arc::clone(storage));
        let api = HttpProductApi::new(&self.endpoint, session);
        ProductGateway::new(
            api,
            StateContainer::new(),
            CartStore::new(Arc::clone(storage)),
        )
    }
}

async fn list_products(State(shared): State<Arc<Shared>>, headers: HeaderMap) -> Response {
    shared.record(&headers);
    if let Some(response) = shared.overridden() {
        return response;
    }
    Json(lock(&shared.products).clone()).into_response()
}

async fn get_product(
    State(shared): State<Arc<Shared>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    shared.record(&headers);
    if let Some(response) = shared.overridden() {
        return response;
    }
    let id = ProductId::new(id);
    lock(&shared.products)
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map_or_else(
            || (StatusCode::NOT_FOUND, "not found").into_response(),
            |product| Json(product).into_response(),
        )
}

async fn create_product(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    Json(product): Json<NewProduct>,
) -> Response {
    shared.record(&headers);
    if let Some(response) = shared.overridden() {
        return response;
    }
    let mut products = lock(&shared.products);
    let next_id = products.iter().map(|p| p.id.as_i32()).max().unwrap_or(0) + 1;
    let created = product.with_id(ProductId::new(next_id));
    products.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}
