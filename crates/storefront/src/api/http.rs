//! `reqwest` implementation of [`ProductApi`].

use catalog_core::{NewProduct, Product, ProductId};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::ProductApi;
use crate::error::TransportError;
use crate::session::{USER_EMAIL_HEADER, UserSession};

/// Product API client speaking JSON over HTTP.
///
/// - `GET {endpoint}` lists products
/// - `GET {endpoint}/{id}` fetches one
/// - `POST {endpoint}` creates one
///
/// When a user marker is present in the session, every request carries it in
/// the `X-User-Email` header.
#[derive(Clone)]
pub struct HttpProductApi {
    client: Client,
    endpoint: String,
    session: UserSession,
}

impl HttpProductApi {
    /// Create a client for the collection at `endpoint`.
    #[must_use]
    pub fn new(endpoint: &Url, session: UserSession) -> Self {
        Self::with_client(Client::new(), endpoint, session)
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, endpoint: &Url, session: UserSession) -> Self {
        Self {
            client,
            endpoint: endpoint.as_str().trim_end_matches('/').to_owned(),
            session,
        }
    }

    /// Collection URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/{id}", self.endpoint)
    }

    /// Attach the user marker, send, and decode a JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, TransportError> {
        let request = match self.session.current_user() {
            Some(email) => request.header(USER_EMAIL_HEADER, email),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, url, "Product API returned non-success status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: format!("Http failure response for {url}: {status}"),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| {
            debug!(
                error = %e,
                body = %String::from_utf8_lossy(&body).chars().take(500).collect::<String>(),
                "Failed to parse product API response"
            );
            TransportError::Status {
                status: status.as_u16(),
                message: format!("Http failure during parsing for {url}"),
            }
        })
    }
}

impl ProductApi for HttpProductApi {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Product>, TransportError> {
        let url = self.endpoint.as_str();
        self.send(self.client.get(url), url).await
    }

    #[instrument(skip(self))]
    async fn fetch_one(&self, id: ProductId) -> Result<Product, TransportError> {
        let url = self.product_url(id);
        self.send(self.client.get(&url), &url).await
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: &NewProduct) -> Result<Product, TransportError> {
        let url = self.endpoint.as_str();
        self.send(self.client.post(url).json(product), url).await
    }
}
