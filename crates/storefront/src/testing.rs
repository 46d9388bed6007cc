//! Test fixtures shared by the unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use catalog_core::{NewProduct, Price, Product, ProductId};
use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::api::ProductApi;
use crate::error::TransportError;

/// A product priced at `cents / 100`.
pub fn priced(id: i32, name: &str, cents: i64) -> Product {
    NewProduct {
        price: Price::new(Decimal::new(cents, 2)).unwrap(),
        ..new_product(name)
    }
    .with_id(ProductId::new(id))
}

/// A product priced at $19.99.
pub fn product(id: i32, name: &str) -> Product {
    priced(id, name, 1999)
}

pub fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        price: Price::new(Decimal::new(1999, 2)).unwrap(),
        image_url: format!("https://example.com/{}.jpg", name.to_lowercase()),
        category: None,
        in_stock: None,
        rating: None,
        properties: Vec::new(),
    }
}

/// In-memory [`ProductApi`] that serves a fixed list or fails every call.
#[derive(Default)]
pub struct StubApi {
    products: Mutex<Vec<Product>>,
    created: Mutex<Vec<NewProduct>>,
    failure: Option<TransportError>,
    list_gate: Option<Arc<Notify>>,
    item_gate: Option<Arc<Notify>>,
}

impl StubApi {
    pub fn with_products(self, products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..self
        }
    }

    pub fn failing(self, error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..self
        }
    }

    /// Hold every `fetch_all` until `gate` is notified.
    pub fn gate_fetch_all(self, gate: Arc<Notify>) -> Self {
        Self {
            list_gate: Some(gate),
            ..self
        }
    }

    /// Hold every `fetch_one` until `gate` is notified.
    pub fn gate_fetch_one(self, gate: Arc<Notify>) -> Self {
        Self {
            item_gate: Some(gate),
            ..self
        }
    }

    /// Creation requests received so far.
    pub fn created(&self) -> Vec<NewProduct> {
        self.created.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), TransportError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

impl ProductApi for StubApi {
    async fn fetch_all(&self) -> Result<Vec<Product>, TransportError> {
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        self.check()?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn fetch_one(&self, id: ProductId) -> Result<Product, TransportError> {
        if let Some(gate) = &self.item_gate {
            gate.notified().await;
        }
        self.check()?;
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                status: 404,
                message: format!("Http failure response for stub/{id}: 404 Not Found"),
            })
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, TransportError> {
        self.check()?;
        self.created.lock().unwrap().push(product.clone());
        let mut products = self.products.lock().unwrap();
        let next_id = products.iter().map(|p| p.id.as_i32()).max().unwrap_or(0) + 1;
        let created = product.clone().with_id(ProductId::new(next_id));
        products.push(created.clone());
        Ok(created)
    }
}
