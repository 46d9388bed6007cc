//! Gateway behavior against a live HTTP product API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use catalog_core::{NewProduct, Price, Product, ProductDraft, ProductId};
use catalog_integration_tests::FakeApi;
use catalog_storefront::session::USER_EMAIL_KEY;
use catalog_storefront::storage::{KeyValueStore, MemoryStore};
use catalog_storefront::views::detail::{self, DetailError};
use catalog_storefront::views::form::{self, FormOutcome};
use rust_decimal::Decimal;

fn product(id: i32, name: &str, description: &str) -> Product {
    NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price: Price::new(Decimal::new(5995, 2)).unwrap(),
        image_url: format!("https://example.com/{id}.jpg"),
        category: Some("Home".to_string()),
        in_stock: Some(true),
        rating: Some(4.5),
        properties: Vec::new(),
    }
    .with_id(ProductId::new(id))
}

fn catalog() -> Vec<Product> {
    vec![
        product(1, "Desk Lamp", "Adjustable LED desk lamp"),
        product(2, "Backpack", "Durable travel backpack"),
    ]
}

fn memory() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

#[tokio::test]
async fn test_get_all_products_populates_state() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let gateway = api.gateway(&memory());

    let products = gateway.get_all_products().await.unwrap();

    assert_eq!(products, catalog());
    let state = gateway.state().current_state();
    assert_eq!(state.products, catalog());
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_get_product_by_id_upserts() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let gateway = api.gateway(&memory());

    let product = gateway.get_product_by_id(ProductId::new(2)).await.unwrap();

    assert_eq!(product.name, "Backpack");
    assert_eq!(gateway.state().products(), vec![product]);
}

#[tokio::test]
async fn test_missing_product_reports_not_found() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let gateway = api.gateway(&memory());
    gateway.get_all_products().await.unwrap();

    let err = gateway.get_product_by_id(ProductId::new(99)).await.unwrap_err();

    assert_eq!(err.message(), "Resource not found.");
    assert!(err.is_not_found());
    assert_eq!(gateway.state().products(), catalog());
    assert_eq!(gateway.state().error().as_deref(), Some("Resource not found."));
    assert!(!gateway.state().loading());
}

#[tokio::test]
async fn test_unauthorized_message() {
    let api = FakeApi::start(catalog()).await.unwrap();
    api.fail_with(401);
    let gateway = api.gateway(&memory());

    let err = gateway.get_all_products().await.unwrap_err();

    assert_eq!(err.message(), "Unauthorized. Please log in.");
    assert!(gateway.state().products().is_empty());
}

#[tokio::test]
async fn test_unlisted_status_uses_generic_message() {
    let api = FakeApi::start(catalog()).await.unwrap();
    api.fail_with(503);
    let gateway = api.gateway(&memory());

    let err = gateway.get_all_products().await.unwrap_err();

    assert!(
        err.message().starts_with("Server error: 503 - "),
        "{}",
        err.message()
    );
}

#[tokio::test]
async fn test_error_clears_on_next_success() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let gateway = api.gateway(&memory());

    api.fail_with(500);
    gateway.get_all_products().await.unwrap_err();
    assert_eq!(
        gateway.state().error().as_deref(),
        Some("Internal server error. Please try again later.")
    );

    api.recover();
    gateway.get_all_products().await.unwrap();
    assert_eq!(gateway.state().error(), None);
    assert_eq!(gateway.state().products().len(), 2);
}

#[tokio::test]
async fn test_malformed_body_is_a_failure() {
    let api = FakeApi::start(catalog()).await.unwrap();
    api.respond_with_body(r#"{"not": "a list"}"#);
    let gateway = api.gateway(&memory());

    let err = gateway.get_all_products().await.unwrap_err();

    assert!(err.message().starts_with("Server error: 200 - "), "{}", err.message());
    assert!(gateway.state().products().is_empty());
}

#[tokio::test]
async fn test_create_product_appends() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let gateway = api.gateway(&memory());
    gateway.get_all_products().await.unwrap();

    let draft = ProductDraft {
        name: "Mug".to_string(),
        description: "Ceramic coffee mug".to_string(),
        price: "54".to_string(),
        image_url: "https://example.com/mug.jpg".to_string(),
        ..ProductDraft::default()
    };

    let FormOutcome::Created { product, message } = form::submit(&gateway, &draft).await else {
        panic!("expected creation to succeed");
    };

    assert_eq!(message, form::CREATED_MESSAGE);
    assert_eq!(product.id, ProductId::new(3));
    assert_eq!(api.products().len(), 3);
    let names: Vec<String> = gateway
        .state()
        .products()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Desk Lamp", "Backpack", "Mug"]);
}

#[tokio::test]
async fn test_invalid_draft_is_never_sent() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let gateway = api.gateway(&memory());

    let outcome = form::submit(&gateway, &ProductDraft::default()).await;

    assert!(matches!(outcome, FormOutcome::Invalid(_)));
    assert!(api.seen_users().is_empty());
}

#[tokio::test]
async fn test_detail_view_over_http() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let storage = memory();
    let gateway = api.gateway(&storage);
    gateway.add_to_cart(ProductId::new(1)).unwrap();

    let detail = detail::load_product(&gateway, Some("1")).await.unwrap();
    assert!(detail.in_cart);
    assert_eq!(detail.category(), "Home");

    let err = detail::load_product(&gateway, Some("42")).await.unwrap_err();
    assert!(matches!(err, DetailError::Fetch(ref e) if e.is_not_found()), "{err:?}");
}

#[tokio::test]
async fn test_user_marker_header() {
    let api = FakeApi::start(catalog()).await.unwrap();
    let storage = memory();
    let gateway = api.gateway(&storage);

    gateway.get_all_products().await.unwrap();
    storage.set(USER_EMAIL_KEY, "shopper@example.com").unwrap();
    gateway.get_all_products().await.unwrap();
    storage.remove(USER_EMAIL_KEY).unwrap();
    gateway.get_all_products().await.unwrap();

    assert_eq!(
        api.seen_users(),
        vec![None, Some("shopper@example.com".to_string()), None]
    );
}

#[tokio::test]
async fn test_wire_format_is_camel_case() {
    let api = FakeApi::start(catalog()).await.unwrap();

    let body: serde_json::Value = reqwest::get(api.endpoint().as_str())
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let first = &body[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["imageUrl"], "https://example.com/1.jpg");
    assert_eq!(first["inStock"], true);
    assert_eq!(first["price"], 59.95);
}
