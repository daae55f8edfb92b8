//! Integration tests for the catalog HTTP client.
//!
//! Each test starts its own fake catalog on a free local port.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use rust_decimal::Decimal;
use secrecy::SecretString;

use luxe_core::{CartId, ProductId, UserId};
use luxe_integration_tests::{FakeCatalog, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME};
use luxe_storefront::catalog::CatalogError;

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_fetch_products_decodes_catalog() {
    let server = FakeCatalog::start().await;
    let products = server.client().fetch_products().await.unwrap();

    assert_eq!(products.len(), 6);
    assert_eq!(products[0].id, ProductId::new(1));
    assert_eq!(products[0].price, Decimal::new(10995, 2));
    assert_eq!(products[2].price, Decimal::from(695));
    assert_eq!(products[0].rating.as_ref().unwrap().count, 120);
}

#[tokio::test]
async fn test_fetch_single_product() {
    let server = FakeCatalog::start().await;
    let product = server
        .client()
        .fetch_product(ProductId::new(9))
        .await
        .unwrap();

    assert_eq!(product.category, "electronics");
    assert_eq!(product.price, Decimal::from(64));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let server = FakeCatalog::start().await;
    let err = server
        .client()
        .fetch_product(ProductId::new(999))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(ref what) if what == "product 999"));
    assert!(!err.is_service_error());
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let router = Router::new().route(
        "/products",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database on fire") }),
    );
    let server = FakeCatalog::serve(router).await;
    let err = server.client().fetch_products().await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Unavailable { status: 500, ref resource } if resource == "products"
    ));
    assert_eq!(err.user_message(), "Failed to fetch products");
}

#[tokio::test]
async fn test_missing_route_is_unavailable() {
    let server = FakeCatalog::serve(Router::new()).await;
    let err = server
        .client()
        .fetch_product(ProductId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Unavailable { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let router = Router::new().route("/products", get(|| async { "<html>maintenance</html>" }));
    let server = FakeCatalog::serve(router).await;
    let err = server.client().fetch_products().await.unwrap_err();

    assert!(matches!(err, CatalogError::InvalidResponse { .. }));
    assert!(err.is_service_error());
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let router = Router::new().nest("/api/v1", luxe_integration_tests::fixture_router());
    let server = FakeCatalog::serve(router).await;

    let mut config = server.config();
    config.base_url = config.base_url.join("api/v1/").unwrap();
    let client = luxe_storefront::CatalogClient::new(&config).unwrap();

    assert_eq!(client.fetch_products().await.unwrap().len(), 6);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let server = FakeCatalog::start().await;
    let session = server
        .client()
        .login(TEST_USERNAME, &SecretString::from(TEST_PASSWORD))
        .await
        .unwrap();

    assert_eq!(session.token.expose(), TEST_TOKEN);
    assert_eq!(session.user.username, TEST_USERNAME);
    assert!(session.user.id.is_none());
}

#[tokio::test]
async fn test_bad_password_is_authentication_failed() {
    let server = FakeCatalog::start().await;
    let err = server
        .client()
        .login(TEST_USERNAME, &SecretString::from("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::AuthenticationFailed { status: 401 }));
}

#[tokio::test]
async fn test_login_server_error_is_authentication_failed() {
    let router = Router::new().route(
        "/auth/login",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let server = FakeCatalog::serve(router).await;
    let err = server
        .client()
        .login(TEST_USERNAME, &SecretString::from(TEST_PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::AuthenticationFailed { status: 503 }));
}

// ============================================================================
// Users & Carts
// ============================================================================

#[tokio::test]
async fn test_find_user_fills_identity() {
    let server = FakeCatalog::start().await;
    let client = server.client();

    let remote = client.find_user(TEST_USERNAME).await.unwrap().unwrap();
    let user = remote.to_user();
    assert_eq!(user.id, Some(UserId::new(1)));
    assert_eq!(user.email.unwrap().as_str(), "john@gmail.com");

    assert!(client.find_user("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_user_by_id() {
    let server = FakeCatalog::start().await;
    let remote = server.client().fetch_user(UserId::new(2)).await.unwrap();
    assert_eq!(remote.username, "mor_2314");
    assert_eq!(remote.name.unwrap().full_name(), "david morrison");
}

#[tokio::test]
async fn test_fetch_carts() {
    let server = FakeCatalog::start().await;
    let client = server.client();

    let carts = client.fetch_carts().await.unwrap();
    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].item_count(), 11);

    let cart = client.fetch_cart(CartId::new(1)).await.unwrap();
    assert_eq!(cart.user_id, UserId::new(1));

    let err = client.fetch_cart(CartId::new(40)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}
