//! Integration tests for Luxe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxe-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalog`] serves a small product
//! catalog, user directory and login endpoint on a local port, shaped like
//! the real catalog service.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP client against the fake catalog
//! - `shopping_session` - Store, persistence and view logic together
//! - `checkout_flow` - Cart to order confirmation, end to end

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use luxe_storefront::catalog::CatalogClient;
use luxe_storefront::config::CatalogConfig;

/// Username the fake login endpoint accepts.
pub const TEST_USERNAME: &str = "johnd";

/// Password the fake login endpoint accepts.
pub const TEST_PASSWORD: &str = "m38rmF$";

/// Token the fake login endpoint issues.
pub const TEST_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test";

// =============================================================================
// Fake Catalog Server
// =============================================================================

/// A catalog service running on a local port for the life of the value.
pub struct FakeCatalog {
    base_url: Url,
    task: JoinHandle<()>,
}

impl FakeCatalog {
    /// Serve the standard fixtures.
    pub async fn start() -> Self {
        Self::serve(fixture_router()).await
    }

    /// Serve an arbitrary router, e.g. one that always fails.
    pub async fn serve(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).unwrap(),
            task,
        }
    }

    /// Base URL of the running server.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// A catalog client pointing at this server.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.config()).unwrap()
    }
}

impl Drop for FakeCatalog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Router serving the fixture catalog with the real service's quirks: an
/// unknown product is a `200` with an empty body, and bad credentials are a
/// `401` with a plain-text body.
pub fn fixture_router() -> Router {
    Router::new()
        .route("/products", get(|| async { Json(fixture_products()) }))
        .route("/products/{id}", get(product_by_id))
        .route("/auth/login", post(login))
        .route("/users", get(|| async { Json(fixture_users()) }))
        .route("/users/{id}", get(user_by_id))
        .route("/carts", get(|| async { Json(fixture_carts()) }))
        .route("/carts/{id}", get(cart_by_id))
}

fn find_by_id(items: Value, id: i64) -> Response {
    items
        .as_array()
        .and_then(|items| items.iter().find(|item| item["id"] == id).cloned())
        .map_or_else(|| (StatusCode::OK, "").into_response(), |item| Json(item).into_response())
}

async fn product_by_id(Path(id): Path<i64>) -> Response {
    find_by_id(fixture_products(), id)
}

async fn user_by_id(Path(id): Path<i64>) -> Response {
    find_by_id(fixture_users(), id)
}

async fn cart_by_id(Path(id): Path<i64>) -> Response {
    find_by_id(fixture_carts(), id)
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == TEST_USERNAME && body["password"] == TEST_PASSWORD {
        Json(json!({ "token": TEST_TOKEN })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "username or password is incorrect").into_response()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Six products across three categories.
#[must_use]
pub fn fixture_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style, contrast raglan long sleeve.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 8,
            "title": "Pierced Owl Rose Gold Plated Stainless Steel Double",
            "price": 10.99,
            "description": "Rose Gold Plated Double Flared Tunnel Plug Earrings.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/51UDEzMJVpL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 1.9, "count": 100 }
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        },
        {
            "id": 13,
            "title": "Acer SB220Q bi 21.5 inches Full HD IPS Monitor",
            "price": 599,
            "description": "21.5 inches Full HD widescreen IPS display.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/81QpkIctqPL._AC_SX679_.jpg",
            "rating": { "rate": 2.9, "count": 250 }
        }
    ])
}

/// Two directory users, including the one [`TEST_USERNAME`] names.
#[must_use]
pub fn fixture_users() -> Value {
    json!([
        {
            "id": 1,
            "email": "john@gmail.com",
            "username": TEST_USERNAME,
            "password": TEST_PASSWORD,
            "name": { "firstname": "john", "lastname": "doe" },
            "address": {
                "city": "kilcoole",
                "street": "new road",
                "number": 7682,
                "zipcode": "12926-3874",
                "geolocation": { "lat": "-37.3159", "long": "81.1496" }
            },
            "phone": "1-570-236-7033"
        },
        {
            "id": 2,
            "email": "morrison@gmail.com",
            "username": "mor_2314",
            "password": "83r5^_",
            "name": { "firstname": "david", "lastname": "morrison" },
            "address": {
                "city": "kilcoole",
                "street": "Lovers Ln",
                "number": 7267,
                "zipcode": "12926-3874",
                "geolocation": { "lat": "-37.3159", "long": "81.1496" }
            },
            "phone": "1-570-236-7033"
        }
    ])
}

/// One stored cart for user 1.
#[must_use]
pub fn fixture_carts() -> Value {
    json!([
        {
            "id": 1,
            "userId": 1,
            "date": "2020-03-02T00:00:00.000Z",
            "products": [
                { "productId": 1, "quantity": 4 },
                { "productId": 2, "quantity": 1 },
                { "productId": 5, "quantity": 6 }
            ],
            "__v": 0
        }
    ])
}
