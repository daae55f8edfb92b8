//! Remote catalog service client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP using `reqwest`
//! - The catalog is the source of truth for products - no local copy, no cache
//! - One request per call, no retries: failures surface immediately so the
//!   caller can leave its loading state and show a message
//!
//! # Endpoints
//!
//! - `GET /products`, `GET /products/{id}`
//! - `POST /auth/login`
//! - `GET /users`, `GET /users/{id}`, `GET /carts`, `GET /carts/{id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use luxe_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.fetch_products().await?;
//! let product = client.fetch_product(products[0].id).await?;
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A catalog endpoint answered with a non-success status.
    #[error("Catalog unavailable: {resource} returned HTTP {status}")]
    Unavailable {
        /// What was being fetched (e.g., "products", "product 3").
        resource: String,
        /// HTTP status code.
        status: u16,
    },

    /// The login endpoint rejected the credentials.
    #[error("Authentication failed: HTTP {status}")]
    AuthenticationFailed {
        /// HTTP status code.
        status: u16,
    },

    /// The endpoint succeeded but returned nothing for the resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded.
    #[error("Invalid response for {resource}: {source}")]
    InvalidResponse {
        /// What was being fetched.
        resource: String,
        /// Decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint URL could not be built from the configured base URL.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

impl CatalogError {
    /// Message suitable for showing to the shopper.
    ///
    /// Internal details (status codes, decode errors) stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the store. Check your connection and try again.".to_string()
            }
            Self::Unavailable { resource, .. } => format!("Failed to fetch {resource}"),
            Self::AuthenticationFailed { .. } => {
                "Login failed. Check your username and password.".to_string()
            }
            Self::NotFound(resource) => format!("Sorry, {resource} could not be found"),
            Self::InvalidResponse { .. } | Self::Url(_) => {
                "The store returned an unexpected response.".to_string()
            }
        }
    }

    /// Whether this failure points at the catalog service or our own setup
    /// rather than at the shopper's input.
    #[must_use]
    pub const fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::InvalidResponse { .. } | Self::Url(_)
        )
    }
}
