//! HTTP client for the catalog service.

use std::sync::Arc;

use luxe_core::{AuthToken, CartId, Product, ProductId, User, UserId};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::types::{LoginResponse, LoginSession, RemoteCart, RemoteUser};
use crate::config::CatalogConfig;

/// Longest slice of a response body copied into log lines.
const LOGGED_BODY_CHARS: usize = 500;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote catalog service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET a JSON resource.
    ///
    /// Non-success statuses become [`CatalogError::Unavailable`]; a success
    /// with an empty or `null` body becomes [`CatalogError::NotFound`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: String,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                resource = %resource,
                body = %truncate(&body),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Unavailable {
                resource,
                status: status.as_u16(),
            });
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            debug!(resource = %resource, "Catalog returned an empty body");
            return Err(CatalogError::NotFound(resource));
        }

        serde_json::from_str(trimmed).map_err(|source| {
            tracing::error!(
                error = %source,
                resource = %resource,
                body = %truncate(&body),
                "Failed to parse catalog response"
            );
            CatalogError::InvalidResponse { resource, source }
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self.get_json("products", "products".to_string()).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the catalog has no such product,
    /// or any of the transport/status/decode errors of [`Self::fetch_products`].
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_json(&format!("products/{id}"), format!("product {id}"))
            .await
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Check credentials against the catalog's login endpoint.
    ///
    /// The password is only exposed while the request body is built.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AuthenticationFailed`] on any non-success
    /// status and [`CatalogError::Network`] on transport failure.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginSession, CatalogError> {
        let url = self.endpoint("auth/login")?;
        let body = serde_json::json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let response = self.inner.client.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = %status, "Login rejected");
            return Err(CatalogError::AuthenticationFailed {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let login: LoginResponse =
            serde_json::from_str(&text).map_err(|source| CatalogError::InvalidResponse {
                resource: "login".to_string(),
                source,
            })?;

        debug!("Login succeeded");
        Ok(LoginSession {
            user: User::from_username(username),
            token: AuthToken::new(login.token),
        })
    }

    // =========================================================================
    // Directory Methods
    // =========================================================================

    /// Fetch every user in the directory.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_products`].
    #[instrument(skip(self))]
    pub async fn fetch_users(&self) -> Result<Vec<RemoteUser>, CatalogError> {
        self.get_json("users", "users".to_string()).await
    }

    /// Fetch one user record.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_product`].
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn fetch_user(&self, id: UserId) -> Result<RemoteUser, CatalogError> {
        self.get_json(&format!("users/{id}"), format!("user {id}"))
            .await
    }

    /// Look up the directory record for a username.
    ///
    /// Used after login to fill in the user's ID and email, since the login
    /// endpoint only returns a token.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_users`].
    #[instrument(skip(self))]
    pub async fn find_user(&self, username: &str) -> Result<Option<RemoteUser>, CatalogError> {
        let users = self.fetch_users().await?;
        Ok(users.into_iter().find(|user| user.username == username))
    }

    /// Fetch every stored cart.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_products`].
    #[instrument(skip(self))]
    pub async fn fetch_carts(&self) -> Result<Vec<RemoteCart>, CatalogError> {
        self.get_json("carts", "carts".to_string()).await
    }

    /// Fetch one stored cart.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_product`].
    #[instrument(skip(self), fields(cart_id = %id))]
    pub async fn fetch_cart(&self, id: CartId) -> Result<RemoteCart, CatalogError> {
        self.get_json(&format!("carts/{id}"), format!("cart {id}"))
            .await
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOGGED_BODY_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_below_base_path() {
        let client = client("http://localhost:9000/v1/");
        assert_eq!(
            client.endpoint("products/3").unwrap().as_str(),
            "http://localhost:9000/v1/products/3"
        );
        assert_eq!(
            client.endpoint("auth/login").unwrap().as_str(),
            "http://localhost:9000/v1/auth/login"
        );
    }

    #[test]
    fn test_truncate_limits_logged_body() {
        let body = "x".repeat(2_000);
        assert_eq!(truncate(&body).len(), LOGGED_BODY_CHARS);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_debug_shows_base_url_only() {
        let debug = format!("{:?}", client("https://fakestoreapi.com/"));
        assert!(debug.contains("fakestoreapi.com"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Grab a free port, then close it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = client(&format!("http://127.0.0.1:{port}/"));
        let err = client.fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
