//! Command implementations.
//!
//! Each command runs against an [`App`]: one catalog client and the
//! shopper's persisted session.

pub mod account;
pub mod browse;
pub mod cart;
pub mod checkout;

use luxe_core::{Product, ProductId};
use luxe_storefront::catalog::{CatalogClient, CatalogError};
use luxe_storefront::config::StorefrontConfig;
use luxe_storefront::store::{FileSnapshotStore, ShoppingStore};

use crate::error::{AppError, Result};

/// Shared state for one command invocation.
#[derive(Debug)]
pub struct App {
    pub catalog: CatalogClient,
    pub store: ShoppingStore,
}

impl App {
    /// Build the catalog client and restore the session from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn open(config: &StorefrontConfig) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let store = ShoppingStore::open(FileSnapshotStore::new(&config.storage_path));
        Ok(Self { catalog, store })
    }

    /// Fetch a product, mapping a missing one to a friendlier error.
    async fn product(&self, id: ProductId) -> Result<Product> {
        tracing::debug!(product_id = %id, "Loading product");
        match self.catalog.fetch_product(id).await {
            Ok(product) => Ok(product),
            Err(CatalogError::NotFound(_)) => Err(AppError::NotFound(format!("Product {id}"))),
            Err(e) => Err(e.into()),
        }
    }
}
