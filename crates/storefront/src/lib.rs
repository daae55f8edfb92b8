//! Luxe storefront library.
//!
//! Everything behind the storefront pages, independent of how they are
//! rendered:
//!
//! - [`catalog`]: async client for the remote product catalog
//! - [`store`]: the shopping session (cart, wishlist, filters, identity)
//!   and its persistence
//! - [`view`]: product grid filtering and sorting
//! - [`checkout`]: the checkout state machine and order totals
//! - [`routes`]: navigation targets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod view;

pub use catalog::{CatalogClient, CatalogError};
pub use config::{CatalogConfig, ConfigError, StorefrontConfig};
pub use routes::Route;
pub use store::{ShoppingSession, ShoppingStore};
