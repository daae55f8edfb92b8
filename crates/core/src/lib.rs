//! Luxe Core - Shared types library.
//!
//! This crate provides the domain types used across the Luxe components:
//! - `storefront` - Catalog client, shopping state store, checkout flow
//! - `cli` - Terminal front end driving the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. Everything here is plain data that serializes cleanly into
//! the persisted shopping session snapshot.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, emails, products, users and sort orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
