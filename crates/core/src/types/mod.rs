//! Core types for Luxe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod sort;
pub mod user;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceRange};
pub use product::{CartLine, Product, Rating, WishlistEntry};
pub use sort::{SortBy, SortByParseError};
pub use user::{AuthToken, User};
