//! Unified error handling with Sentry integration.
//!
//! Every command returns `Result<(), AppError>`. Failures that point at the
//! catalog service or our own configuration are captured to Sentry before
//! the shopper sees a short message; input mistakes are only logged.

use thiserror::Error;

use luxe_storefront::catalog::CatalogError;
use luxe_storefront::config::ConfigError;
use luxe_storefront::error::capture_error;

/// Application-level error type for the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The shopper referenced something that doesn't exist locally.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Checkout could not move past a step.
    #[error("Checkout incomplete: {0}")]
    Checkout(String),

    /// Bad input on the command line.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the failure is ours rather than the shopper's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Catalog(err) => err.is_service_error(),
            Self::NotFound(_) | Self::Checkout(_) | Self::BadRequest(_) => false,
        }
    }

    /// Message suitable for showing to the shopper.
    ///
    /// Don't expose internal error details.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) => "The store is misconfigured. Check your environment.".to_string(),
            Self::Catalog(err) => err.user_message(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Checkout(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }

    /// Capture server errors to Sentry; log everything else.
    pub fn report(&self) {
        if self.is_server_error() {
            capture_error(self, "Command error");
        } else {
            tracing::warn!(error = %self, "Command failed");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
