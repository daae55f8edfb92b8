//! Sentry integration helpers.
//!
//! The storefront reports failures through the typed errors of each module
//! ([`CatalogError`](crate::catalog::CatalogError),
//! [`PersistError`](crate::store::PersistError),
//! [`ConfigError`](crate::config::ConfigError)). These helpers attach the
//! context Sentry needs to make those reports useful: who the shopper is and
//! what they did leading up to the failure.

use luxe_core::User;

/// Capture an error to Sentry and log it with the resulting event ID.
///
/// When Sentry is not initialized this only logs.
pub fn capture_error<E>(error: &E, context: &str)
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "{context}"
    );
}

/// Set the Sentry user context from the signed-in shopper.
///
/// Call this after successful login to associate errors with users.
pub fn set_sentry_user(user: &User) {
    let id = user
        .id
        .map_or_else(|| user.username.clone(), |id| id.to_string());

    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(id),
            username: Some(user.username.clone()),
            email: user.email.as_ref().map(|e| e.as_str().to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use luxe_core::{Email, UserId};

    use super::*;

    // Without an initialized client every helper must be a silent no-op.

    #[test]
    fn test_helpers_without_client() {
        let user = User {
            id: Some(UserId::new(1)),
            username: "johnd".to_string(),
            email: Some(Email::parse("john@gmail.com").unwrap()),
        };
        set_sentry_user(&user);
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "1")]));
        clear_sentry_user();
    }

    #[test]
    fn test_capture_error_without_client() {
        let err = std::io::Error::other("disk full");
        capture_error(&err, "Snapshot write failed");
    }
}
