//! Login, logout and profile.

use secrecy::SecretString;
use tracing::{info, warn};

use luxe_storefront::catalog::RemoteUser;

use super::App;
use crate::error::Result;
use crate::output;

/// Sign in against the catalog and remember the shopper.
///
/// The directory lookup that fills in ID and email is best effort.
///
/// # Errors
///
/// Returns an error if the catalog rejects the credentials or is
/// unreachable.
pub async fn login(app: &mut App, username: &str, password: &SecretString) -> Result<()> {
    let session = app.catalog.login(username, password).await?;

    let user = match app.catalog.find_user(username).await {
        Ok(Some(remote)) => remote.to_user(),
        Ok(None) => session.user,
        Err(e) => {
            warn!(error = %e, "Could not load user directory entry");
            session.user
        }
    };

    info!(username = %user.username, "Signed in");
    output::line(&format!("Welcome, {}!", user.username));
    app.store.set_user(user, session.token);
    Ok(())
}

/// Forget the signed-in shopper. Cart and wishlist stay.
pub fn logout(app: &mut App) {
    if app.store.is_logged_in() {
        app.store.logout();
        output::line("Signed out");
    } else {
        output::line("Not signed in");
    }
}

/// Show the profile page.
pub async fn profile(app: &App) {
    let directory: Option<RemoteUser> = match app.store.user().and_then(|u| u.id) {
        Some(id) => app
            .catalog
            .fetch_user(id)
            .await
            .inspect_err(|e| warn!(error = %e, "Could not load profile details"))
            .ok(),
        None => None,
    };
    output::profile(app.store.session(), directory.as_ref());
}
