//! Wire types for the catalog service.
//!
//! Products decode straight into [`luxe_core::Product`]; the types here
//! cover the login exchange and the user/cart directory endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use luxe_core::{AuthToken, CartId, Email, ProductId, User, UserId};

// =============================================================================
// Auth Types
// =============================================================================

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub token: String,
}

/// Result of a successful login: who signed in and their token.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Identity to store in the shopping session.
    pub user: User,
    /// Token to store alongside it.
    pub token: AuthToken,
}

// =============================================================================
// User Directory Types
// =============================================================================

/// A user record from `GET /users`.
///
/// The directory also returns the stored password; it is deliberately not
/// decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    /// Directory ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email as stored (not validated by the directory).
    pub email: String,
    /// Full name.
    #[serde(default)]
    pub name: Option<PersonName>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<RemoteAddress>,
}

impl RemoteUser {
    /// Convert into a session identity, dropping an unparseable email.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: Some(self.id),
            username: self.username.clone(),
            email: Email::parse(&self.email).ok(),
        }
    }
}

/// First and last name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonName {
    pub firstname: String,
    pub lastname: String,
}

impl PersonName {
    /// "First Last", as shown on the profile page.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Postal address from the user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteAddress {
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
}

// =============================================================================
// Remote Cart Types
// =============================================================================

/// A cart stored by the catalog service (`GET /carts`).
///
/// Unrelated to the local shopping cart, which never syncs with these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    pub id: CartId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub products: Vec<RemoteCartItem>,
}

impl RemoteCart {
    /// Total units across the cart's items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.products.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// One product reference inside a [`RemoteCart`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_directory_user_without_password() {
        let json = r#"{
            "address": {
                "geolocation": { "lat": "-37.3159", "long": "81.1496" },
                "city": "kilcoole",
                "street": "new road",
                "number": 7682,
                "zipcode": "12926-3874"
            },
            "id": 1,
            "email": "john@gmail.com",
            "username": "johnd",
            "password": "m38rmF$",
            "name": { "firstname": "john", "lastname": "doe" },
            "phone": "1-570-236-7033"
        }"#;
        let remote: RemoteUser = serde_json::from_str(json).unwrap();
        assert_eq!(remote.name.as_ref().unwrap().full_name(), "john doe");
        assert_eq!(remote.address.as_ref().unwrap().city, "kilcoole");

        let user = remote.to_user();
        assert_eq!(user.id, Some(UserId::new(1)));
        assert_eq!(user.email.unwrap().as_str(), "john@gmail.com");
    }

    #[test]
    fn test_bad_directory_email_is_dropped() {
        let remote = RemoteUser {
            id: UserId::new(2),
            username: "mor_2314".to_string(),
            email: "not-an-email".to_string(),
            name: None,
            phone: None,
            address: None,
        };
        assert!(remote.to_user().email.is_none());
    }

    #[test]
    fn test_decode_remote_cart() {
        let json = r#"{
            "id": 1,
            "userId": 1,
            "date": "2020-03-02T00:00:00.000Z",
            "products": [
                { "productId": 1, "quantity": 4 },
                { "productId": 2, "quantity": 1 }
            ],
            "__v": 0
        }"#;
        let cart: RemoteCart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.user_id, UserId::new(1));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.products[1].product_id, ProductId::new(2));
    }
}
