//! Storefront navigation targets.

use std::fmt;
use std::str::FromStr;

use luxe_core::ProductId;

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: the product grid.
    Home,
    /// `/product/:id`
    Product(ProductId),
    /// `/cart`
    Cart,
    /// `/wishlist`
    Wishlist,
    /// `/checkout`
    Checkout,
    /// `/profile`
    Profile,
    /// `/login`
    Login,
}

impl Route {
    /// URL path for the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Product(id) => format!("/product/{id}"),
            Self::Cart => "/cart".to_string(),
            Self::Wishlist => "/wishlist".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Login => "/login".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Error returned for a path that matches no route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route for path: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(s.to_string());
        let path = s.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(s);

        match path {
            "/" => Ok(Self::Home),
            "/cart" => Ok(Self::Cart),
            "/wishlist" => Ok(Self::Wishlist),
            "/checkout" => Ok(Self::Checkout),
            "/profile" => Ok(Self::Profile),
            "/login" => Ok(Self::Login),
            _ => path
                .strip_prefix("/product/")
                .and_then(|id| id.parse::<ProductId>().ok())
                .map(Self::Product)
                .ok_or_else(unknown),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Product(ProductId::new(7)).path(), "/product/7");
        assert_eq!(Route::Checkout.to_string(), "/checkout");
    }

    #[test]
    fn test_parse() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("/wishlist/".parse::<Route>().unwrap(), Route::Wishlist);
        assert_eq!(
            "/product/12".parse::<Route>().unwrap(),
            Route::Product(ProductId::new(12))
        );
        assert!("/product/abc".parse::<Route>().is_err());
        assert!("/admin".parse::<Route>().is_err());
    }
}
