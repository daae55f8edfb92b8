//! Catalog sort orders.

use serde::{Deserialize, Serialize};

/// Error returned when a sort order string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid sort order: {0} (expected default, price-low, price-high, name-az or name-za)")]
pub struct SortByParseError(pub String);

/// Ordering applied to the product grid.
///
/// Serialized with the same kebab-case names the filter panel uses
/// (`"price-low"`, `"name-az"`, ...). `"name"` is accepted as an alias of
/// [`SortBy::NameAsc`] because the home page sort dropdown emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortBy {
    /// Keep the catalog's own order.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Cheapest first.
    #[serde(rename = "price-low")]
    PriceAsc,
    /// Most expensive first.
    #[serde(rename = "price-high")]
    PriceDesc,
    /// Title A to Z.
    #[serde(rename = "name-az", alias = "name")]
    NameAsc,
    /// Title Z to A.
    #[serde(rename = "name-za")]
    NameDesc,
}

impl SortBy {
    /// Every sort order, in the order the filter panel lists them.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// Wire name of this sort order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-low",
            Self::PriceDesc => "price-high",
            Self::NameAsc => "name-az",
            Self::NameDesc => "name-za",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortBy {
    type Err = SortByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "price-low" => Ok(Self::PriceAsc),
            "price-high" => Ok(Self::PriceDesc),
            "name-az" | "name" => Ok(Self::NameAsc),
            "name-za" => Ok(Self::NameDesc),
            _ => Err(SortByParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for sort in SortBy::ALL {
            assert_eq!(sort.to_string().parse::<SortBy>().unwrap(), sort);
        }
    }

    #[test]
    fn test_name_alias() {
        assert_eq!("name".parse::<SortBy>().unwrap(), SortBy::NameAsc);
        let parsed: SortBy = serde_json::from_str("\"name\"").unwrap();
        assert_eq!(parsed, SortBy::NameAsc);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "cheapest".parse::<SortBy>().unwrap_err();
        assert_eq!(err, SortByParseError("cheapest".to_string()));
    }

    #[test]
    fn test_serializes_kebab_names() {
        assert_eq!(
            serde_json::to_string(&SortBy::PriceDesc).unwrap(),
            "\"price-high\""
        );
    }
}
