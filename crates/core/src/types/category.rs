//! Catalog filter categories.
//!
//! The listing page exposes a fixed facet vocabulary. Each principal
//! category maps to exactly one `product_type` value; `accessories` is the
//! catch-all for every type outside the principal set.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product listing facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Phones,
    Laptops,
    Tablets,
    Wearables,
    Accessories,
}

impl Category {
    /// Product types with a dedicated facet. Wearables are principal, so a
    /// smartwatch never shows up under `accessories`.
    pub const PRINCIPAL_TYPES: [&'static str; 4] = ["phone", "laptop", "tablet", "wearable"];

    /// The `product_type` value this facet selects, or `None` for the
    /// accessories catch-all.
    #[must_use]
    pub const fn product_type(&self) -> Option<&'static str> {
        match self {
            Self::Phones => Some("phone"),
            Self::Laptops => Some("laptop"),
            Self::Tablets => Some("tablet"),
            Self::Wearables => Some("wearable"),
            Self::Accessories => None,
        }
    }

    /// The token used in query strings and form values.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Phones => "phones",
            Self::Laptops => "laptops",
            Self::Tablets => "tablets",
            Self::Wearables => "wearables",
            Self::Accessories => "accessories",
        }
    }

    /// Parse a facet token; unknown tokens are ignored by callers.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "phones" => Some(Self::Phones),
            "laptops" => Some(Self::Laptops),
            "tablets" => Some(Self::Tablets),
            "wearables" => Some(Self::Wearables),
            "accessories" => Some(Self::Accessories),
            _ => None,
        }
    }

    /// The full facet vocabulary, in display order.
    pub const ALL: [Self; 5] = [
        Self::Phones,
        Self::Laptops,
        Self::Tablets,
        Self::Wearables,
        Self::Accessories,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("gadgets"), None);
    }

    #[test]
    fn test_principal_types_cover_every_principal_facet() {
        for category in Category::ALL {
            if let Some(ty) = category.product_type() {
                assert!(Category::PRINCIPAL_TYPES.contains(&ty));
            }
        }
    }
}
