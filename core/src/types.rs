//! Shared primitive types used across the bill tracker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned bill identifier.
pub type BillId = i64;

/// Store-assigned payment identifier.
pub type PaymentId = i64;

/// Monetary value in the user's currency.
pub type Money = f64;

/// Fixed, closed set of bill classifications.
/// Declaration order is the display order used by the bill board.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum Category {
    Utilities,
    #[serde(rename = "Rent/Mortgage")]
    RentMortgage,
    Insurance,
    Subscriptions,
    #[serde(rename = "Phone/Internet")]
    PhoneInternet,
    #[serde(rename = "Credit Cards")]
    CreditCards,
    Loans,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Utilities,
        Category::RentMortgage,
        Category::Insurance,
        Category::Subscriptions,
        Category::PhoneInternet,
        Category::CreditCards,
        Category::Loans,
        Category::Other,
    ];

    /// Display name, identical to the serialized form and the stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Utilities     => "Utilities",
            Category::RentMortgage  => "Rent/Mortgage",
            Category::Insurance     => "Insurance",
            Category::Subscriptions => "Subscriptions",
            Category::PhoneInternet => "Phone/Internet",
            Category::CreditCards   => "Credit Cards",
            Category::Loans         => "Loans",
            Category::Other         => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Utilities     => "⚡",
            Category::RentMortgage  => "🏠",
            Category::Insurance     => "🛡️",
            Category::Subscriptions => "📱",
            Category::PhoneInternet => "📡",
            Category::CreditCards   => "💳",
            Category::Loans         => "🏦",
            Category::Other         => "📋",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Category::RentMortgage).unwrap();
        assert_eq!(json, "\"Rent/Mortgage\"");
        let parsed: Category = serde_json::from_str("\"Credit Cards\"").unwrap();
        assert_eq!(parsed, Category::CreditCards);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn default_category_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }
}
