use serde::{Deserialize, Serialize};

/// The investment category of a record.
///
/// The five canonical categories are the only ones accepted on entry.
/// Records loaded from disk may carry any other string; those are kept
/// as `Unrecognized` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Stocks,
    Bonds,
    RealEstate,
    MutualFunds,
    Other,
    /// A category string from an externally edited file
    Unrecognized(String),
}

impl Category {
    /// Canonical categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Stocks,
        Category::Bonds,
        Category::RealEstate,
        Category::MutualFunds,
        Category::Other,
    ];

    /// Parse one of the canonical names. Accepts both the display form
    /// ("Real Estate") and the compact form ("RealEstate").
    #[must_use]
    pub fn parse_canonical(name: &str) -> Option<Category> {
        match name {
            "Stocks" => Some(Category::Stocks),
            "Bonds" => Some(Category::Bonds),
            "Real Estate" | "RealEstate" => Some(Category::RealEstate),
            "Mutual Funds" | "MutualFunds" => Some(Category::MutualFunds),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Name as stored in the data file and shown in listings.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Category::Stocks => "Stocks",
            Category::Bonds => "Bonds",
            Category::RealEstate => "Real Estate",
            Category::MutualFunds => "Mutual Funds",
            Category::Other => "Other",
            Category::Unrecognized(s) => s,
        }
    }

    #[must_use]
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse_canonical(&s).unwrap_or(Category::Unrecognized(s))
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
