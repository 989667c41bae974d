use std::str::FromStr;

use crate::errors::CoreError;

use super::category::Category;

/// Which categories a filter lets through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact match on the category (unrecognized strings compare verbatim)
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn accepts(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    /// Accepts "All" or any category name. Non-canonical names filter for
    /// that literal string, so externally edited categories stay reachable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::InvalidFilter("empty category filter".into()));
        }
        if s == "All" {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(Category::from(s.to_string())))
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(c) => write!(f, "{c}"),
        }
    }
}

/// How recent a record's transaction date must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecencyFilter {
    #[default]
    All,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl RecencyFilter {
    /// Maximum age in days, inclusive. `None` for `All`.
    #[must_use]
    pub fn max_age_days(&self) -> Option<i64> {
        match self {
            RecencyFilter::All => None,
            RecencyFilter::Last7Days => Some(7),
            RecencyFilter::Last30Days => Some(30),
            RecencyFilter::Last90Days => Some(90),
        }
    }
}

impl FromStr for RecencyFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "All" => Ok(RecencyFilter::All),
            "Last 7 Days" => Ok(RecencyFilter::Last7Days),
            "Last 30 Days" => Ok(RecencyFilter::Last30Days),
            "Last 90 Days" => Ok(RecencyFilter::Last90Days),
            other => Err(CoreError::InvalidFilter(format!(
                "unknown date range '{other}' (expected All, Last 7 Days, Last 30 Days or Last 90 Days)"
            ))),
        }
    }
}

impl std::fmt::Display for RecencyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecencyFilter::All => write!(f, "All"),
            RecencyFilter::Last7Days => write!(f, "Last 7 Days"),
            RecencyFilter::Last30Days => write!(f, "Last 30 Days"),
            RecencyFilter::Last90Days => write!(f, "Last 90 Days"),
        }
    }
}

/// The pair of predicates currently applied to the displayed view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveFilter {
    pub category: CategoryFilter,
    pub recency: RecencyFilter,
}

impl ActiveFilter {
    pub fn new(category: CategoryFilter, recency: RecencyFilter) -> Self {
        Self { category, recency }
    }

    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.category == CategoryFilter::All && self.recency == RecencyFilter::All
    }
}
