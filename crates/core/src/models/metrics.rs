use serde::{Deserialize, Serialize};

use super::category::Category;

/// Share of total units held in one category, as a percentage (0–100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub category: Category,
    pub percentage: f64,
}

/// Aggregate statistics over a set of records.
///
/// Values are kept at full precision; round with [`Metrics::rounded`] or
/// the `Display` impl when presenting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of records the metrics were computed over
    pub record_count: usize,

    /// Σ value of all records (see `ValuationBasis`)
    pub total_value: f64,

    /// Σ amount × buying price
    pub total_cost: f64,

    /// total_value - total_cost
    pub total_returns: f64,

    /// (total_returns / total_cost) × 100, or 0 when cost is 0
    pub percentage_returns: f64,

    /// Σ amount, the base for diversification shares
    pub total_amount: f64,

    /// The five canonical categories in order, then any unrecognized
    /// categories present in the records
    pub diversification: Vec<Allocation>,
}

impl Metrics {
    /// Diversification share of a category, 0 when it has no records.
    #[must_use]
    pub fn diversification_for(&self, category: &Category) -> f64 {
        self.diversification
            .iter()
            .find(|a| &a.category == category)
            .map_or(0.0, |a| a.percentage)
    }

    /// Copy with every figure rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            record_count: self.record_count,
            total_value: round2(self.total_value),
            total_cost: round2(self.total_cost),
            total_returns: round2(self.total_returns),
            percentage_returns: round2(self.percentage_returns),
            total_amount: round2(self.total_amount),
            diversification: self
                .diversification
                .iter()
                .map(|a| Allocation {
                    category: a.category.clone(),
                    percentage: round2(a.percentage),
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Portfolio Metrics:")?;
        writeln!(f, "Total Investment Value: ${:.2}", self.total_value)?;
        writeln!(f, "Total Returns: ${:.2}", self.total_returns)?;
        writeln!(f, "Percentage Returns: {:.2}%", self.percentage_returns)?;
        let parts: Vec<String> = self
            .diversification
            .iter()
            .map(|a| format!("{}: {:.2}%", a.category, a.percentage))
            .collect();
        write!(f, "Diversification: {}", parts.join(", "))
    }
}

/// Round half away from zero to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
