use crate::models::category::Category;
use crate::models::metrics::{Allocation, Metrics};
use crate::models::record::InvestmentRecord;
use crate::models::settings::ValuationBasis;

/// Computes portfolio metrics: value, cost, returns, diversification.
///
/// Pure business logic over a slice of records. No I/O.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Metrics with value equal to cost (no market price exists), so
    /// returns are always zero.
    pub fn compute<'a, I>(&self, records: I) -> Metrics
    where
        I: IntoIterator<Item = &'a InvestmentRecord>,
    {
        self.compute_with(records, ValuationBasis::CostBasis)
    }

    /// Metrics under the given valuation basis.
    ///
    /// - total cost: Σ amount × buying price
    /// - total value: same as cost for `CostBasis`; uses `current_price`
    ///   where set for `MarkedPrice`
    /// - percentage returns: returns / cost × 100, or 0 when cost is 0
    ///   or not finite
    /// - diversification: each category's share of Σ amount, 0 when Σ amount is 0
    pub fn compute_with<'a, I>(&self, records: I, basis: ValuationBasis) -> Metrics
    where
        I: IntoIterator<Item = &'a InvestmentRecord>,
    {
        let records: Vec<&InvestmentRecord> = records.into_iter().collect();

        let total_cost: f64 = records.iter().map(|r| r.cost()).sum();
        let total_value: f64 = match basis {
            ValuationBasis::CostBasis => total_cost,
            ValuationBasis::MarkedPrice => records.iter().map(|r| r.marked_value()).sum(),
        };
        // Overflowed totals (inf - inf) must not leak NaN into returns
        let total_returns = match basis {
            ValuationBasis::CostBasis => 0.0,
            ValuationBasis::MarkedPrice => finite_or_zero(total_value - total_cost),
        };
        let percentage_returns = if total_cost != 0.0 && total_cost.is_finite() {
            finite_or_zero((total_returns / total_cost) * 100.0)
        } else {
            0.0
        };

        let total_amount: f64 = records.iter().map(|r| r.amount).sum();

        // Canonical categories first, then unrecognized ones in first-seen order
        let mut amounts: Vec<(Category, f64)> =
            Category::ALL.iter().map(|c| (c.clone(), 0.0)).collect();
        for record in &records {
            match amounts.iter_mut().find(|(c, _)| c == &record.category) {
                Some((_, sum)) => *sum += record.amount,
                None => amounts.push((record.category.clone(), record.amount)),
            }
        }

        let diversification = amounts
            .into_iter()
            .map(|(category, amount)| Allocation {
                category,
                percentage: if total_amount != 0.0 {
                    (amount / total_amount) * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Metrics {
            record_count: records.len(),
            total_value,
            total_cost,
            total_returns,
            percentage_returns,
            total_amount,
            diversification,
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
