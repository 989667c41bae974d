use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// Stable in-memory handle for a ledger entry.
///
/// Assigned when a record enters memory (on add or on load) and never
/// persisted, so it stays valid while the displayed view and the stored
/// catalog diverge in order or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single purchase transaction.
///
/// Serializes to the data file layout: `type`, `amount`, `buying_price`,
/// `transaction_date` and the optional `current_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecord {
    #[serde(rename = "type")]
    pub category: Category,

    /// Units purchased
    pub amount: f64,

    /// Price per unit at purchase time
    #[serde(rename = "buying_price")]
    pub unit_price: f64,

    /// Purchase date (daily granularity), stored as `YYYY-MM-DD`
    pub transaction_date: NaiveDate,

    /// Latest known price per unit, used only by marked-price valuation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

impl InvestmentRecord {
    pub fn new(category: Category, amount: f64, unit_price: f64, transaction_date: NaiveDate) -> Self {
        Self {
            category,
            amount,
            unit_price,
            transaction_date,
            current_price: None,
        }
    }

    /// Cost basis of this purchase: `amount × unit_price`.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.amount * self.unit_price
    }

    /// Value at the latest known price, falling back to the purchase price.
    #[must_use]
    pub fn marked_value(&self) -> f64 {
        self.amount * self.current_price.unwrap_or(self.unit_price)
    }
}

impl std::fmt::Display for InvestmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Investment Type: {}", self.category)?;
        writeln!(f, "Amount: {:.2}", self.amount)?;
        writeln!(f, "Buying Price: {:.2}", self.unit_price)?;
        write!(f, "Transaction Date: {}", self.transaction_date.format("%Y-%m-%d"))
    }
}

/// Raw, unvalidated field text for a proposed record, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentInput {
    pub category: String,
    pub amount: String,
    pub unit_price: String,
    pub transaction_date: String,
}

impl InvestmentInput {
    pub fn new(
        category: impl Into<String>,
        amount: impl Into<String>,
        unit_price: impl Into<String>,
        transaction_date: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
            unit_price: unit_price.into(),
            transaction_date: transaction_date.into(),
        }
    }
}

/// One line of the record listing: the category label and its view position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub category: Category,
    pub position: usize,
}

/// Parse a date written exactly as `YYYY-MM-DD` (zero-padded, no time part).
#[must_use]
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse a real number from text, ignoring surrounding whitespace.
/// Rejects NaN and infinities.
#[must_use]
pub fn parse_real(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
