use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::record::{parse_iso_date, parse_real, InvestmentInput, InvestmentRecord};

/// Turns raw entry text into a validated `InvestmentRecord`.
///
/// Pure: no I/O, no ledger access.
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a proposed entry.
    ///
    /// Checks, in order: every field present (blank counts as missing),
    /// category is one of the five canonical ones, amount and price are
    /// finite reals greater than zero whose product is finite, and the date is a real calendar
    /// date written as `YYYY-MM-DD`.
    pub fn validate(
        &self,
        category: &str,
        amount_text: &str,
        unit_price_text: &str,
        date_text: &str,
    ) -> Result<InvestmentRecord, CoreError> {
        let category = require("investment type", category)?;
        let amount_text = require("amount", amount_text)?;
        let unit_price_text = require("buying price", unit_price_text)?;
        let date_text = require("transaction date", date_text)?;

        let category = Category::parse_canonical(category)
            .ok_or_else(|| CoreError::UnknownCategory(category.to_string()))?;

        let amount = parse_number("amount", amount_text)?;
        let unit_price = parse_number("buying price", unit_price_text)?;
        require_positive("amount", amount)?;
        require_positive("buying price", unit_price)?;
        if !(amount * unit_price).is_finite() {
            return Err(CoreError::NumericFormat {
                field: "amount",
                value: format!("{amount_text} x {unit_price_text}"),
            });
        }

        let transaction_date =
            parse_iso_date(date_text).ok_or_else(|| CoreError::DateFormat(date_text.to_string()))?;

        Ok(InvestmentRecord::new(category, amount, unit_price, transaction_date))
    }

    pub fn validate_input(&self, input: &InvestmentInput) -> Result<InvestmentRecord, CoreError> {
        self.validate(
            &input.category,
            &input.amount,
            &input.unit_price,
            &input.transaction_date,
        )
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

fn require<'a>(field: &'static str, text: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(CoreError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, CoreError> {
    parse_real(text).ok_or_else(|| CoreError::NumericFormat {
        field,
        value: text.to_string(),
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<(), CoreError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::NonPositiveValue { field, value })
    }
}
