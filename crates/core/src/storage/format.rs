use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::record::{parse_iso_date, parse_real, InvestmentRecord};

use super::traits::{DroppedRecord, LoadOutcome, LoadReport};

/// Field names of a stored record.
pub const FIELD_TYPE: &str = "type";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_BUYING_PRICE: &str = "buying_price";
pub const FIELD_TRANSACTION_DATE: &str = "transaction_date";
pub const FIELD_CURRENT_PRICE: &str = "current_price";

/// Serialize records to the data file layout: a JSON array of objects.
pub fn encode(records: &[InvestmentRecord], pretty: bool) -> Result<String, CoreError> {
    let result = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    result.map_err(|e| CoreError::Serialization(format!("Failed to serialize records: {e}")))
}

/// Parse the data file contents.
///
/// The document as a whole must be a JSON array (blank input counts as an
/// empty one). Individual entries are coerced leniently: numbers may be
/// JSON numbers or numeric strings, unknown categories pass through, and
/// extra keys are ignored. Entries that cannot be coerced are dropped and
/// listed in the report.
pub fn decode(data: &str) -> Result<LoadOutcome, CoreError> {
    if data.trim().is_empty() {
        return Ok(LoadOutcome::default());
    }

    let entries: Vec<Value> = serde_json::from_str(data).map_err(|e| {
        CoreError::Deserialization(format!("Data file is not a JSON array of records: {e}"))
    })?;

    let mut records = Vec::with_capacity(entries.len());
    let mut report = LoadReport::default();

    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(entry) {
            Ok(record) => records.push(record),
            Err(reason) => {
                let category = entry
                    .get(FIELD_TYPE)
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string));
                warn!(
                    index,
                    category = category.as_deref().unwrap_or("<none>"),
                    %reason,
                    "Invalid investment data, skipping"
                );
                report.dropped.push(DroppedRecord {
                    index,
                    category,
                    reason,
                });
            }
        }
    }

    Ok(LoadOutcome { records, report })
}

fn decode_entry(entry: &Value) -> Result<InvestmentRecord, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| "entry is not an object".to_string())?;

    let category = match required(obj, FIELD_TYPE)? {
        Value::String(s) => Category::from(s.clone()),
        other => Category::Unrecognized(other.to_string()),
    };
    let amount = coerce_number(required(obj, FIELD_AMOUNT)?)
        .ok_or_else(|| format!("'{FIELD_AMOUNT}' is not numeric"))?;
    let unit_price = coerce_number(required(obj, FIELD_BUYING_PRICE)?)
        .ok_or_else(|| format!("'{FIELD_BUYING_PRICE}' is not numeric"))?;
    let transaction_date = required(obj, FIELD_TRANSACTION_DATE)?
        .as_str()
        .and_then(parse_iso_date)
        .ok_or_else(|| format!("'{FIELD_TRANSACTION_DATE}' is not a YYYY-MM-DD date"))?;
    let current_price = match obj.get(FIELD_CURRENT_PRICE) {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            coerce_number(v).ok_or_else(|| format!("'{FIELD_CURRENT_PRICE}' is not numeric"))?,
        ),
    };

    Ok(InvestmentRecord {
        category,
        amount,
        unit_price,
        transaction_date,
        current_price,
    })
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(format!("missing '{key}'")),
        Some(v) => Ok(v),
    }
}

/// A JSON number, or a string holding one.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_real(s),
        _ => None,
    }
}
