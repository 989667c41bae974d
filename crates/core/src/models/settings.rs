use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Default data file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "investments.json";

/// How `total_value` is derived in portfolio metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValuationBasis {
    /// Value is Σ amount × buying price, identical to cost. Returns are always zero.
    #[default]
    CostBasis,
    /// Value uses each record's `current_price` when set, else its buying price.
    MarkedPrice,
}

/// User-configurable settings. Every field has a default, so a partial
/// (or empty) config file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the JSON data file holding every recorded investment.
    pub data_file: PathBuf,

    /// Valuation used for `total_value` and returns.
    pub valuation: ValuationBasis,

    /// Write the data file indented rather than compact.
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            valuation: ValuationBasis::default(),
            pretty_json: true,
        }
    }
}

impl Settings {
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_valuation(mut self, valuation: ValuationBasis) -> Self {
        self.valuation = valuation;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Invalid settings: {e}")))
    }

    /// Read settings from a JSON file. A missing file yields defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }
}
