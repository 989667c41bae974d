use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::record::InvestmentRecord;
use crate::models::settings::Settings;

use super::format;
use super::traits::{LoadOutcome, RecordStore};

/// Stores the ledger as a single JSON file on disk.
///
/// Every save rewrites the whole file: contents are staged in a sibling
/// `.tmp` file which is then renamed over the target, so readers never
/// see a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            path: settings.data_file.clone(),
            pretty: settings.pretty_json,
        }
    }

    /// Write compact JSON instead of indented.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonFileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<LoadOutcome, CoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file not found, starting empty");
            return Ok(LoadOutcome::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let outcome = format::decode(&data)?;
        info!(
            path = %self.path.display(),
            loaded = outcome.records.len(),
            dropped = outcome.report.dropped_count(),
            "loaded investment records"
        );
        Ok(outcome)
    }

    fn save(&self, records: &[InvestmentRecord]) -> Result<(), CoreError> {
        let json = format::encode(records, self.pretty)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = records.len(), "saved investment records");
        Ok(())
    }
}
