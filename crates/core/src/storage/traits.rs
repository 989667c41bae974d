use crate::errors::CoreError;
use crate::models::record::InvestmentRecord;

/// A stored entry that was skipped during load.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRecord {
    /// Zero-based index of the entry in the stored array
    pub index: usize,
    /// The entry's `type` field, if it had one
    pub category: Option<String>,
    /// Why it was skipped
    pub reason: String,
}

/// Diagnostics produced while loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub dropped: Vec<DroppedRecord>,
}

impl LoadReport {
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Records read from a store, plus what had to be left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub records: Vec<InvestmentRecord>,
    pub report: LoadReport,
}

/// Durable home of every recorded investment.
///
/// `load` returns the full collection; `save` overwrites it with exactly the
/// given sequence. There is no incremental append.
pub trait RecordStore {
    /// Short description of where records live (for logs).
    fn describe(&self) -> String;

    /// Read the full collection. A store that does not exist yet is empty.
    /// Malformed entries are dropped and reported, not raised.
    fn load(&self) -> Result<LoadOutcome, CoreError>;

    /// Replace the whole stored collection.
    fn save(&self, records: &[InvestmentRecord]) -> Result<(), CoreError>;
}
