use tracing::debug;

use crate::errors::CoreError;

use super::record::{InvestmentRecord, RecordId};

/// A record together with its in-memory handle.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub record: InvestmentRecord,
}

impl LedgerEntry {
    pub fn new(record: InvestmentRecord) -> Self {
        Self {
            id: RecordId::new(),
            record,
        }
    }
}

/// Ordered, in-memory collection of investment records.
///
/// Insertion order is significant: list position is what the presentation
/// layer selects by. Identical records are never merged.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from plain records, assigning each a fresh handle.
    pub fn from_records(records: Vec<InvestmentRecord>) -> Self {
        Self {
            entries: records.into_iter().map(LedgerEntry::new).collect(),
        }
    }

    /// Append a validated record. Returns its handle.
    pub fn add(&mut self, record: InvestmentRecord) -> RecordId {
        let entry = LedgerEntry::new(record);
        let id = entry.id;
        self.entries.push(entry);
        debug!(%id, len = self.entries.len(), "record appended to ledger");
        id
    }

    /// Append an entry that already has a handle (shared between catalog and view).
    pub fn push_entry(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry at a zero-based position.
    /// `None` models "nothing selected" and is reported, not ignored.
    pub fn remove_at(&mut self, position: Option<usize>) -> Result<LedgerEntry, CoreError> {
        let position = position.ok_or(CoreError::NoSelection)?;
        if position >= self.entries.len() {
            return Err(CoreError::PositionOutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position))
    }

    /// Remove the entry with the given handle.
    pub fn remove(&mut self, id: RecordId) -> Result<LedgerEntry, CoreError> {
        let idx = self
            .position_of(id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    /// Swap in a whole new sequence. Prior contents are discarded, not merged.
    pub fn replace(&mut self, entries: Vec<LedgerEntry>) {
        self.entries = entries;
    }

    /// Read-only view of the current ordered sequence.
    #[must_use]
    pub fn all(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &InvestmentRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    #[must_use]
    pub fn to_records(&self) -> Vec<InvestmentRecord> {
        self.records().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&LedgerEntry> {
        self.entries.get(position)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut LedgerEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    #[must_use]
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
