use chrono::NaiveDate;
use tracing::info;

use crate::errors::CoreError;
use crate::models::filter::{ActiveFilter, CategoryFilter, RecencyFilter};
use crate::models::ledger::{Ledger, LedgerEntry};
use crate::models::record::InvestmentRecord;
use crate::storage::traits::{LoadReport, RecordStore};

/// Result of a reload-then-filter pass.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Everything the store holds, freshly loaded
    pub catalog: Ledger,
    /// The entries of `catalog` that pass the filter, same handles, same order
    pub view: Vec<LedgerEntry>,
    pub report: LoadReport,
}

/// Applies category and recency predicates to records.
///
/// Filtering always starts from the full stored collection, never from a
/// previously filtered view, so successive filters do not compound.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// Recency check: `today - transaction_date <= N` days.
    /// Future-dated records have a negative age and always pass.
    #[must_use]
    pub fn within_range(&self, recency: RecencyFilter, date: NaiveDate, today: NaiveDate) -> bool {
        match recency.max_age_days() {
            None => true,
            Some(max) => (today - date).num_days() <= max,
        }
    }

    /// Both predicates must accept the record.
    #[must_use]
    pub fn matches(&self, record: &InvestmentRecord, filter: &ActiveFilter, today: NaiveDate) -> bool {
        filter.category.accepts(&record.category)
            && self.within_range(filter.recency, record.transaction_date, today)
    }

    /// Subset of `records` matching both predicates, in their original order.
    pub fn filter(
        &self,
        records: &[InvestmentRecord],
        category: &CategoryFilter,
        recency: RecencyFilter,
        today: NaiveDate,
    ) -> Vec<InvestmentRecord> {
        let filter = ActiveFilter::new(category.clone(), recency);
        records
            .iter()
            .filter(|r| self.matches(r, &filter, today))
            .cloned()
            .collect()
    }

    /// Same as [`FilterService::filter`] but keeps entry handles.
    pub fn filter_entries(
        &self,
        entries: &[LedgerEntry],
        filter: &ActiveFilter,
        today: NaiveDate,
    ) -> Vec<LedgerEntry> {
        entries
            .iter()
            .filter(|e| self.matches(&e.record, filter, today))
            .cloned()
            .collect()
    }

    /// Reload the full collection from `store`, then filter it.
    pub fn reload_and_filter(
        &self,
        store: &dyn RecordStore,
        filter: &ActiveFilter,
        today: NaiveDate,
    ) -> Result<FilterOutcome, CoreError> {
        let outcome = store.load()?;
        let catalog = Ledger::from_records(outcome.records);
        let view = self.filter_entries(catalog.all(), filter, today);
        info!(
            category = %filter.category,
            recency = %filter.recency,
            matched = view.len(),
            total = catalog.len(),
            "filter applied"
        );
        Ok(FilterOutcome {
            catalog,
            view,
            report: outcome.report,
        })
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
