pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    filter::{ActiveFilter, CategoryFilter, RecencyFilter},
    ledger::{Ledger, LedgerEntry},
    metrics::Metrics,
    record::{InvestmentInput, InvestmentRecord, RecordId, RecordSummary},
    settings::Settings,
};
use services::{
    filter_service::FilterService, metrics_service::MetricsService,
    validation_service::ValidationService,
};
use storage::{
    format,
    manager::JsonFileStore,
    traits::{LoadReport, RecordStore},
};
use tracing::{debug, error, info};

use errors::CoreError;

/// Main entry point for the portfolio ledger core library.
///
/// Owns two ledgers that share entry handles:
/// - the *catalog*, a mirror of everything in the durable store
/// - the *view*, the filtered subset the presentation layer displays
///
/// Positions passed in by callers always index the view. Mutations are
/// applied to the catalog by handle and the whole catalog is saved right
/// away. The core never pushes updates; callers re-read summaries, details
/// and metrics after any mutating call.
#[must_use]
pub struct PortfolioManager<S: RecordStore = JsonFileStore> {
    store: S,
    settings: Settings,
    catalog: Ledger,
    view: Ledger,
    filter: ActiveFilter,
    /// Reference date the active recency filter was evaluated against.
    as_of: NaiveDate,
    last_load: LoadReport,
    validation_service: ValidationService,
    filter_service: FilterService,
    metrics_service: MetricsService,
}

impl<S: RecordStore> std::fmt::Debug for PortfolioManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioManager")
            .field("store", &self.store.describe())
            .field("catalog", &self.catalog.len())
            .field("view", &self.view.len())
            .field("filter", &self.filter)
            .field("as_of", &self.as_of)
            .finish()
    }
}

impl PortfolioManager<JsonFileStore> {
    /// Open the JSON data file named in `settings`, loading every record.
    /// A missing file is a normal first run and yields an empty ledger.
    pub fn open(settings: Settings) -> Result<Self, CoreError> {
        let store = JsonFileStore::from_settings(&settings);
        Self::with_store(store, settings)
    }
}

impl<S: RecordStore> PortfolioManager<S> {
    /// Build a manager over any store, loading its contents.
    pub fn with_store(store: S, settings: Settings) -> Result<Self, CoreError> {
        let outcome = store.load()?;
        let catalog = Ledger::from_records(outcome.records);
        let view = catalog.clone();
        info!(
            store = %store.describe(),
            records = catalog.len(),
            dropped = outcome.report.dropped_count(),
            "portfolio opened"
        );
        Ok(Self {
            store,
            settings,
            catalog,
            view,
            filter: ActiveFilter::default(),
            as_of: today(),
            last_load: outcome.report,
            validation_service: ValidationService::new(),
            filter_service: FilterService::new(),
            metrics_service: MetricsService::new(),
        })
    }

    // ── Entry ───────────────────────────────────────────────────────

    /// Validate raw entry fields, append the record and save.
    pub fn add_investment(&mut self, input: &InvestmentInput) -> Result<RecordId, CoreError> {
        let record = self.validation_service.validate_input(input)?;
        self.add_record(record)
    }

    /// Append an already-validated record and save.
    ///
    /// The record joins the view only if it passes the active filter, judged
    /// against today's date or the last filter date, whichever is later.
    /// If the save fails the record stays in memory and the error is returned.
    pub fn add_record(&mut self, record: InvestmentRecord) -> Result<RecordId, CoreError> {
        let entry = LedgerEntry::new(record);
        let id = entry.id;
        let reference = self.as_of.max(today());
        let visible = self.filter_service.matches(&entry.record, &self.filter, reference);
        self.catalog.push_entry(entry.clone());
        if visible {
            self.view.push_entry(entry);
        }
        debug!(%id, visible, "investment added");
        self.persist()?;
        Ok(id)
    }

    /// Remove the record at a view position and save.
    /// `None` means nothing is selected and yields `CoreError::NoSelection`.
    pub fn remove_investment(&mut self, position: Option<usize>) -> Result<InvestmentRecord, CoreError> {
        let id = self.entry_at(position)?.id;
        self.remove_by_id(id)
    }

    /// Remove the record with the given handle and save.
    pub fn remove_by_id(&mut self, id: RecordId) -> Result<InvestmentRecord, CoreError> {
        let entry = self.catalog.remove(id)?;
        if self.view.position_of(id).is_some() {
            self.view.remove(id)?;
        }
        debug!(%id, "investment removed");
        self.persist()?;
        Ok(entry.record)
    }

    /// Record the latest known unit price for the record at a view position.
    /// Only affects metrics under `ValuationBasis::MarkedPrice`.
    pub fn set_current_price(&mut self, position: Option<usize>, price: f64) -> Result<(), CoreError> {
        if !price.is_finite() {
            return Err(CoreError::NumericFormat {
                field: "current price",
                value: price.to_string(),
            });
        }
        if price <= 0.0 {
            return Err(CoreError::NonPositiveValue {
                field: "current price",
                value: price,
            });
        }
        let id = self.entry_at(position)?.id;
        for ledger in [&mut self.catalog, &mut self.view] {
            if let Some(entry) = ledger.get_mut(id) {
                entry.record.current_price = Some(price);
            }
        }
        self.persist()
    }

    // ── Listing & Details ───────────────────────────────────────────

    /// One summary per displayed record, in display order.
    #[must_use]
    pub fn list_summaries(&self) -> Vec<RecordSummary> {
        self.view
            .records()
            .enumerate()
            .map(|(position, r)| RecordSummary {
                category: r.category.clone(),
                position,
            })
            .collect()
    }

    /// The displayed record at a position.
    pub fn get_details(&self, position: Option<usize>) -> Result<&InvestmentRecord, CoreError> {
        self.entry_at(position).map(|e| &e.record)
    }

    /// The displayed entries with their handles.
    #[must_use]
    pub fn view_entries(&self) -> &[LedgerEntry] {
        self.view.all()
    }

    /// Number of displayed records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.view.len()
    }

    /// Number of records in the durable store, as of the last load or save.
    #[must_use]
    pub fn catalog_count(&self) -> usize {
        self.catalog.len()
    }

    // ── Filtering ───────────────────────────────────────────────────

    /// Reload everything from the store and show the records matching both
    /// predicates, evaluated against today's local date.
    /// Returns the number of records now displayed.
    pub fn apply_filter(
        &mut self,
        category: CategoryFilter,
        recency: RecencyFilter,
    ) -> Result<usize, CoreError> {
        self.apply_filter_as_of(category, recency, today())
    }

    /// Like [`PortfolioManager::apply_filter`] with an explicit reference date.
    pub fn apply_filter_as_of(
        &mut self,
        category: CategoryFilter,
        recency: RecencyFilter,
        today: NaiveDate,
    ) -> Result<usize, CoreError> {
        let filter = ActiveFilter::new(category, recency);
        let outcome = self
            .filter_service
            .reload_and_filter(&self.store, &filter, today)?;
        self.catalog = outcome.catalog;
        self.view.replace(outcome.view);
        self.filter = filter;
        self.as_of = today;
        self.last_load = outcome.report;
        Ok(self.view.len())
    }

    /// Clear the filter and reload everything from the store.
    pub fn refresh(&mut self) -> Result<usize, CoreError> {
        self.apply_filter(CategoryFilter::All, RecencyFilter::All)
    }

    #[must_use]
    pub fn active_filter(&self) -> &ActiveFilter {
        &self.filter
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// Metrics over the displayed records, using the configured valuation basis.
    #[must_use]
    pub fn get_metrics(&self) -> Metrics {
        self.metrics_service
            .compute_with(self.view.records(), self.settings.valuation)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the displayed records in the data file layout.
    pub fn export_json(&self) -> Result<String, CoreError> {
        format::encode(&self.view.to_records(), true)
    }

    /// Export the displayed records as CSV.
    /// Columns: type, amount, buying_price, transaction_date, current_price
    #[must_use]
    pub fn export_csv(&self) -> String {
        let mut csv = String::from("type,amount,buying_price,transaction_date,current_price\n");
        for record in self.view.records() {
            let category = record.category.as_str();
            // Quote fields containing commas, quotes, or newlines
            let escaped = if category.contains(',') || category.contains('"') || category.contains('\n') {
                format!("\"{}\"", category.replace('"', "\"\""))
            } else {
                category.to_string()
            };
            let current = record
                .current_price
                .map(|p| p.to_string())
                .unwrap_or_default();
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                escaped,
                record.amount,
                record.unit_price,
                record.transaction_date.format("%Y-%m-%d"),
                current,
            ));
        }
        csv
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Diagnostics from the most recent load (open, filter or refresh).
    #[must_use]
    pub fn last_load_report(&self) -> &LoadReport {
        &self.last_load
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Internal ────────────────────────────────────────────────────

    fn entry_at(&self, position: Option<usize>) -> Result<&LedgerEntry, CoreError> {
        let position = position.ok_or(CoreError::NoSelection)?;
        self.view.get(position).ok_or(CoreError::PositionOutOfRange {
            position,
            len: self.view.len(),
        })
    }

    fn persist(&self) -> Result<(), CoreError> {
        self.store
            .save(&self.catalog.to_records())
            .inspect_err(|e| error!(store = %self.store.describe(), error = %e, "save failed"))
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
