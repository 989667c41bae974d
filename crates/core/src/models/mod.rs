pub mod category;
pub mod filter;
pub mod ledger;
pub mod metrics;
pub mod record;
pub mod settings;
