pub mod filter_service;
pub mod metrics_service;
pub mod validation_service;
