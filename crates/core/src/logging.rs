use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default directive when `RUST_LOG` does not mention this crate.
pub const DEFAULT_DIRECTIVE: &str = "portfolio_ledger_core=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call has an effect. If the
/// host application already installed a subscriber, that one is kept.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| match try_install() {
        Ok(()) => tracing::info!("portfolio ledger tracing initialized"),
        Err(e) => tracing::debug!(error = %e, "subscriber already installed, keeping it"),
    });
}

fn try_install() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::from_default_env().add_directive(
        DEFAULT_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );
    fmt().with_env_filter(filter).try_init()
}
