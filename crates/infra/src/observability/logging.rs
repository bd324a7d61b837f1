//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured filter so a single run can be made
//! verbose without touching config files.

use mediaauth_domain::{LoggingConfig, MediaAuthError, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the global subscriber once; later calls are no-ops
///
/// # Errors
/// Returns `MediaAuthError::Config` if the filter directive is invalid or a
/// different global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    INITIALIZED.get_or_try_init(|| install(config)).map(|()| ())
}

fn install(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.filter)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(config.json.then(|| fmt::layer().json().with_current_span(false)))
        .with((!config.json).then(|| fmt::layer().with_target(true)))
        .try_init()
        .map_err(|e| MediaAuthError::Config(format!("Failed to set global subscriber: {e}")))?;

    tracing::debug!(filter = %config.filter, json = config.json, "Tracing initialized");
    Ok(())
}

fn build_filter(directive: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive)
        .map_err(|e| MediaAuthError::Config(format!("Invalid log filter '{directive}': {e}")))
}
