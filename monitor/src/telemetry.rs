//! Tracing setup.

use crate::MonitorConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Output is
/// JSON when `config.log_json` is set. Returns `false` if a global
/// subscriber was already installed.
pub fn init_tracing(config: &MonitorConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.is_ok()
}
