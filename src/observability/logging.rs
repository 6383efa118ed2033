//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level. Installing the
//! subscriber twice is not an error; the second call is ignored.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(log_level: &str, json_logs: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(level = %log_level, json = json_logs, "Logging initialized");
    }
    installed
}
