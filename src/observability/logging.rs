//! Structured logging.
//!
//! `RUST_LOG` takes precedence over the configured level so a single run can
//! be made noisier without editing the config file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` if set, otherwise `platon_aide=<level>`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("platon_aide={},warn", level)))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(level: &str) {
    let result = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
