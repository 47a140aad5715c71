//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! node client, executor, waits
//!     → logging.rs (structured tracing events on stderr)
//!     → metrics.rs (counters, gauges, histograms via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Private keys and raw signed payloads are never logged
//! - The library records metrics but never installs an exporter

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
