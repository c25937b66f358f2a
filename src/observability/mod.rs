//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! server, dispatch, relay produce:
//!     → logging.rs (structured tracing events keyed by request id)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
