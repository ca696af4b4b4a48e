//! Observability for the course landing page.
//!
//! This crate provides:
//! - `StructuredLogger` - JSON or human log lines correlated by request ID
//! - `MetricsCollector` - Shell, section and upstream fetch timings

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

// Re-export RequestId from landing-core for convenience
pub use landing_core::RequestId;
