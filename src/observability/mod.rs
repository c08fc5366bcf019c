//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! blockchain::* produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//! ```

pub mod logging;
pub mod metrics;
