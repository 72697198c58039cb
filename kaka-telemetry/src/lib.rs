//! # kaka Telemetry
//!
//! Logging and metrics for the cookie engine. Neither changes functional
//! behavior: the engine works the same with or without a subscriber or a
//! recorder attached.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
pub use prometheus::Error as MetricsError;
