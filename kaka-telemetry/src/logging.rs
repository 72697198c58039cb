//! ## kaka-telemetry::logging
//! **Structured logging with `tracing` and OpenTelemetry attributes**
//!
//! ### Components:
//! - `EventLogger::init`: fmt subscriber with an `EnvFilter`
//! - `EventLogger::log_event`: one structured event per notable request outcome

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber.
    ///
    /// `RUST_LOG` wins over `default_level` when it is set. Fails if a global
    /// subscriber is already installed.
    pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .with_writer(std::io::stderr)
            .try_init()
    }

    #[inline]
    pub fn log_event(event_type: &str, metadata: &[KeyValue]) {
        let span = info_span!(
            "cookie_event",
            event_type = event_type,
            otel.kind = "INTERNAL"
        );
        let _entered = span.enter();

        tracing::info!(metadata = ?metadata, "Cookie event recorded");
    }
}
