//! ## kaka-telemetry::metrics
//! **Prometheus counters for cookie handling**
//!
//! One recorder is shared by every worker; prometheus collectors are
//! internally atomic so recording needs only `&self`.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub cookies_parsed: IntCounter,
    pub segments_malformed: IntCounter,
    pub oversized_rejected: IntCounter,
    pub render_overflow: IntCounter,
    pub alloc_failures: IntCounter,
    pub cookies_per_request: Histogram,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cookies_parsed =
            IntCounter::new("kaka_cookies_parsed_total", "Cookie pairs applied from headers")?;
        let segments_malformed = IntCounter::new(
            "kaka_segments_malformed_total",
            "Header segments skipped for lacking '='",
        )?;
        let oversized_rejected = IntCounter::new(
            "kaka_oversized_rejected_total",
            "Headers, names or values rejected for exceeding a bound",
        )?;
        let render_overflow = IntCounter::new(
            "kaka_render_overflow_total",
            "Renders refused because the output buffer was too small",
        )?;
        let alloc_failures = IntCounter::new(
            "kaka_alloc_failures_total",
            "Mutations abandoned on request arena exhaustion",
        )?;
        let cookies_per_request = Histogram::with_opts(
            HistogramOpts::new(
                "kaka_cookies_per_request",
                "Entries held in the store after parsing a header",
            )
            .buckets(vec![0.0, 1.0, 4.0, 16.0, 64.0, 256.0]),
        )?;

        registry.register(Box::new(cookies_parsed.clone()))?;
        registry.register(Box::new(segments_malformed.clone()))?;
        registry.register(Box::new(oversized_rejected.clone()))?;
        registry.register(Box::new(render_overflow.clone()))?;
        registry.register(Box::new(alloc_failures.clone()))?;
        registry.register(Box::new(cookies_per_request.clone()))?;

        Ok(Self {
            registry,
            cookies_parsed,
            segments_malformed,
            oversized_rejected,
            render_overflow,
            alloc_failures,
            cookies_per_request,
        })
    }

    /// Records the outcome of one successful header parse.
    pub fn record_parse(&self, parsed: u64, malformed: u64, oversized: u64, stored: usize) {
        self.cookies_parsed.inc_by(parsed);
        self.segments_malformed.inc_by(malformed);
        self.oversized_rejected.inc_by(oversized);
        self.cookies_per_request.observe(stored as f64);
    }

    pub fn inc_oversized(&self) {
        self.oversized_rejected.inc();
    }

    pub fn inc_render_overflow(&self) {
        self.render_overflow.inc();
    }

    pub fn inc_alloc_failures(&self) {
        self.alloc_failures.inc();
    }

    /// Renders the registry in the prometheus text exposition format.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
