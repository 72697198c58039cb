//! ## kaka-cookie::context
//! The per-request handle a handler works through.
//!
//! A [`RequestContext`] borrows the store and the arena for one request and
//! exposes every cookie operation on them. It can be built directly by a
//! caller that owns both, or handed out by a [`RequestSlot`](crate::RequestSlot).

use kaka_core::RequestArena;
use kaka_telemetry::MetricsRecorder;

use crate::error::CookieError;
use crate::filter::{self, FilterMode};
use crate::parser::{HeaderParser, ParseReport};
use crate::serializer;
use crate::slot::RequestId;
use crate::store::{CookieStore, SetOutcome};

pub struct RequestContext<'r> {
    request_id: RequestId,
    store: &'r mut CookieStore,
    arena: &'r mut RequestArena,
    metrics: Option<&'r MetricsRecorder>,
}

impl<'r> RequestContext<'r> {
    pub fn new(
        request_id: RequestId,
        store: &'r mut CookieStore,
        arena: &'r mut RequestArena,
    ) -> Self {
        Self {
            request_id,
            store,
            arena,
            metrics: None,
        }
    }

    /// Reports outcomes to `metrics` as well as to the log.
    pub fn with_metrics(mut self, metrics: &'r MetricsRecorder) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn store(&self) -> &CookieStore {
        &*self.store
    }

    pub fn arena(&self) -> &RequestArena {
        &*self.arena
    }

    /// Parses `raw` into the store, replacing what it held.
    pub fn parse(&mut self, raw: Option<&str>) -> Result<ParseReport, CookieError> {
        let parser = HeaderParser::new(*self.store.limits());
        let result = parser.parse(raw, self.store, self.arena);
        if let Some(metrics) = self.metrics {
            match &result {
                Ok(report) => metrics.record_parse(
                    report.parsed as u64,
                    report.malformed as u64,
                    report.oversized as u64,
                    self.store.len(),
                ),
                Err(err) => Self::record_error(metrics, err),
            }
        }
        result
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<SetOutcome, CookieError> {
        let result = self.store.set(self.arena, name, value);
        if let (Some(metrics), Err(err)) = (self.metrics, &result) {
            Self::record_error(metrics, err);
        }
        result
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.store.get(name)
    }

    pub fn isset(&self, name: &str) -> bool {
        self.store.isset(name)
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.store.delete(name)
    }

    pub fn clean(&mut self) {
        self.store.clean();
    }

    pub fn filter(&mut self, name_list: &str, mode: FilterMode) -> usize {
        filter::filter(self.store, name_list, mode)
    }

    /// Renders the store into `out`; see [`serializer::render`].
    pub fn render(&self, out: &mut [u8]) -> Result<usize, CookieError> {
        let result = serializer::render(self.store(), out);
        if let (Some(metrics), Err(err)) = (self.metrics, &result) {
            Self::record_error(metrics, err);
        }
        result
    }

    pub fn render_to_string(&self, limit: usize) -> Result<String, CookieError> {
        let result = serializer::render_to_string(self.store(), limit);
        if let (Some(metrics), Err(err)) = (self.metrics, &result) {
            Self::record_error(metrics, err);
        }
        result
    }

    fn record_error(metrics: &MetricsRecorder, err: &CookieError) {
        match err {
            CookieError::Oversized { .. } => metrics.inc_oversized(),
            CookieError::Overflow { .. } => metrics.inc_render_overflow(),
            CookieError::Alloc(_) => metrics.inc_alloc_failures(),
            CookieError::SlotInUse => {}
        }
    }
}
