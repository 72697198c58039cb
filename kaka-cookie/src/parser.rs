//! ## kaka-cookie::parser
//! A lenient, non-destructive `Cookie` header parser.
//!
//! The header is scanned in place as a `&str`; nothing is copied except the
//! names and values that end up in the store. Segments without `=` are
//! skipped rather than failing the whole header, matching how browsers and
//! servers tolerate sloppy cookie headers in practice.

use kaka_core::RequestArena;
use tracing::{debug, trace, warn};

use crate::error::{CookieError, Field};
use crate::limits::CookieLimits;
use crate::store::{CookieStore, SetOutcome};

/// Counts describing what a parse did with each segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Pairs applied to the store (inserted or updated).
    pub parsed: usize,
    /// Segments without `=`.
    pub malformed: usize,
    /// Pairs whose name or value exceeded its limit.
    pub oversized: usize,
    /// Pairs with an empty name or value.
    pub ignored: usize,
    /// The header was absent or empty; the store was not touched.
    pub empty_input: bool,
}

impl ParseReport {
    fn empty_input() -> Self {
        Self {
            empty_input: true,
            ..Self::default()
        }
    }
}

#[derive(Default, Debug, Copy, Clone)]
pub struct HeaderParser {
    limits: CookieLimits,
}

impl HeaderParser {
    pub fn new(limits: CookieLimits) -> Self {
        Self { limits }
    }

    /// Splits a header into its `(name, value)` pairs, in header order.
    ///
    /// Leading spaces are dropped from each segment, empty segments vanish
    /// and segments lacking `=` are skipped. Only the first `=` delimits.
    pub fn pairs(raw: &str) -> impl Iterator<Item = Result<(&str, &str), &str>> {
        raw.split(';')
            .map(|segment| segment.trim_start_matches(' '))
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.split_once('=').ok_or(segment))
    }

    /// Replaces the contents of `store` with the cookies in `raw`.
    ///
    /// An absent or empty header is a no-op. A header over the configured
    /// bound is rejected before the store is touched. Oversized pairs are
    /// skipped and counted. Pairs are collected into a staging store that
    /// replaces `store` only once the whole header is in; if the arena runs
    /// out part way through, `store` keeps what it held before the call.
    pub fn parse(
        &self,
        raw: Option<&str>,
        store: &mut CookieStore,
        arena: &mut RequestArena,
    ) -> Result<ParseReport, CookieError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                trace!("no cookie header to parse");
                return Ok(ParseReport::empty_input());
            }
        };

        if raw.len() > self.limits.max_header_len {
            warn!(
                len = raw.len(),
                max = self.limits.max_header_len,
                "cookie header too long, rejected"
            );
            return Err(CookieError::Oversized {
                field: Field::Header,
                len: raw.len(),
                max: self.limits.max_header_len,
            });
        }

        let mut staged = CookieStore::new(*store.limits());
        let mut report = ParseReport::default();

        for pair in Self::pairs(raw) {
            let (name, value) = match pair {
                Ok(pair) => pair,
                Err(segment) => {
                    trace!(segment, "skipping cookie segment without '='");
                    report.malformed += 1;
                    continue;
                }
            };

            match staged.set(arena, name, value) {
                Ok(SetOutcome::Inserted | SetOutcome::Updated) => report.parsed += 1,
                Ok(SetOutcome::Ignored) => report.ignored += 1,
                Err(CookieError::Oversized { .. }) => report.oversized += 1,
                Err(err) => {
                    warn!(
                        error = %err,
                        parsed = report.parsed,
                        kept = store.len(),
                        "cookie parse abandoned, previous cookies kept"
                    );
                    return Err(err);
                }
            }
        }

        *store = staged;

        debug!(
            parsed = report.parsed,
            malformed = report.malformed,
            oversized = report.oversized,
            stored = store.len(),
            "parsed cookie header"
        );
        Ok(report)
    }
}
