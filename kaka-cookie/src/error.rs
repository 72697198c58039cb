use std::fmt;

use kaka_core::AllocError;
use thiserror::Error;

/// Which bounded input a size check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Header,
    Name,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Header => "header",
            Field::Name => "name",
            Field::Value => "value",
        })
    }
}

/// Structural failures surfaced to the caller.
///
/// Malformed segments and lookups that miss are not errors: the former are
/// skipped and counted in a [`ParseReport`](crate::ParseReport), the latter
/// come back as `None`/`false`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("cookie {field} of {len} bytes exceeds the {max} byte limit")]
    Oversized { field: Field, len: usize, max: usize },
    #[error("render needs {required} bytes but the buffer holds {capacity}")]
    Overflow { required: usize, capacity: usize },
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error("this thread's request slot is already in use")]
    SlotInUse,
}
