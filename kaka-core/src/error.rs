use thiserror::Error;

/// The arena could not satisfy an allocation.
///
/// This is the only way the engine observes resource exhaustion. It is never
/// retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request arena exhausted: requested {requested} bytes, {remaining} remaining")]
pub struct AllocError {
    pub requested: usize,
    pub remaining: usize,
}
