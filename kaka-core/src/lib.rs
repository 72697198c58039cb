//! # kaka-core
//!
//! Request-scoped memory for the cookie engine.
//!
//! Every string the engine keeps for a request lives in a single
//! [`RequestArena`]: a fixed-capacity region that is handed out piece by piece
//! and wiped in one step when the request ends. Nothing allocated from it is
//! ever released individually.
//!
//! ### Key Submodules:
//! - `alloc`: the request arena and its statistics
//! - `error`: allocation failure reporting

pub mod alloc;
pub mod error;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::error::*;
}

pub use alloc::arena::{ArenaStr, RequestArena};
pub use alloc::stats::ArenaStats;
pub use error::AllocError;
