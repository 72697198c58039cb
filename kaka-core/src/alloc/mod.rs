//! ## kaka-core::alloc
//! **Request arena and allocation statistics**
//!
//! ### Expectations:
//! - One fixed region per worker, reused across requests
//! - No per-entry deallocation; the whole region is wiped at request end
//! - Exhaustion reported as an error, never as a partial write
//!
//! ### Key Submodules:
//! - `arena/`: the bounded request arena backed by `bytes`
//! - `stats/`: allocation counters for diagnostics

pub mod arena;
pub mod stats;
