//! # kaka Cookie Engine
//!
//! Request-scoped handling of the HTTP `Cookie` header: parse it into ordered
//! name/value pairs, let a handler read, change and filter them, and render
//! the result back into a bounded buffer.
//!
//! All strings live in a [`RequestArena`](kaka_core::RequestArena) that is
//! wiped in one step at the end of the request. A [`RequestSlot`] lets a
//! worker thread reuse one store and arena across the requests it serves.
//!
//! ```
//! use kaka_cookie::{CookieLimits, FilterMode, RequestId, RequestSlot};
//!
//! let mut slot = RequestSlot::new(CookieLimits::default(), 64 * 1024);
//! let mut ctx = slot.acquire(RequestId(1));
//!
//! ctx.parse(Some("a=1; b=2; c=3")).unwrap();
//! ctx.filter("a, c", FilterMode::KeepOnly);
//!
//! let mut out = [0u8; 64];
//! let n = ctx.render(&mut out).unwrap();
//! assert_eq!(&out[..n], b"a=1; c=3");
//! ```

pub mod context;
pub mod error;
pub mod filter;
pub mod limits;
pub mod parser;
pub mod serializer;
pub mod slot;
pub mod store;

pub use context::RequestContext;
pub use error::{CookieError, Field};
pub use filter::FilterMode;
pub use limits::CookieLimits;
pub use parser::{HeaderParser, ParseReport};
pub use serializer::{render, render_to_string, rendered_len};
pub use slot::{with_thread_slot, RequestId, RequestSlot};
pub use store::{CookieEntry, CookieStore, SetOutcome};
