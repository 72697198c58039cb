//! ## kaka-core::alloc::arena
//! **Bounded request arena using `bytes`**
//!
//! The arena owns one contiguous `BytesMut` region reserved up front. Each
//! allocation copies into the unused tail of the region and splits it off as
//! a frozen `Bytes` view, so allocated strings share the region instead of
//! owning separate heap blocks. Views are never returned to the arena;
//! [`RequestArena::reset`] rewinds the whole region at once and reclaims the
//! original allocation once every view has been dropped.

use std::fmt;
use std::ops::Deref;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::alloc::stats::ArenaStats;
use crate::error::AllocError;

/// An arena bound to the lifetime of a single request.
pub struct RequestArena {
    region: BytesMut,
    capacity: usize,
    used: usize,
    stats: ArenaStats,
}

impl RequestArena {
    /// Creates an arena that can hand out at most `capacity` bytes between resets.
    pub fn with_capacity(capacity: usize) -> Self {
        RequestArena {
            region: BytesMut::with_capacity(capacity),
            capacity,
            used: 0,
            stats: ArenaStats::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes handed out since the last reset.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    /// Checks that `n` more bytes fit without allocating anything.
    ///
    /// Callers that need several allocations to succeed together check the
    /// total first so a failure cannot leave half of them applied.
    pub fn ensure(&self, n: usize) -> Result<(), AllocError> {
        if n > self.remaining() {
            self.stats.increment_failures();
            return Err(AllocError {
                requested: n,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Allocates `n` zeroed bytes tied to the current request.
    pub fn allocate(&mut self, n: usize) -> Result<BytesMut, AllocError> {
        self.ensure(n)?;
        self.region.put_bytes(0, n);
        Ok(self.take(n))
    }

    /// Copies `s` into the arena.
    pub fn alloc_str(&mut self, s: &str) -> Result<ArenaStr, AllocError> {
        self.ensure(s.len())?;
        self.region.extend_from_slice(s.as_bytes());
        Ok(ArenaStr(self.take(s.len()).freeze()))
    }

    fn take(&mut self, n: usize) -> BytesMut {
        self.used += n;
        self.stats.record_allocation(n, self.used);
        self.region.split()
    }

    /// Rewinds the arena, invalidating the budget of everything allocated so far.
    ///
    /// Views that are still alive keep their bytes; the region is only reused
    /// in place once all of them are gone.
    pub fn reset(&mut self) {
        trace!(used = self.used, capacity = self.capacity, "resetting request arena");
        self.region.clear();
        self.region.reserve(self.capacity);
        self.used = 0;
        self.stats.increment_resets();
    }
}

impl fmt::Debug for RequestArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestArena")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .finish()
    }
}

/// A string copied into a [`RequestArena`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ArenaStr(Bytes);

impl ArenaStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: an `ArenaStr` is only built by `RequestArena::alloc_str`,
        // which copies the bytes of a `&str` verbatim.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for ArenaStr {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ArenaStr {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ArenaStr {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ArenaStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for ArenaStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for ArenaStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_str_copies_input() {
        let mut arena = RequestArena::with_capacity(64);
        let a = arena.alloc_str("session").unwrap();
        let b = arena.alloc_str("abc=def").unwrap();

        assert_eq!(a, "session");
        assert_eq!(b.as_str(), "abc=def");
        assert_eq!(arena.used(), 14);
        assert_eq!(arena.remaining(), 50);
    }

    #[test]
    fn test_allocate_returns_zeroed_writable_bytes() {
        let mut arena = RequestArena::with_capacity(16);
        let mut chunk = arena.allocate(4).unwrap();
        assert_eq!(&chunk[..], &[0, 0, 0, 0]);
        chunk[0] = 7;
        assert_eq!(chunk[0], 7);
        assert_eq!(arena.used(), 4);
    }

    #[test]
    fn test_exhaustion_is_reported_without_consuming() {
        let mut arena = RequestArena::with_capacity(8);
        arena.alloc_str("12345").unwrap();

        let err = arena.alloc_str("6789").unwrap_err();
        assert_eq!(
            err,
            AllocError {
                requested: 4,
                remaining: 3
            }
        );
        assert_eq!(arena.used(), 5);
        assert_eq!(arena.stats().failures(), 1);

        // what is left is still usable
        assert_eq!(arena.alloc_str("678").unwrap(), "678");
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn test_ensure_does_not_allocate() {
        let arena = RequestArena::with_capacity(10);
        assert!(arena.ensure(10).is_ok());
        assert!(arena.ensure(11).is_err());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn test_reset_restores_full_capacity() {
        let mut arena = RequestArena::with_capacity(8);
        {
            let value = arena.alloc_str("abcdefgh").unwrap();
            assert_eq!(value, "abcdefgh");
            assert!(arena.alloc_str("x").is_err());
        }
        arena.reset();

        assert_eq!(arena.used(), 0);
        assert_eq!(arena.alloc_str("ijklmnop").unwrap(), "ijklmnop");
        assert_eq!(arena.stats().resets(), 1);
    }

    #[test]
    fn test_views_survive_reset() {
        let mut arena = RequestArena::with_capacity(8);
        let kept = arena.alloc_str("keep").unwrap();
        arena.reset();
        let fresh = arena.alloc_str("new!").unwrap();

        assert_eq!(kept, "keep");
        assert_eq!(fresh, "new!");
    }
}
