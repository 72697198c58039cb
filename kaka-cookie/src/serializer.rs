//! ## kaka-cookie::serializer
//! Renders a store back into `name=value; name=value` form.
//!
//! Output goes into a caller-supplied buffer followed by a single NUL
//! terminator. The full size is computed before anything is written, so a
//! buffer that is too small is reported as [`CookieError::Overflow`] and is
//! left untouched; there is no truncated result to mistake for success.

use std::fmt;

use bytes::BufMut;
use tracing::warn;

use crate::error::CookieError;
use crate::store::CookieStore;

pub const SEPARATOR: &str = "; ";

/// Length of the rendered header, terminator excluded.
pub fn rendered_len(store: &CookieStore) -> usize {
    let pairs: usize = store
        .iter()
        .map(|e| e.name().len() + 1 + e.value().len())
        .sum();
    pairs + SEPARATOR.len() * store.len().saturating_sub(1)
}

/// Writes the rendered header plus a NUL terminator into `out`.
///
/// Returns the number of header bytes written, terminator excluded.
pub fn render(store: &CookieStore, out: &mut [u8]) -> Result<usize, CookieError> {
    let len = rendered_len(store);
    let required = len + 1;
    if required > out.len() {
        warn!(required, capacity = out.len(), "cookie render buffer overflow");
        return Err(CookieError::Overflow {
            required,
            capacity: out.len(),
        });
    }

    let mut buf = &mut out[..];
    write_pairs(store, &mut buf);
    buf.put_u8(0);
    Ok(len)
}

/// Renders into an owned `String` under the same budget rule as [`render`]:
/// the header plus terminator must fit in `limit` bytes.
pub fn render_to_string(store: &CookieStore, limit: usize) -> Result<String, CookieError> {
    let len = rendered_len(store);
    if len + 1 > limit {
        warn!(required = len + 1, capacity = limit, "cookie render buffer overflow");
        return Err(CookieError::Overflow {
            required: len + 1,
            capacity: limit,
        });
    }

    Ok(store.to_string())
}

fn write_pairs<B: BufMut>(store: &CookieStore, buf: &mut B) {
    for (i, entry) in store.iter().enumerate() {
        if i > 0 {
            buf.put_slice(SEPARATOR.as_bytes());
        }
        buf.put_slice(entry.name().as_bytes());
        buf.put_u8(b'=');
        buf.put_slice(entry.value().as_bytes());
    }
}

impl fmt::Display for CookieStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{}={}", entry.name(), entry.value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::CookieLimits;
    use kaka_core::RequestArena;
    use tracing_test::traced_test;

    fn store_of(pairs: &[(&str, &str)]) -> CookieStore {
        let mut store = CookieStore::new(CookieLimits::default());
        let mut arena = RequestArena::with_capacity(1024);
        for (n, v) in pairs {
            store.set(&mut arena, n, v).unwrap();
        }
        store
    }

    #[test]
    fn test_render_into_buffer() {
        let store = store_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let mut out = [0xffu8; 32];

        let written = render(&store, &mut out).unwrap();
        assert_eq!(written, 13);
        assert_eq!(&out[..written], b"a=1; b=2; c=3");
        assert_eq!(out[written], 0);
        assert_eq!(rendered_len(&store), 13);
    }

    #[test]
    fn test_exact_fit_includes_terminator() {
        let store = store_of(&[("a", "1")]);
        let mut out = [0u8; 4];
        assert_eq!(render(&store, &mut out), Ok(3));

        let mut short = [0u8; 3];
        assert_eq!(
            render(&store, &mut short),
            Err(CookieError::Overflow {
                required: 4,
                capacity: 3
            })
        );
    }

    #[traced_test]
    #[test]
    fn test_overflow_writes_nothing() {
        let store = store_of(&[("session", "abcdef"), ("theme", "dark")]);
        let mut out = [0xffu8; 10];

        assert!(matches!(
            render(&store, &mut out),
            Err(CookieError::Overflow { .. })
        ));
        assert!(out.iter().all(|b| *b == 0xff));
        assert!(logs_contain("cookie render buffer overflow"));
    }

    #[test]
    fn test_empty_store_renders_terminator_only() {
        let store = store_of(&[]);
        let mut out = [0xffu8; 1];
        assert_eq!(render(&store, &mut out), Ok(0));
        assert_eq!(out[0], 0);
    }

    #[test]
    fn test_render_is_stable_and_follows_updates() {
        let mut store = CookieStore::new(CookieLimits::default());
        let mut arena = RequestArena::with_capacity(1024);
        store.set(&mut arena, "a", "1").unwrap();
        store.set(&mut arena, "b", "2").unwrap();
        store.set(&mut arena, "a", "3").unwrap();

        let first = render_to_string(&store, 64).unwrap();
        let second = render_to_string(&store, 64).unwrap();
        assert_eq!(first, "a=3; b=2");
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_to_string_respects_limit() {
        let store = store_of(&[("a", "1"), ("b", "2")]);
        assert_eq!(render_to_string(&store, 9).unwrap(), "a=1; b=2");
        assert_eq!(
            render_to_string(&store, 8),
            Err(CookieError::Overflow {
                required: 9,
                capacity: 8
            })
        );
    }
}
