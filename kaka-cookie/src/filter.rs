//! ## kaka-cookie::filter
//! Keep-only and drop filters over an explicit list of cookie names.

use std::collections::HashSet;

use tracing::debug;

use crate::store::CookieStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Remove every entry whose name is not listed.
    KeepOnly,
    /// Remove every entry whose name is listed.
    Drop,
}

/// Names from a comma separated list, trimmed, empty items skipped.
///
/// The set borrows from `name_list` and lives only as long as one filter pass.
pub fn name_set(name_list: &str) -> HashSet<&str> {
    name_list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Applies `mode` to `store` in a single pass. Returns the number of entries removed.
///
/// A list with no usable names leaves the store unchanged in either mode.
pub fn filter(store: &mut CookieStore, name_list: &str, mode: FilterMode) -> usize {
    let names = name_set(name_list);
    if names.is_empty() {
        return 0;
    }

    let keep_listed = mode == FilterMode::KeepOnly;
    let removed = store.retain(|entry| names.contains(entry.name()) == keep_listed);
    debug!(?mode, names = names.len(), removed, "filtered cookies");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::CookieLimits;
    use kaka_core::RequestArena;

    fn abc() -> (CookieStore, RequestArena) {
        let mut store = CookieStore::new(CookieLimits::default());
        let mut arena = RequestArena::with_capacity(1024);
        for (n, v) in [("a", "1"), ("b", "2"), ("c", "3")] {
            store.set(&mut arena, n, v).unwrap();
        }
        (store, arena)
    }

    fn names(store: &CookieStore) -> Vec<&str> {
        store.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn test_keep_only() {
        let (mut store, _arena) = abc();
        assert_eq!(filter(&mut store, "a,c", FilterMode::KeepOnly), 1);
        assert_eq!(names(&store), ["a", "c"]);
        assert_eq!(store.get("c"), Some("3"));
    }

    #[test]
    fn test_drop() {
        let (mut store, _arena) = abc();
        assert_eq!(filter(&mut store, "a,c", FilterMode::Drop), 2);
        assert_eq!(names(&store), ["b"]);
    }

    #[test]
    fn test_whitespace_and_empty_items() {
        let (mut store, _arena) = abc();
        filter(&mut store, "  a , ,, c  ,", FilterMode::KeepOnly);
        assert_eq!(names(&store), ["a", "c"]);
    }

    #[test]
    fn test_unusable_list_leaves_store_unchanged() {
        for list in ["", " , ,", "   "] {
            for mode in [FilterMode::KeepOnly, FilterMode::Drop] {
                let (mut store, _arena) = abc();
                assert_eq!(filter(&mut store, list, mode), 0);
                assert_eq!(names(&store), ["a", "b", "c"]);
            }
        }
    }

    #[test]
    fn test_match_is_exact_and_case_sensitive() {
        let (mut store, _arena) = abc();
        filter(&mut store, "A, ab, c", FilterMode::KeepOnly);
        assert_eq!(names(&store), ["c"]);
    }

    #[test]
    fn test_unknown_names_are_harmless() {
        let (mut store, _arena) = abc();
        assert_eq!(filter(&mut store, "x,y", FilterMode::Drop), 0);
        assert_eq!(filter(&mut store, "x,y", FilterMode::KeepOnly), 3);
        assert!(store.is_empty());
    }
}
