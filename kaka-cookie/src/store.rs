//! ## kaka-cookie::store
//! Ordered, uniquely named cookie entries for one request.
//!
//! Entries are kept in a `Vec` and looked up by linear scan; a request
//! rarely carries more than a few dozen cookies, and the scan preserves the
//! insertion order the serializer depends on.

use std::str::FromStr;

use kaka_core::{ArenaStr, RequestArena};
use tracing::{debug, warn};

use crate::error::{CookieError, Field};
use crate::limits::CookieLimits;

/// One `name=value` pair, both copied into the request arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieEntry {
    name: ArenaStr,
    value: ArenaStr,
}

impl CookieEntry {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// What [`CookieStore::set`] did with a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    Inserted,
    Updated,
    /// Empty name or value; nothing was stored.
    Ignored,
}

#[derive(Debug)]
pub struct CookieStore {
    entries: Vec<CookieEntry>,
    limits: CookieLimits,
}

impl CookieStore {
    pub fn new(limits: CookieLimits) -> Self {
        Self {
            entries: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &CookieLimits {
        &self.limits
    }

    /// Inserts `name=value`, or replaces the value in place if `name` exists.
    ///
    /// Both strings are checked against the arena before either is copied, so
    /// an exhausted arena leaves the store exactly as it was.
    pub fn set(
        &mut self,
        arena: &mut RequestArena,
        name: &str,
        value: &str,
    ) -> Result<SetOutcome, CookieError> {
        if name.is_empty() || value.is_empty() {
            return Ok(SetOutcome::Ignored);
        }
        if name.len() > self.limits.max_name_len {
            warn!(len = name.len(), max = self.limits.max_name_len, "cookie name too long");
            return Err(CookieError::Oversized {
                field: Field::Name,
                len: name.len(),
                max: self.limits.max_name_len,
            });
        }
        if value.len() > self.limits.max_value_len {
            warn!(name, len = value.len(), max = self.limits.max_value_len, "cookie value too long");
            return Err(CookieError::Oversized {
                field: Field::Value,
                len: value.len(),
                max: self.limits.max_value_len,
            });
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.value = arena.alloc_str(value)?;
            return Ok(SetOutcome::Updated);
        }

        arena.ensure(name.len() + value.len())?;
        let name = arena.alloc_str(name)?;
        let value = arena.alloc_str(value)?;
        self.entries.push(CookieEntry { name, value });
        Ok(SetOutcome::Inserted)
    }

    /// Value stored under `name`; `None` means absent, never an empty value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name).map(CookieEntry::value)
    }

    /// Parses the value stored under `name`.
    ///
    /// `None` when the cookie is absent, `Some(Err(_))` when it is present
    /// but does not parse as `T`.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(str::parse)
    }

    pub fn isset(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Removes `name`. Returns whether an entry was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the store. Arena memory is not released here.
    pub fn clean(&mut self) {
        if !self.entries.is_empty() {
            debug!(entries = self.entries.len(), "cleaning cookie store");
        }
        self.entries.clear();
    }

    /// Keeps only entries for which `keep` returns true, preserving order.
    /// Returns the number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&CookieEntry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| keep(entry));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, CookieEntry> {
        self.entries.iter()
    }

    fn find(&self, name: &str) -> Option<&CookieEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl<'a> IntoIterator for &'a CookieStore {
    type Item = &'a CookieEntry;
    type IntoIter = std::slice::Iter<'a, CookieEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
