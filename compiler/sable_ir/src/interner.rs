//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. Interned text lives for the process
//! lifetime, which lets `lookup` hand out `&'static str` without holding
//! the lock across the caller's use of the text.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

struct Inner {
    /// Map from string content to index in `strings`.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// Interner mapping identifier text to compact [`Name`] handles.
///
/// Interior mutability via `RwLock` so the lexer can intern through a
/// shared reference while the parser and evaluator read concurrently.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        StringInterner {
            inner: RwLock::new(Inner {
                map: FxHashMap::default(),
                strings: Vec::with_capacity(64),
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// The same text always returns the same `Name`.
    pub fn intern(&self, text: &str) -> Name {
        {
            let inner = self.inner.read();
            if let Some(&idx) = inner.map.get(text) {
                return Name::from_index(idx);
            }
        }

        let mut inner = self.inner.write();
        // Re-check under the write lock: another caller may have interned
        // the text between our read and write acquisitions.
        if let Some(&idx) = inner.map.get(text) {
            return Name::from_index(idx);
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        debug_assert!(inner.strings.len() < u32::MAX as usize);
        let idx = inner.strings.len() as u32;
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        Name::from_index(idx)
    }

    /// Resolve a `Name` back to its text.
    ///
    /// # Panics
    /// Panics if `name` did not come from this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.index() as usize]
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_dedupes() {
        let interner = StringInterner::new();
        let a = interner.intern("counter");
        let b = interner.intern("counter");
        let c = interner.intern("other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn lookup_roundtrip() {
        let interner = StringInterner::new();
        let name = interner.intern("x");
        assert_eq!(interner.lookup(name), "x");
    }
}
