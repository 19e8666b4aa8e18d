//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. A single `RwLock` guards the table;
//! the middle end itself is single-threaded, but the interner can be shared
//! with a driver that is not.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

struct Inner {
    /// Map from string content to interned index.
    map: FxHashMap<String, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<String>,
}

/// String interner.
///
/// Interned strings are never removed; `Name` values stay valid for the
/// interner's lifetime.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(String::new(), 0);
        StringInterner {
            inner: RwLock::new(Inner {
                map,
                strings: vec![String::new()],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, text: &str) -> Name {
        {
            let inner = self.inner.read();
            if let Some(&idx) = inner.map.get(text) {
                return Name::from_raw(idx);
            }
        }

        let mut inner = self.inner.write();
        // Another writer may have interned it between the locks.
        if let Some(&idx) = inner.map.get(text) {
            return Name::from_raw(idx);
        }

        let idx = crate::arena::to_u32(inner.strings.len(), "interned strings");
        inner.strings.push(text.to_owned());
        inner.map.insert(text.to_owned(), idx);
        Name::from_raw(idx)
    }

    /// Resolve a `Name` back to its string content.
    ///
    /// Returns `None` for names not produced by this interner.
    pub fn resolve(&self, name: Name) -> Option<String> {
        self.inner
            .read()
            .strings
            .get(name.raw() as usize)
            .cloned()
    }

    /// Number of interned strings (including the empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
