//! Per-session string intern table.
//!
//! Folds raw code-unit spans (or accumulated text) into one shared
//! `Arc<str>` per distinct content. The intern table handles leaf string
//! values (identifier text, decoded literal text); whole tokens are
//! hash-consed one level up by [`TextKeyedCache`](crate::TextKeyedCache).
//!
//! Keys are the raw UTF-16 code units, so equality is full content
//! equality even for spans holding unpaired surrogates (which materialize
//! lossily as U+FFFD).

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{CacheConfig, CodeUnit, ObjectPool};

/// Content-hashed set of canonical strings.
///
/// Owned by one session at a time; see [`InternPool`] for sharing the
/// backing storage between sessions.
#[derive(Default)]
pub struct StringInternTable {
    /// Map from code-unit content to the canonical instance.
    map: FxHashMap<Box<[CodeUnit]>, Arc<str>>,
    /// Reusable UTF-16 encoding buffer for [`intern_str`](Self::intern_str).
    scratch: Vec<CodeUnit>,
}

impl StringInternTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a span of code units, returning the canonical instance.
    ///
    /// Hits do not allocate.
    #[inline]
    pub fn intern(&mut self, units: &[CodeUnit]) -> Arc<str> {
        if let Some(existing) = self.map.get(units) {
            return Arc::clone(existing);
        }
        let text: Arc<str> = Arc::from(String::from_utf16_lossy(units));
        self.map.insert(units.into(), Arc::clone(&text));
        text
    }

    /// Intern accumulated text (e.g. an identifier built up in a `String`).
    ///
    /// Returns the same instance as [`intern`](Self::intern) for the UTF-16
    /// encoding of `text`.
    pub fn intern_str(&mut self, text: &str) -> Arc<str> {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        scratch.extend(text.encode_utf16());
        let interned = if let Some(existing) = self.map.get(scratch.as_slice()) {
            Arc::clone(existing)
        } else {
            let owned: Arc<str> = Arc::from(text);
            self.map.insert(scratch.as_slice().into(), Arc::clone(&owned));
            owned
        };
        self.scratch = scratch;
        interned
    }

    /// Check whether content is already interned, without inserting.
    pub fn contains(&self, units: &[CodeUnit]) -> bool {
        self.map.contains_key(units)
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop all entries, keeping allocated capacity for the next session.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Shared pool of intern tables.
///
/// Tables are cleared on release: interned strings never outlive the
/// session that created them, but the hash map's capacity does.
pub struct InternPool {
    tables: ObjectPool<StringInternTable>,
}

impl InternPool {
    /// Create a pool sized by `config.max_pooled`.
    pub fn new(config: &CacheConfig) -> Self {
        InternPool {
            tables: ObjectPool::new(config.max_pooled),
        }
    }

    /// Borrow an empty table.
    pub fn allocate(&self) -> StringInternTable {
        self.tables.allocate_with(StringInternTable::new)
    }

    /// Clear a table and return it to the pool.
    pub fn free(&self, mut table: StringInternTable) {
        table.clear();
        self.tables.free(table);
    }

    /// Number of idle tables.
    pub fn available(&self) -> usize {
        self.tables.available()
    }
}

impl Default for InternPool {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
