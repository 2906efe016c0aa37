//! Hash-consing cache keyed by raw code-unit spans.
//!
//! Lexically identical recurring spans (keywords, punctuation, common
//! identifiers, whitespace runs) map to one previously built immutable
//! token or trivia value. Lookups hash the span with FNV-1a and walk a
//! bucket chain comparing stored content against the span; a hit never
//! allocates.
//!
//! # Layout
//!
//! ```text
//! buckets: [SmallVec<entry>; mask + 1]
//!            ^ index = hash & mask
//! entry:   (hash, owned copy of span, value)
//! ```
//!
//! Entries are never removed within a session. Once the entry count exceeds
//! `mask`, the table is rehashed into `2 * mask + 2` buckets, preserving the
//! relative order of entries that land in the same bucket.

use smallvec::SmallVec;

use crate::config::{mask_is_valid, INITIAL_CACHE_MASK};
use crate::{CacheConfig, CodeUnit, FnvParams};

/// One cached binding. The key is an owned copy of the span, so future
/// lookups hit regardless of which buffer the matching span came from.
struct CacheEntry<T> {
    hash: u32,
    text: Box<[CodeUnit]>,
    value: T,
}

/// Content-addressed map from a code-unit span to a canonical value.
///
/// Values are handed out by clone; for hash-consing they are typically
/// `Arc<Token>` so every hit returns the same allocation.
pub struct TextKeyedCache<T> {
    buckets: Vec<SmallVec<[CacheEntry<T>; 2]>>,
    mask: usize,
    count: usize,
    fnv: FnvParams,
}

impl<T> TextKeyedCache<T> {
    /// Create an empty cache with `config.initial_mask + 1` buckets.
    ///
    /// An unusable mask (see [`CacheConfig::validate`]) falls back to the
    /// default of 31.
    pub fn new(config: &CacheConfig) -> Self {
        let mask = if mask_is_valid(config.initial_mask) {
            config.initial_mask
        } else {
            tracing::warn!(mask = config.initial_mask, "invalid cache mask, using default");
            INITIAL_CACHE_MASK
        };
        TextKeyedCache {
            buckets: empty_buckets(mask + 1),
            mask,
            count: 0,
            fnv: config.fnv,
        }
    }

    /// Look up a span without inserting.
    pub fn find_item(&self, span: &[CodeUnit]) -> Option<&T> {
        let hash = self.fnv.hash(span);
        self.find_hashed(span, hash)
    }

    #[inline]
    fn find_hashed(&self, span: &[CodeUnit], hash: u32) -> Option<&T> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|entry| entry.hash == hash && *entry.text == *span)
            .map(|entry| &entry.value)
    }

    #[inline]
    fn bucket_index(&self, hash: u32) -> usize {
        hash as usize & self.mask
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current bucket mask (bucket count minus one).
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Drop every entry, keeping bucket storage for reuse.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.count = 0;
    }

    fn insert_hashed(&mut self, span: &[CodeUnit], hash: u32, value: T) {
        let index = self.bucket_index(hash);
        self.buckets[index].push(CacheEntry {
            hash,
            text: span.into(),
            value,
        });
        self.count += 1;
        if self.count > self.mask {
            self.grow();
        }
    }

    /// Rehash into `2 * mask + 2` buckets.
    fn grow(&mut self) {
        let new_mask = self.mask * 2 + 1;
        tracing::debug!(
            old_mask = self.mask,
            new_mask,
            count = self.count,
            "rehashing text-keyed cache"
        );
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_mask + 1));
        self.mask = new_mask;
        for bucket in old {
            for entry in bucket {
                let index = self.bucket_index(entry.hash);
                self.buckets[index].push(entry);
            }
        }
    }
}

impl<T: Clone> TextKeyedCache<T> {
    /// Return the cached value for `span`, building and caching it with
    /// `factory` on a miss.
    ///
    /// The factory receives the span it is building for and runs at most
    /// once per distinct content within a session.
    pub fn get_or_insert_with(
        &mut self,
        span: &[CodeUnit],
        factory: impl FnOnce(&[CodeUnit]) -> T,
    ) -> T {
        let hash = self.fnv.hash(span);
        if let Some(value) = self.find_hashed(span, hash) {
            return value.clone();
        }
        let value = factory(span);
        self.insert_hashed(span, hash, value.clone());
        value
    }
}

fn empty_buckets<T>(len: usize) -> Vec<SmallVec<[CacheEntry<T>; 2]>> {
    let mut buckets = Vec::with_capacity(len);
    buckets.resize_with(len, SmallVec::new);
    buckets
}
