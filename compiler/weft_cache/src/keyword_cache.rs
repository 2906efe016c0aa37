//! Memoized keyword classification of identifier text.
//!
//! Identifier scanning asks, for every identifier, whether its text is a
//! reserved or contextual keyword. The classification function is pure, so
//! each pool-borrowed [`CachingFactory`] remembers recent answers in a
//! fixed number of slots. A key that hashes to an occupied slot evicts the
//! previous entry. Text longer than the configured cutoff is rejected before
//! any lookup.

use crate::{CacheConfig, CodeUnit, FnvParams, ObjectPool};

/// Classification function: `Some(kind)` for keywords, `None` otherwise.
pub type Classifier<K> = fn(&str) -> Option<K>;

struct MemoEntry<K> {
    text: Vec<CodeUnit>,
    kind: Option<K>,
}

/// Memoizing wrapper around a [`Classifier`].
///
/// The memo is direct-mapped, so its size never exceeds the slot count no
/// matter how many distinct keys pass through it.
pub struct CachingFactory<K> {
    classify: Classifier<K>,
    slots: Box<[Option<MemoEntry<K>>]>,
    fnv: FnvParams,
    /// Number of times `classify` actually ran.
    evaluations: usize,
}

impl<K: Copy> CachingFactory<K> {
    /// Create an empty factory over `classify` with
    /// `config.keyword_memo_size` slots.
    pub fn new(config: &CacheConfig, classify: Classifier<K>) -> Self {
        let size = config.keyword_memo_size.max(1).next_power_of_two();
        CachingFactory {
            classify,
            slots: std::iter::repeat_with(|| None).take(size).collect(),
            fnv: config.fnv,
            evaluations: 0,
        }
    }

    /// Return the memoized classification of `key`, computing it when the
    /// slot for `key` holds nothing or holds another key.
    ///
    /// Keys that are not valid UTF-16 are never keywords.
    pub fn get_or_make_value(&mut self, key: &[CodeUnit]) -> Option<K> {
        let index = self.fnv.hash(key) as usize & (self.slots.len() - 1);
        if let Some(entry) = &self.slots[index] {
            if entry.text == key {
                return entry.kind;
            }
        }

        self.evaluations += 1;
        let kind = String::from_utf16(key)
            .ok()
            .and_then(|text| (self.classify)(&text));
        match &mut self.slots[index] {
            Some(entry) => {
                entry.text.clear();
                entry.text.extend_from_slice(key);
                entry.kind = kind;
            }
            slot @ None => {
                *slot = Some(MemoEntry {
                    text: key.to_vec(),
                    kind,
                });
            }
        }
        kind
    }

    /// Number of classifier evaluations so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Number of occupied memo slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Total memo slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Per-session keyword lookup, borrowed from a [`KeywordKindPool`].
pub struct KeywordKindCache<K> {
    factory: CachingFactory<K>,
    max_keyword_length: usize,
}

impl<K: Copy> KeywordKindCache<K> {
    /// Classify identifier text.
    ///
    /// Returns `None` without consulting the factory when `text` is longer
    /// than the keyword length cutoff.
    #[inline]
    pub fn try_get_keyword_kind(&mut self, text: &[CodeUnit]) -> Option<K> {
        if text.len() > self.max_keyword_length {
            return None;
        }
        self.factory.get_or_make_value(text)
    }

    /// Number of classifier evaluations performed by the underlying factory
    /// over its whole pooled lifetime.
    pub fn evaluations(&self) -> usize {
        self.factory.evaluations()
    }

    /// Number of classifications currently remembered.
    pub fn memo_len(&self) -> usize {
        self.factory.len()
    }
}

/// Shared pool of memoizing keyword factories.
///
/// Factories keep their memo slots across borrows: the classification
/// never changes, so earlier answers stay valid for every later session.
pub struct KeywordKindPool<K> {
    factories: ObjectPool<CachingFactory<K>>,
    classify: Classifier<K>,
    config: CacheConfig,
}

impl<K: Copy> KeywordKindPool<K> {
    /// Create a pool over `classify`.
    pub fn new(config: &CacheConfig, classify: Classifier<K>) -> Self {
        KeywordKindPool {
            factories: ObjectPool::new(config.max_pooled),
            classify,
            config: *config,
        }
    }

    /// Borrow a keyword cache.
    pub fn allocate(&self) -> KeywordKindCache<K> {
        let classify = self.classify;
        KeywordKindCache {
            factory: self
                .factories
                .allocate_with(|| CachingFactory::new(&self.config, classify)),
            max_keyword_length: self.config.max_keyword_length,
        }
    }

    /// Return a keyword cache to the pool.
    pub fn free(&self, cache: KeywordKindCache<K>) {
        self.factories.free(cache.factory);
    }
}

#[cfg(test)]
mod tests;
