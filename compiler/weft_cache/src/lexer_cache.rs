//! Per-session cache set: tokens, trivia and keyword kinds.

use crate::keyword_cache::Classifier;
use crate::{
    CacheConfig, CodeUnit, KeywordKindCache, KeywordKindPool, ObjectPool, TextKeyedCache,
};

/// Shared pools backing every [`LexerCache`].
///
/// One `LexerPools` is typically created per process (or per host) and
/// passed by reference to each lexing session. All methods take `&self`
/// and are safe to call from several threads.
pub struct LexerPools<Tok, Triv, K> {
    config: CacheConfig,
    tokens: ObjectPool<TextKeyedCache<Tok>>,
    trivia: ObjectPool<TextKeyedCache<Triv>>,
    keywords: KeywordKindPool<K>,
}

impl<Tok, Triv, K: Copy> LexerPools<Tok, Triv, K> {
    /// Create pools using `classify` for keyword lookups.
    pub fn new(config: CacheConfig, classify: Classifier<K>) -> Self {
        LexerPools {
            config,
            tokens: ObjectPool::new(config.max_pooled),
            trivia: ObjectPool::new(config.max_pooled),
            keywords: KeywordKindPool::new(&config, classify),
        }
    }

    /// Borrow a cache set for one session.
    pub fn allocate(&self) -> LexerCache<'_, Tok, Triv, K> {
        let config = self.config;
        LexerCache {
            pools: self,
            tokens: self.tokens.allocate_with(|| TextKeyedCache::new(&config)),
            trivia: self.trivia.allocate_with(|| TextKeyedCache::new(&config)),
            keywords: self.keywords.allocate(),
        }
    }

    /// Configuration the pools were built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Number of idle token caches.
    pub fn available_token_caches(&self) -> usize {
        self.tokens.available()
    }
}

/// The token, trivia and keyword caches of one lexing session.
///
/// Must be returned with [`free`](Self::free) when the session ends.
/// Forgetting to do so only costs pooled capacity; cached entries never
/// leak into another session because caches are cleared on release.
pub struct LexerCache<'p, Tok, Triv, K> {
    pools: &'p LexerPools<Tok, Triv, K>,
    tokens: TextKeyedCache<Tok>,
    trivia: TextKeyedCache<Triv>,
    keywords: KeywordKindCache<K>,
}

impl<Tok: Clone, Triv: Clone, K: Copy> LexerCache<'_, Tok, Triv, K> {
    /// Canonical token for `span`, built by `factory` on a miss.
    #[inline]
    pub fn lookup_token(
        &mut self,
        span: &[CodeUnit],
        factory: impl FnOnce(&[CodeUnit]) -> Tok,
    ) -> Tok {
        self.tokens.get_or_insert_with(span, factory)
    }

    /// Canonical trivia for `span`, built by `factory` on a miss.
    #[inline]
    pub fn lookup_trivia(
        &mut self,
        span: &[CodeUnit],
        factory: impl FnOnce(&[CodeUnit]) -> Triv,
    ) -> Triv {
        self.trivia.get_or_insert_with(span, factory)
    }

    /// Keyword classification of identifier text.
    #[inline]
    pub fn try_get_keyword_kind(&mut self, text: &[CodeUnit]) -> Option<K> {
        self.keywords.try_get_keyword_kind(text)
    }

    /// Number of cached tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of cached trivia.
    pub fn trivia_count(&self) -> usize {
        self.trivia.len()
    }

    /// Clear the caches and return them to their pools.
    pub fn free(self) {
        let LexerCache {
            pools,
            mut tokens,
            mut trivia,
            keywords,
        } = self;
        tokens.clear();
        trivia.clear();
        pools.tokens.free(tokens);
        pools.trivia.free(trivia);
        pools.keywords.free(keywords);
    }
}

#[cfg(test)]
mod tests;
