//! A lexing session: one text window plus one cache set.
//!
//! The window supplies the raw span of the in-flight lexeme and the caches
//! canonicalize whatever the caller builds from it. Both draw from shared
//! pools and are returned to them by [`LexSession::finish`].

use weft_cache::{CacheConfig, CodeUnit, Classifier, LexerCache, LexerPools};

use crate::{ConfigError, LexerConfig, SourceText, TextWindow, Utf16Source, WindowPools};

/// Every pool a session draws from.
///
/// Shared by reference across sessions and threads.
pub struct SessionPools<Tok, Triv, K> {
    pub window: WindowPools,
    pub cache: LexerPools<Tok, Triv, K>,
}

impl<Tok: Clone, Triv: Clone, K: Copy> SessionPools<Tok, Triv, K> {
    /// Build pools for `config`, rejecting unusable configurations.
    pub fn new(config: &LexerConfig, classify: Classifier<K>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(SessionPools {
            window: WindowPools::new(config),
            cache: LexerPools::new(config.cache, classify),
        })
    }

    /// Start a session over `text`.
    pub fn session<'a, S: SourceText + ?Sized>(
        &'a self,
        text: &'a S,
    ) -> LexSession<'a, S, Tok, Triv, K> {
        LexSession::new(text, &self.window, &self.cache)
    }

    pub fn cache_config(&self) -> &CacheConfig {
        self.cache.config()
    }
}

/// Window and caches for lexing one text.
pub struct LexSession<'a, S: SourceText + ?Sized = Utf16Source, Tok = (), Triv = (), K = ()> {
    window: TextWindow<'a, S>,
    cache: LexerCache<'a, Tok, Triv, K>,
}

impl<'a, S, Tok, Triv, K> LexSession<'a, S, Tok, Triv, K>
where
    S: SourceText + ?Sized,
    Tok: Clone,
    Triv: Clone,
    K: Copy,
{
    pub fn new(
        text: &'a S,
        window_pools: &'a WindowPools,
        cache_pools: &'a LexerPools<Tok, Triv, K>,
    ) -> Self {
        LexSession {
            window: TextWindow::new(text, window_pools),
            cache: cache_pools.allocate(),
        }
    }

    #[inline]
    pub fn window(&self) -> &TextWindow<'a, S> {
        &self.window
    }

    #[inline]
    pub fn window_mut(&mut self) -> &mut TextWindow<'a, S> {
        &mut self.window
    }

    /// Canonical token for the in-flight lexeme.
    pub fn lookup_token(&mut self, factory: impl FnOnce(&[CodeUnit]) -> Tok) -> Tok {
        self.cache.lookup_token(self.window.lexeme_units(), factory)
    }

    /// Canonical trivia for the in-flight lexeme.
    pub fn lookup_trivia(&mut self, factory: impl FnOnce(&[CodeUnit]) -> Triv) -> Triv {
        self.cache.lookup_trivia(self.window.lexeme_units(), factory)
    }

    /// Keyword classification of the in-flight lexeme.
    pub fn keyword_kind(&mut self) -> Option<K> {
        self.cache.try_get_keyword_kind(self.window.lexeme_units())
    }

    /// Number of distinct tokens and trivia cached so far.
    pub fn cached_counts(&self) -> (usize, usize) {
        (self.cache.token_count(), self.cache.trivia_count())
    }

    /// End the session, returning every resource to its pool.
    pub fn finish(self) {
        let LexSession { window, cache } = self;
        tracing::debug!(
            position = window.position(),
            tokens = cache.token_count(),
            trivia = cache.trivia_count(),
            stats = ?window.stats(),
            "lex session finished"
        );
        window.release();
        cache.free();
    }
}
