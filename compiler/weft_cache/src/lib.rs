//! Allocation-avoidance layer of the weft lexer front end.
//!
//! - [`StringInternTable`]: one shared `Arc<str>` per distinct code-unit content
//! - [`TextKeyedCache`]: hash-consing of whole token/trivia values keyed by raw spans
//! - [`KeywordKindCache`]: memoized keyword classification of identifier text
//! - [`BuilderPool`]: reusable child-list accumulators for syntax assembly
//! - [`LexerCache`]: the per-session bundle of the above, drawn from [`LexerPools`]
//!
//! # Sessions and Pools
//!
//! Tables are owned by exactly one lexing session at a time and take `&mut self`.
//! Pools are shared between sessions (and threads) by reference and
//! synchronize internally. Nothing in this crate is a process-wide singleton:
//! callers construct the pools they need and pass them to each session.

mod builder_pool;
mod config;
mod hash;
mod intern;
mod keyword_cache;
mod lexer_cache;
mod pool;
mod text_keyed_cache;

/// A UTF-16 code unit, the element type of source text.
pub type CodeUnit = u16;

pub use builder_pool::{BuilderPool, PooledBuilder, SyntaxListBuilder};
pub use config::{CacheConfig, ConfigError};
pub use hash::FnvParams;
pub use intern::{InternPool, StringInternTable};
pub use keyword_cache::{CachingFactory, Classifier, KeywordKindCache, KeywordKindPool};
pub use lexer_cache::{LexerCache, LexerPools};
pub use pool::ObjectPool;
pub use text_keyed_cache::TextKeyedCache;
