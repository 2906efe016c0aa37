//! Tuning constants for caches and pools.

use crate::FnvParams;

/// Identifiers longer than this cannot be keywords.
pub const MAX_KEYWORD_LENGTH: usize = 10;

/// Initial bucket mask of a [`TextKeyedCache`](crate::TextKeyedCache) (32 buckets).
pub const INITIAL_CACHE_MASK: usize = 31;

/// Slots in a keyword classification memo.
pub const KEYWORD_MEMO_SIZE: usize = 512;

/// Initial capacity of a pooled [`SyntaxListBuilder`](crate::SyntaxListBuilder).
pub const BUILDER_CAPACITY: usize = 10;

/// Maximum number of idle instances a pool retains.
pub const MAX_POOLED: usize = 16;

/// Configuration for caches and pools.
///
/// The defaults are empirically tuned performance constants; none of them
/// affects lexing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Bucket mask of a fresh hash-consing cache. `initial_mask + 1` must be
    /// a power of two.
    pub initial_mask: usize,

    /// Fast-reject cutoff for keyword classification.
    pub max_keyword_length: usize,

    /// Slots in each pooled keyword memo. Must be a power of two; colliding
    /// keys overwrite each other.
    pub keyword_memo_size: usize,

    /// Hash parameters for span keys.
    pub fnv: FnvParams,

    /// Initial capacity of pooled list builders.
    pub builder_capacity: usize,

    /// Idle instances retained per pool; extras are dropped on release.
    pub max_pooled: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_mask: INITIAL_CACHE_MASK,
            max_keyword_length: MAX_KEYWORD_LENGTH,
            keyword_memo_size: KEYWORD_MEMO_SIZE,
            fnv: FnvParams::STANDARD,
            builder_capacity: BUILDER_CAPACITY,
            max_pooled: MAX_POOLED,
        }
    }
}

impl CacheConfig {
    /// Create a config with the specified keyword length cutoff.
    pub fn with_max_keyword_length(max_keyword_length: usize) -> Self {
        Self {
            max_keyword_length,
            ..Default::default()
        }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !mask_is_valid(self.initial_mask) {
            return Err(ConfigError::CacheMask(self.initial_mask));
        }
        if !self.keyword_memo_size.is_power_of_two() {
            return Err(ConfigError::KeywordMemoSize(self.keyword_memo_size));
        }
        if self.fnv.prime % 2 == 0 {
            return Err(ConfigError::EvenFnvPrime(self.fnv.prime));
        }
        if self.builder_capacity == 0 {
            return Err(ConfigError::ZeroBuilderCapacity);
        }
        Ok(())
    }
}

/// Returns `true` if `mask + 1` is a power of two.
pub(crate) fn mask_is_valid(mask: usize) -> bool {
    mask.checked_add(1).is_some_and(usize::is_power_of_two)
}

/// Invalid cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cache mask {0} is not one less than a power of two")]
    CacheMask(usize),
    #[error("keyword memo size {0} is not a power of two")]
    KeywordMemoSize(usize),
    #[error("FNV prime {0:#x} must be odd")]
    EvenFnvPrime(u32),
    #[error("builder capacity must be non-zero")]
    ZeroBuilderCapacity,
}
