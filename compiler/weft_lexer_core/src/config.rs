//! Lexer configuration.

use weft_cache::CacheConfig;

/// Default window capacity in code units.
pub const DEFAULT_WINDOW_LENGTH: usize = 2048;

/// Idle window buffers retained by a [`BufferPool`](crate::BufferPool).
pub const MAX_POOLED_BUFFERS: usize = 16;

/// Configuration for text windows and their buffer pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    /// Initial capacity of a window buffer. Buffers that grew past this
    /// length are not returned to the pool.
    pub window_length: usize,

    /// Idle buffers retained by the pool.
    pub max_pooled_buffers: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            max_pooled_buffers: MAX_POOLED_BUFFERS,
        }
    }
}

impl WindowConfig {
    /// Create a config with the specified window length.
    pub fn with_window_length(window_length: usize) -> Self {
        Self {
            window_length,
            ..Default::default()
        }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_length == 0 {
            return Err(ConfigError::ZeroWindowLength);
        }
        Ok(())
    }
}

/// Unified configuration for a lexing host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LexerConfig {
    pub window: WindowConfig,
    pub cache: CacheConfig,
}

impl LexerConfig {
    /// Check both halves of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

/// Invalid lexer configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("window length must be non-zero")]
    ZeroWindowLength,
    #[error(transparent)]
    Cache(#[from] weft_cache::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(LexerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_window() {
        let config = LexerConfig {
            window: WindowConfig::with_window_length(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWindowLength));
    }

    #[test]
    fn cache_errors_are_wrapped() {
        let config = LexerConfig {
            cache: CacheConfig {
                builder_capacity: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Cache(weft_cache::ConfigError::ZeroBuilderCapacity))
        );
        assert_eq!(
            config.validate().map_err(|e| e.to_string()),
            Err("builder capacity must be non-zero".to_owned())
        );
    }
}
