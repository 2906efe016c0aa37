//! Shared pool of window buffers and intern tables.

use weft_cache::{CodeUnit, InternPool, ObjectPool};

use crate::{LexerConfig, WindowConfig};

/// Free list of default-length window buffers.
pub struct BufferPool {
    buffers: ObjectPool<Vec<CodeUnit>>,
    window_length: usize,
}

impl BufferPool {
    pub fn new(config: &WindowConfig) -> Self {
        BufferPool {
            buffers: ObjectPool::new(config.max_pooled_buffers),
            window_length: config.window_length,
        }
    }

    /// Borrow a zero-filled buffer of the configured window length.
    pub fn allocate(&self) -> Vec<CodeUnit> {
        let window_length = self.window_length;
        self.buffers.allocate_with(|| vec![0; window_length])
    }

    /// Return a buffer. Buffers that grew beyond the window length are
    /// dropped so the pool never pins oversized allocations.
    pub fn free(&self, buffer: Vec<CodeUnit>) {
        if buffer.len() == self.window_length {
            self.buffers.free(buffer);
        } else {
            tracing::debug!(
                len = buffer.len(),
                window_length = self.window_length,
                "dropping grown window buffer"
            );
        }
    }

    /// Number of idle buffers.
    pub fn available(&self) -> usize {
        self.buffers.available()
    }

    /// Configured window length.
    pub fn window_length(&self) -> usize {
        self.window_length
    }
}

/// The pools a [`TextWindow`](crate::TextWindow) draws from: window buffers
/// and per-session intern tables.
///
/// Shared by reference between sessions, possibly on different threads.
pub struct WindowPools {
    pub buffers: BufferPool,
    pub interns: InternPool,
}

impl WindowPools {
    pub fn new(config: &LexerConfig) -> Self {
        WindowPools {
            buffers: BufferPool::new(&config.window),
            interns: InternPool::new(&config.cache),
        }
    }
}

impl Default for WindowPools {
    fn default() -> Self {
        Self::new(&LexerConfig::default())
    }
}
