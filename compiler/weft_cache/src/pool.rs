//! Thread-safe free list shared by every pool in the workspace.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

/// A bounded free list of reusable instances.
///
/// Sessions on different threads may allocate and free concurrently; each
/// instance is owned by exactly one session while lent out. Freed instances
/// beyond `max_retained` are dropped.
pub struct ObjectPool<T> {
    free: Mutex<Vec<T>>,
    max_retained: usize,
    /// Instances constructed because the free list was empty.
    created: AtomicUsize,
}

impl<T> ObjectPool<T> {
    /// Create an empty pool retaining at most `max_retained` idle instances.
    pub fn new(max_retained: usize) -> Self {
        ObjectPool {
            free: Mutex::new(Vec::new()),
            max_retained,
            created: AtomicUsize::new(0),
        }
    }

    /// Pop an idle instance, or construct one with `make`.
    pub fn allocate_with(&self, make: impl FnOnce() -> T) -> T {
        if let Some(item) = self.free.lock().pop() {
            return item;
        }
        let created = self.created.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(
            pool = std::any::type_name::<T>(),
            created,
            "pool empty, constructing instance"
        );
        make()
    }

    /// Return an instance. Returns `false` if the pool was full and the
    /// instance was dropped.
    pub fn free(&self, item: T) -> bool {
        let mut free = self.free.lock();
        if free.len() < self.max_retained {
            free.push(item);
            true
        } else {
            false
        }
    }

    /// Number of idle instances.
    pub fn available(&self) -> usize {
        self.free.lock().len()
    }

    /// Number of instances constructed over the pool's lifetime.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}
