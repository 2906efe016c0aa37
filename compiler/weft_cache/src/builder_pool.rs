//! Pooled child-list accumulators for syntax assembly.
//!
//! A production that collects a variable number of children acquires a
//! [`PooledBuilder`] at its start and fills it. Dropping the handle (on any
//! exit path, including early error returns) clears the builder and
//! returns it to the pool, so a handle can never be used after release and
//! can never be released twice.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{CacheConfig, ObjectPool};

/// Growable list of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxListBuilder<T> {
    nodes: Vec<T>,
}

impl<T> SyntaxListBuilder<T> {
    /// Create an empty builder with room for `capacity` children.
    pub fn with_capacity(capacity: usize) -> Self {
        SyntaxListBuilder {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add(&mut self, node: T) {
        self.nodes.push(node);
    }

    pub fn add_range(&mut self, nodes: impl IntoIterator<Item = T>) {
        self.nodes.extend(nodes);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.nodes.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.nodes.last()
    }

    pub fn remove_last(&mut self) -> Option<T> {
        self.nodes.pop()
    }

    pub fn any(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.nodes.iter().any(pred)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all children, keeping capacity.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Move the children out as a list, leaving the builder empty with its
    /// capacity intact.
    pub fn take_list(&mut self) -> Vec<T> {
        self.nodes.drain(..).collect()
    }
}

impl<T: Clone> SyntaxListBuilder<T> {
    /// Copy the children into a list, leaving the builder unchanged.
    pub fn to_list(&self) -> Vec<T> {
        self.nodes.clone()
    }
}

impl<T> Default for SyntaxListBuilder<T> {
    fn default() -> Self {
        SyntaxListBuilder { nodes: Vec::new() }
    }
}

impl<'a, T> IntoIterator for &'a SyntaxListBuilder<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Shared free list of [`SyntaxListBuilder`]s.
pub struct BuilderPool<T> {
    builders: ObjectPool<SyntaxListBuilder<T>>,
    capacity: usize,
    /// Handles currently lent out.
    outstanding: AtomicUsize,
}

impl<T> BuilderPool<T> {
    /// Create a pool whose fresh builders start with
    /// `config.builder_capacity` slots.
    pub fn new(config: &CacheConfig) -> Self {
        BuilderPool {
            builders: ObjectPool::new(config.max_pooled),
            capacity: config.builder_capacity,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Acquire an empty builder. It returns to the pool when the handle drops.
    pub fn allocate(&self) -> PooledBuilder<'_, T> {
        let capacity = self.capacity;
        let builder = self
            .builders
            .allocate_with(|| SyntaxListBuilder::with_capacity(capacity));
        debug_assert!(builder.is_empty(), "pooled builder was not cleared");
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        PooledBuilder {
            pool: self,
            builder,
        }
    }

    /// Number of handles currently lent out.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Number of idle builders.
    pub fn available(&self) -> usize {
        self.builders.available()
    }

    fn release(&self, mut builder: SyntaxListBuilder<T>) {
        let previous = self.outstanding.fetch_sub(1, Ordering::Relaxed);
        debug_assert!(previous > 0, "builder released more times than allocated");
        builder.clear();
        self.builders.free(builder);
    }
}

impl<T> Default for BuilderPool<T> {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

/// Move-only handle to a pooled builder.
///
/// Dereferences to [`SyntaxListBuilder`]. Dropping it releases the builder.
pub struct PooledBuilder<'p, T> {
    pool: &'p BuilderPool<T>,
    builder: SyntaxListBuilder<T>,
}

impl<T> PooledBuilder<'_, T> {
    /// Release the builder explicitly. Equivalent to dropping the handle.
    pub fn free(self) {}

    /// Take the children as a list and release the builder.
    pub fn into_list(mut self) -> Vec<T> {
        self.builder.take_list()
    }
}

impl<T> Deref for PooledBuilder<'_, T> {
    type Target = SyntaxListBuilder<T>;

    fn deref(&self) -> &Self::Target {
        &self.builder
    }
}

impl<T> DerefMut for PooledBuilder<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.builder
    }
}

impl<T> Drop for PooledBuilder<'_, T> {
    fn drop(&mut self) {
        let builder = std::mem::take(&mut self.builder);
        self.pool.release(builder);
    }
}
