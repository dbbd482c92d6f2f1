// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounded free list for reusing small value instances in hot loops.
//!
//! Pooling is a throughput aid only. A value that is never released simply
//! does not come back; nothing tracks use after release beyond ordinary
//! ownership (a released value is moved into the pool).

use tracing::trace;

/// Types that can be handed out by a [`Pool`].
///
/// `reinitialize` must route through the type's canonical setter so pooled
/// reuse and ordinary mutation share one code path.
pub trait Poolable: Sized {
    /// Constructor arguments, e.g. `(x, y, z)` for a 3D vector.
    type Args;

    /// Builds a brand-new instance.
    fn fresh(args: Self::Args) -> Self;

    /// Overwrites a recycled instance in place.
    fn reinitialize(&mut self, args: Self::Args);
}

/// Pool sizing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of idle instances retained; extra releases are dropped.
    pub max_size: usize,
}

impl PoolConfig {
    /// Default bound on idle instances.
    pub const DEFAULT_MAX_SIZE: usize = 1000;
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }
}

/// Explicit acquire/release free list.
///
/// # Examples
/// ```
/// use dot_core::{Pool, Vector3};
/// let mut pool: Pool<Vector3> = Pool::default();
/// let v = pool.create((1.0, 2.0, 3.0));
/// assert!(pool.release(v));
/// let w = pool.create((4.0, 5.0, 6.0));
/// assert_eq!(w, Vector3::new(4.0, 5.0, 6.0));
/// assert!(pool.is_empty());
/// ```
#[derive(Debug)]
pub struct Pool<T: Poolable> {
    free: Vec<T>,
    config: PoolConfig,
}

impl<T: Poolable> Pool<T> {
    /// Creates an empty pool.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            free: Vec::new(),
            config,
        }
    }

    /// Checks out an instance initialized from `args`, reusing an idle one
    /// when available.
    pub fn create(&mut self, args: T::Args) -> T {
        match self.free.pop() {
            Some(mut item) => {
                item.reinitialize(args);
                item
            }
            None => T::fresh(args),
        }
    }

    /// Returns an instance to the pool.
    ///
    /// Returns `false` (and drops `item`) when the pool already holds
    /// `max_size` idle instances.
    pub fn release(&mut self, item: T) -> bool {
        if self.free.len() >= self.config.max_size {
            trace!(max_size = self.config.max_size, "pool full; dropping released item");
            return false;
        }
        self.free.push(item);
        true
    }

    /// Number of idle instances.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Returns `true` when no idle instance is available.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Maximum number of idle instances retained.
    pub fn max_size(&self) -> usize {
        self.config.max_size
    }
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}
