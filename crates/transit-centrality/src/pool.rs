//! Worker-pool ownership and sizing.
//!
//! # Ownership
//!
//! A centrality run either creates its own rayon pool or borrows one the
//! caller already owns. The two cases have opposite lifecycle rules: a pool
//! the engine created must be released when the run ends (success or
//! failure), a borrowed pool must never be. [`PoolHandle`] makes the
//! distinction a type: the `Owned` variant drops (and thereby releases) its
//! pool when the handle goes out of scope, the `Borrowed` variant holds a
//! reference and releases nothing. There is no hidden global pool.
//!
//! # Sizing
//!
//! When the engine creates the pool, the default worker count is two-thirds
//! of available hardware parallelism, floored, minimum 1 — centrality runs
//! share the host with ingestion and presentation work, so the engine leaves
//! headroom by default. A caller-supplied pool is used at whatever size it
//! already has.

use std::num::NonZeroUsize;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::Result;

/// A worker pool that is either owned by the current run or borrowed from
/// the caller.
#[derive(Debug)]
pub enum PoolHandle<'a> {
    /// Created by the engine for this run; released on drop.
    Owned(ThreadPool),
    /// Supplied by the caller; the caller keeps ownership.
    Borrowed(&'a ThreadPool),
}

impl<'a> PoolHandle<'a> {
    /// Resolve the pool for one run.
    ///
    /// A supplied `pool` is borrowed as-is and `workers` is ignored (the
    /// pool's existing size wins, matching how its owner configured it).
    /// Otherwise a pool is built with `workers` threads, defaulting to
    /// [`default_worker_count`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::CentralityError::PoolBuild`] if the pool cannot be
    /// created.
    pub fn resolve(pool: Option<&'a ThreadPool>, workers: Option<usize>) -> Result<Self> {
        if let Some(pool) = pool {
            return Ok(Self::Borrowed(pool));
        }
        let workers = workers.unwrap_or_else(default_worker_count).max(1);
        debug!(workers, "building run-scoped worker pool");
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        Ok(Self::Owned(pool))
    }

    /// The pool to dispatch on.
    #[must_use]
    pub fn get(&self) -> &ThreadPool {
        match self {
            Self::Owned(pool) => pool,
            Self::Borrowed(pool) => pool,
        }
    }

    /// Number of worker threads in the resolved pool. Chunk sizing is
    /// derived from this, so a borrowed pool partitions by its real size.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.get().current_num_threads().max(1)
    }
}

/// Default worker count: `2 * available_parallelism / 3`, minimum 1.
#[must_use]
pub fn default_worker_count() -> usize {
    let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    (2 * available / 3).max(1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_worker_count_is_at_least_one() {
        assert!(default_worker_count() >= 1);
    }

    #[test]
    fn resolve_without_pool_builds_owned() {
        let handle = PoolHandle::resolve(None, Some(2)).expect("build pool");
        assert!(matches!(handle, PoolHandle::Owned(_)));
        assert_eq!(handle.worker_count(), 2);
    }

    #[test]
    fn resolve_with_pool_borrows_and_ignores_override() {
        let pool = ThreadPoolBuilder::new()
            .num_threads(3)
            .build()
            .expect("build pool");
        let handle = PoolHandle::resolve(Some(&pool), Some(16)).expect("borrow pool");
        assert!(matches!(handle, PoolHandle::Borrowed(_)));
        assert_eq!(handle.worker_count(), 3);
    }

    #[test]
    fn borrowed_pool_outlives_handle() {
        let pool = ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .expect("build pool");
        {
            let handle = PoolHandle::resolve(Some(&pool), None).expect("borrow pool");
            let sum = handle.get().install(|| 1 + 1);
            assert_eq!(sum, 2);
        }
        // Handle dropped; the caller's pool still works.
        let sum = pool.install(|| 2 + 2);
        assert_eq!(sum, 4);
    }

    #[test]
    fn zero_worker_override_floors_at_one() {
        let handle = PoolHandle::resolve(None, Some(0)).expect("build pool");
        assert_eq!(handle.worker_count(), 1);
    }
}
