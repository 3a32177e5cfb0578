//! Id allocation
//!
//! Per-file cache of the last issued record id. The cache is an explicit
//! component rather than process-global state, so callers decide its
//! lifetime: every [`crate::Store`] owns one by default, and tests or
//! multi-store setups can share a single allocator instead.
//!
//! Nothing here is persisted — a fresh allocator re-derives each seed
//! from file contents, which makes the recorded ids the only durable
//! upper bound.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

/// Process-lifetime cache of last-issued ids, keyed by file path
#[derive(Default)]
pub struct IdAllocator {
    last_ids: RwLock<HashMap<PathBuf, Arc<AtomicI64>>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `path`
    ///
    /// On first use for a path, `seed` supplies the last id already
    /// recorded in the file (a max-id scan). Allocation itself is a
    /// read-then-compare-exchange retry loop, so concurrent callers on
    /// the same path always receive distinct, strictly increasing ids.
    pub fn allocate(&self, path: &Path, seed: impl FnOnce() -> Result<i64>) -> Result<i64> {
        let counter = self.counter_for(path, seed)?;

        loop {
            let last = counter.load(Ordering::SeqCst);
            let next = last + 1;
            if counter
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return Ok(next);
            }
        }
    }

    /// The last id issued (or seeded) for `path`, if the path is cached
    pub fn last_issued(&self, path: &Path) -> Option<i64> {
        self.last_ids
            .read()
            .get(path)
            .map(|counter| counter.load(Ordering::SeqCst))
    }

    /// Fetch or lazily seed the counter for a path
    ///
    /// Two racing callers may both run `seed`; the first insert wins and
    /// both end up sharing the same counter.
    fn counter_for(&self, path: &Path, seed: impl FnOnce() -> Result<i64>) -> Result<Arc<AtomicI64>> {
        if let Some(counter) = self.last_ids.read().get(path) {
            return Ok(Arc::clone(counter));
        }

        let seeded = seed()?;
        let mut map = self.last_ids.write();
        let counter = map
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(AtomicI64::new(seeded)));
        Ok(Arc::clone(counter))
    }
}
