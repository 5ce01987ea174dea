//! Caches for derivatives.
//!
//! Differentiating the same subexpression with respect to the same variable always produces the
//! same result, so a [`DerivativeCache`] may store results and hand them out again. The cache is
//! consulted through the [`Ctxt`](super::ctxt::Ctxt) passed to
//! [`Expr::derivative_with`](super::expr::Expr::derivative_with).

use once_cell::sync::OnceCell;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::trace;
use super::expr::Expr;

/// The key of a cached derivative: the expression, and the variable it is differentiated with
/// respect to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    expr: Expr,
    var: Arc<str>,
}

impl CacheKey {
    /// Creates a new cache key.
    pub fn new(expr: Expr, var: &str) -> Self {
        Self { expr, var: Arc::from(var) }
    }

    /// Returns the expression being differentiated.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the variable the expression is differentiated with respect to.
    pub fn var(&self) -> &str {
        &self.var
    }
}

/// A store of derivatives shared between threads.
pub trait DerivativeCache: Send + Sync {
    /// Returns the derivative for the given key, calling `compute` to produce it if the cache
    /// does not hold it.
    fn compute_if_absent(
        &self,
        key: &CacheKey,
        compute: &dyn Fn() -> Option<Expr>,
    ) -> Option<Expr>;
}

/// A cache that stores nothing, and computes every derivative it is asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl DerivativeCache for NullCache {
    fn compute_if_absent(
        &self,
        _: &CacheKey,
        compute: &dyn Fn() -> Option<Expr>,
    ) -> Option<Expr> {
        compute()
    }
}

/// A cache that remembers every derivative it computes, including failed ones.
///
/// Each key is computed at most once, even if several threads ask for it at the same time: the
/// first thread computes the value, and the others wait for it.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: Mutex<HashMap<CacheKey, Arc<OnceCell<Option<Expr>>>>>,
}

impl MemoCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, Arc<OnceCell<Option<Expr>>>>> {
        // the map is never left in an inconsistent state, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the number of keys in the cache.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if the cache holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Removes every entry from the cache.
    pub fn clear(&self) {
        self.entries().clear();
    }
}

impl DerivativeCache for MemoCache {
    fn compute_if_absent(
        &self,
        key: &CacheKey,
        compute: &dyn Fn() -> Option<Expr>,
    ) -> Option<Expr> {
        // computing a derivative consults the cache again, so the lock must not be held here
        let cell = self.entries()
            .entry(key.clone())
            .or_default()
            .clone();

        if let Some(value) = cell.get() {
            trace!(var = key.var(), "derivative cache hit");
            return value.clone();
        }

        cell.get_or_init(|| {
            trace!(var = key.var(), "derivative cache miss");
            compute()
        }).clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::symbolic::simplify::{constant, variable};
    use super::*;

    #[test]
    fn null_cache_recomputes() {
        let calls = AtomicUsize::new(0);
        let key = CacheKey::new(variable("x"), "x");
        for _ in 0..3 {
            NullCache.compute_if_absent(&key, &|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(constant(1))
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn memo_cache_remembers_failures() {
        let cache = MemoCache::new();
        let key = CacheKey::new(variable("x"), "y");
        assert_eq!(cache.compute_if_absent(&key, &|| None), None);
        assert_eq!(cache.compute_if_absent(&key, &|| Some(constant(1))), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn memo_cache_computes_at_most_once() {
        let cache = MemoCache::new();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::new(variable("x"), "x");

        let results = (0..64)
            .into_par_iter()
            .map(|_| cache.compute_if_absent(&key, &|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(constant(1))
            }))
            .collect::<Vec<_>>();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|result| *result == Some(constant(1))));
    }
}
