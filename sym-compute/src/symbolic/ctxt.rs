//! The execution context of differentiation and evaluation.
//!
//! Wide sums and products can have their children processed on a [`rayon`] thread pool. The
//! results are collected in input order, so a parallel run produces the same expression as a
//! sequential one.

use rayon::{prelude::*, ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::{fmt, sync::Arc};
use super::{cache::{DerivativeCache, NullCache}, expr::Expr};

/// The default number of children a sum or product must have before its children are processed
/// in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// The execution context of differentiation and evaluation.
///
/// A context decides whether the children of wide sums and products are processed on a thread
/// pool, and which cache is consulted for derivatives. There is no global state: the default
/// context is sequential and uncached.
///
/// ```
/// use sym_compute::symbolic::{cache::MemoCache, ctxt::Ctxt, parse::parse};
/// use std::sync::Arc;
///
/// let ctxt = Ctxt::new()
///     .with_threads(2)
///     .unwrap()
///     .with_cache(Arc::new(MemoCache::new()));
///
/// let expr = parse("x^3 + sin(x)").unwrap();
/// let derivative = expr.derivative_with("x", &ctxt).unwrap();
/// assert_eq!(derivative, parse("3x^2 + cos(x)").unwrap());
/// ```
#[derive(Clone)]
pub struct Ctxt {
    /// The thread pool used to process wide nodes. If [`None`], everything runs on the calling
    /// thread.
    pool: Option<Arc<ThreadPool>>,

    /// The number of children at which a node is processed in parallel.
    parallel_threshold: usize,

    /// The cache consulted for derivatives.
    cache: Arc<dyn DerivativeCache>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            pool: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            cache: Arc::new(NullCache),
        }
    }
}

impl fmt::Debug for Ctxt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctxt")
            .field("threads", &self.pool.as_ref().map(|pool| pool.current_num_threads()))
            .field("parallel_threshold", &self.parallel_threshold)
            .finish_non_exhaustive()
    }
}

impl Ctxt {
    /// Creates a sequential, uncached context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes wide nodes on the given thread pool.
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Processes wide nodes on a new thread pool with the given number of threads.
    pub fn with_threads(self, threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sym-worker-{}", i))
            .build()?;
        Ok(self.with_pool(Arc::new(pool)))
    }

    /// Sets the number of children at which a node is processed in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Sets the cache consulted for derivatives.
    pub fn with_cache(mut self, cache: Arc<dyn DerivativeCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Returns the cache consulted for derivatives.
    pub fn cache(&self) -> &dyn DerivativeCache {
        &*self.cache
    }

    /// Returns the thread pool to use for a node with the given number of children, if it is
    /// wide enough.
    fn pool_for(&self, len: usize) -> Option<&ThreadPool> {
        self.pool.as_deref().filter(|_| len >= self.parallel_threshold)
    }

    /// Applies `f` to each item, in parallel if there are enough items and a pool is available.
    /// The results are in input order. Returns [`None`] if any application fails.
    pub(crate) fn try_map<F>(&self, items: &[Expr], f: F) -> Option<Vec<Expr>>
    where
        F: Fn(&Expr) -> Option<Expr> + Sync + Send,
    {
        match self.pool_for(items.len()) {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.iter().map(f).collect(),
        }
    }

    /// Runs the two closures, in parallel if `width` is large enough and a pool is available.
    pub(crate) fn join<A, B, RA, RB>(&self, width: usize, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        match self.pool_for(width) {
            Some(pool) => pool.join(a, b),
            None => (a(), b()),
        }
    }
}
