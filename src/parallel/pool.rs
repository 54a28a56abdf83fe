//! Rayon thread pool configuration for playout workloads.
//!
//! Turn resolution itself is always single-threaded; parallelism is only
//! across independent playouts. [WorkerPool::install] runs a batch closure on
//! either the global Rayon pool or a scoped pool with an explicit thread
//! count.

use rayon::ThreadPoolBuilder;

/// Worker thread count for parallel batch execution.
///
/// `None` means the global Rayon pool (all CPU cores); `Some(n)` builds a
/// scoped pool with exactly `n` threads for the duration of the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    workers: Option<usize>,
}

impl WorkerPool {
    /// Use all available CPU cores (Rayon default).
    pub fn default_workers() -> Self {
        Self::default()
    }

    /// Use exactly `n` worker threads. `0` falls back to the Rayon default.
    pub fn with_workers(n: usize) -> Self {
        Self {
            workers: (n > 0).then_some(n),
        }
    }

    /// Read the thread count from an environment variable (e.g.
    /// `GAUNTLET_WORKERS`). Unset or unparseable values mean the default pool.
    pub fn from_env(var: &str) -> Self {
        match std::env::var(var).ok().and_then(|raw| raw.parse().ok()) {
            Some(n) => Self::with_workers(n),
            None => Self::default_workers(),
        }
    }

    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    /// Run `f` under this pool configuration.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self.workers {
            None => f(),
            Some(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .expect("Rayon thread pool");
                pool.install(f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_means_default_pool() {
        assert_eq!(WorkerPool::with_workers(0).workers(), None);
        assert_eq!(WorkerPool::with_workers(3).workers(), Some(3));
    }

    #[test]
    fn install_runs_closure_on_scoped_pool() {
        let pool = WorkerPool::with_workers(2);
        let total: u64 = pool.install(|| (1..=10u64).sum());
        assert_eq!(total, 55);
    }
}
