// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fork/join scheduling for the parallel search engines.
//!
//! A [`Scheduler`] owns a work-stealing rayon pool. [`Scheduler::run`] opens
//! a scope, hands the root task a [`TaskScope`], and returns only once the
//! root and every task forked from it (transitively) have finished. That
//! return is the quiescence barrier the engines rely on before reading
//! their result queue.
//!
//! Forking is a load-balancing decision. A task asks
//! [`TaskScope::should_fork`], which compares the number of forked tasks
//! that have not started yet against a small threshold. Below it, the task
//! hands a private copy of its state to [`TaskScope::fork`]; above it, the
//! task keeps working in its own thread on the state it already owns.
//!
//! # Example
//!
//! ```
//! use mhs_search::scheduler::{Scheduler, TaskScope};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! fn count_down<'scope>(scope: &TaskScope<'_, 'scope>, n: usize, visited: &'scope AtomicUsize) {
//!     visited.fetch_add(1, Ordering::Relaxed);
//!     if n == 0 {
//!         return;
//!     }
//!     if scope.should_fork() {
//!         scope.fork(move |scope| count_down(scope, n - 1, visited));
//!     } else {
//!         count_down(scope, n - 1, visited);
//!     }
//! }
//!
//! let scheduler = Scheduler::new(None).unwrap();
//! let visited = AtomicUsize::new(0);
//! scheduler.run(|scope| count_down(scope, 100, &visited));
//! assert_eq!(visited.load(Ordering::Relaxed), 101);
//! ```

use crate::error::{MhsError, Result};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fork when fewer than this many forked tasks are waiting to start.
pub const DEFAULT_FORK_THRESHOLD: usize = 4;

/// Work-stealing fork/join executor.
pub struct Scheduler {
    pool: rayon::ThreadPool,
    pending: AtomicUsize,
    fork_threshold: usize,
}

impl Scheduler {
    /// Create a scheduler with `threads` workers, or one per core when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MhsError::ThreadPool`] if the worker threads cannot start.
    pub fn new(threads: Option<NonZeroUsize>) -> Result<Self> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|index| format!("mhs-worker-{index}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads.get());
        }
        let pool = builder
            .build()
            .map_err(|e| MhsError::ThreadPool(e.to_string()))?;

        tracing::debug!(threads = pool.current_num_threads(), "worker pool started");

        Ok(Self {
            pool,
            pending: AtomicUsize::new(0),
            fork_threshold: DEFAULT_FORK_THRESHOLD,
        })
    }

    /// Set the pending-task threshold below which tasks fork.
    ///
    /// A threshold of 0 disables forking entirely.
    pub fn with_fork_threshold(mut self, fork_threshold: usize) -> Self {
        self.fork_threshold = fork_threshold;
        self
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `root` on the pool and wait until it and all forked tasks finish.
    ///
    /// A panic in any task is propagated to the caller after the scope has
    /// drained.
    pub fn run<'scope, F, R>(&'scope self, root: F) -> R
    where
        F: FnOnce(&TaskScope<'_, 'scope>) -> R + Send,
        R: Send,
    {
        let pending = &self.pending;
        let fork_threshold = self.fork_threshold;
        self.pool.scope(move |scope| {
            root(&TaskScope {
                scope,
                pending,
                fork_threshold,
            })
        })
    }
}

/// Handle through which a running task forks sub-tasks.
pub struct TaskScope<'a, 'scope> {
    scope: &'a rayon::Scope<'scope>,
    pending: &'scope AtomicUsize,
    fork_threshold: usize,
}

impl<'a, 'scope> TaskScope<'a, 'scope> {
    /// Check whether the queue of forked-but-unstarted tasks is shallow.
    pub fn should_fork(&self) -> bool {
        self.pending() < self.fork_threshold
    }

    /// Number of forked tasks that have not started yet.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Relaxed)
    }

    /// Run `task` as an independent sub-task of the current scope.
    ///
    /// The task must own (or borrow for `'scope`) everything it touches;
    /// in particular it must not alias mutable state of its parent.
    pub fn fork<F>(&self, task: F)
    where
        F: FnOnce(&TaskScope<'_, 'scope>) + Send + 'scope,
    {
        let pending = self.pending;
        let fork_threshold = self.fork_threshold;
        pending.fetch_add(1, Ordering::Relaxed);
        self.scope.spawn(move |scope| {
            pending.fetch_sub(1, Ordering::Relaxed);
            task(&TaskScope {
                scope,
                pending,
                fork_threshold,
            });
        });
    }
}
