// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cooperative cancellation.
//!
//! A [`CancelToken`] is a one-way, best-effort flag. Engines poll it at the
//! top of every recursive call and every vertex or edge loop, and unwind
//! when it is set. Loads and stores are `Relaxed`: a worker may observe the
//! flag a few steps late, which only costs a little extra work.
//!
//! Hitting sets confirmed before the flag was observed are still valid and
//! are returned as a partial result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested.
    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clear the flag so the owning engine can run again.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
