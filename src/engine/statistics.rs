// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Search counters shared by every task of one run. Counters are atomics so
//! forked tasks can increment them without coordination; values read after
//! the run has quiesced are exact.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, Display, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Recursive calls (or Berge extension steps).
    SearchNodes,
    /// Sub-tasks handed to the scheduler.
    Forks,
    /// Vertices skipped because adding them would break minimality.
    ViolatorsSkipped,
    /// Branches cut by the RS ordering condition.
    OrderPruned,
    /// Minimal hitting sets reported.
    HittingSetsFound,
    /// Greedy candidates whose hitting property was checked.
    CandidatesExamined,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug)]
pub struct Statistics {
    stats: [AtomicU64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics {
            stats: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Increment the specified counter by 1.
    pub fn increment(&self, counter: Counters) {
        self.add(counter, 1);
    }

    pub fn add(&self, counter: Counters, amount: u64) {
        self.stats[counter as usize].fetch_add(amount, Ordering::Relaxed);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize].load(Ordering::Relaxed)
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Statistics {
    /// Non-zero counters only, e.g. "SearchNodes=12 HittingSetsFound=5".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            let value = self.get(counter);
            if value == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{counter}={value}")?;
            first = false;
        }
        Ok(())
    }
}
