// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for hypergraph construction, parsing and engine setup.
//!
//! Only faults that can be caused by input data or configuration are
//! reported here. Broken search invariants are programming errors and panic.

use thiserror::Error;

/// Errors raised by the library.
#[derive(Debug, Error)]
pub enum MhsError {
    /// A token in the text format was not a non-negative integer.
    #[error("could not convert '{token}' to a vertex index on line {line}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// The token that failed to parse.
        token: String,
    },

    /// Reading or writing a hypergraph file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A vertex index has no domain object assigned to it.
    #[error("vertex index {0} is not assigned to any object")]
    UnknownIndex(usize),

    /// Score ordering was requested after edges had been added.
    #[error("cannot reorder vertices once edges are added")]
    ReorderAfterEdges,

    /// An engine option is not recognized by the selected engine.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be started.
    #[error("could not build worker pool: {0}")]
    ThreadPool(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = MhsError> = std::result::Result<T, E>;
