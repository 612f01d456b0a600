//! Error types for the Orbis matrix library.
//!
//! All crates return `OrbisResult<T>` from fallible operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which kind of index an [`OrbisError::OutOfRange`] or
/// [`OrbisError::InvalidRange`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    /// A row index.
    Row,
    /// A column index.
    Column,
    /// A plain index (vector position, principal sub-matrix index).
    Index,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Row => f.write_str("row"),
            IndexKind::Column => f.write_str("column"),
            IndexKind::Index => f.write_str("index"),
        }
    }
}

/// What was empty when an [`OrbisError::NoData`] is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoDataKind {
    /// A matrix array without any row.
    Rows,
    /// A matrix array whose rows have no entry.
    Columns,
    /// An empty selection of row indices.
    SelectedRows,
    /// An empty selection of column indices.
    SelectedColumns,
}

impl fmt::Display for NoDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoDataKind::Rows => f.write_str("matrix must have at least one row"),
            NoDataKind::Columns => f.write_str("matrix must have at least one column"),
            NoDataKind::SelectedRows => f.write_str("empty selected row index array"),
            NoDataKind::SelectedColumns => f.write_str("empty selected column index array"),
        }
    }
}

/// Unified error type for Orbis.
#[derive(Debug, Error)]
pub enum OrbisError {
    /// A requested matrix dimension is zero.
    #[error("invalid dimension: {dimension} (must be positive)")]
    InvalidDimension {
        /// The rejected dimension.
        dimension: usize,
    },

    /// A value required to be strictly positive is not.
    #[error("{value} is smaller than, or equal to, the minimum (0)")]
    NotStrictlyPositive {
        /// The rejected value.
        value: f64,
    },

    /// A required argument is absent.
    #[error("null is not allowed: {0}")]
    NullArgument(&'static str),

    /// An array has no rows, no columns, or an index selection is empty.
    #[error("{0}")]
    NoData(NoDataKind),

    /// Two sizes that must agree do not.
    #[error("dimensions mismatch: {actual} != {expected}")]
    DimensionMismatch {
        /// The size that was supplied.
        actual: usize,
        /// The size that was required.
        expected: usize,
    },

    /// Two matrix shapes that must agree do not.
    #[error(
        "got {}x{} but expected {}x{}",
        actual.0,
        actual.1,
        expected.0,
        expected.1
    )]
    MatrixDimensionMismatch {
        /// Shape (rows, columns) that was supplied.
        actual: (usize, usize),
        /// Shape (rows, columns) that was required.
        expected: (usize, usize),
    },

    /// The operation requires a square matrix.
    #[error("non square ({rows}x{cols}) matrix")]
    NonSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// An index lies outside its allowed range.
    #[error("{kind} index {index} out of allowed range [{min}, {max}]")]
    OutOfRange {
        /// Kind of index.
        kind: IndexKind,
        /// The rejected index.
        index: usize,
        /// Smallest allowed value.
        min: usize,
        /// Largest allowed value.
        max: usize,
    },

    /// A range has its end before its start.
    #[error("initial {kind} {start} after final {kind} {end}")]
    InvalidRange {
        /// Kind of index.
        kind: IndexKind,
        /// First index of the range.
        start: usize,
        /// Last index of the range.
        end: usize,
    },

    /// A value required to be non-negative is negative.
    #[error("{value} is smaller than the minimum (0)")]
    NotPositive {
        /// The rejected value.
        value: f64,
    },

    /// The matrix cannot be inverted.
    #[error("matrix is singular")]
    SingularMatrix,

    /// A matrix expected to be symmetric is not.
    #[error("non symmetric matrix: entries ({row},{col}) and ({col},{row}) differ by more than the tolerance")]
    NonSymmetric {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },

    /// A matrix expected to be positive semi-definite is not.
    #[error("matrix is not positive semi-definite (smallest eigenvalue: {eigenvalue:.3e})")]
    NotPositiveSemiDefinite {
        /// The most negative eigenvalue found.
        eigenvalue: f64,
    },

    /// The operation would break the factorization invariant.
    #[error("unsupported operation")]
    UnsupportedOperation,

    /// A numerical decomposition failed for a reason other than singularity.
    #[error("decomposition failed: {0}")]
    DecompositionFailure(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, OrbisError>`.
pub type OrbisResult<T> = Result<T, OrbisError>;
