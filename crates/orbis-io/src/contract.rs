//! Persisted matrix contract types.
//!
//! These types define what a decomposed matrix looks like outside the
//! process. They are serializable for files and for other tools.

use serde::{Deserialize, Serialize};

use orbis_math::{DecomposedSpdMatrix, Matrix};
use orbis_types::constants::FORMAT_VERSION;
use orbis_types::OrbisResult;

use crate::validator::validate_persisted;

/// Versioned envelope around the factor of a decomposed matrix.
///
/// Only the factor transpose is stored: the dense matrix is derived from it
/// on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMatrix {
    /// Layout version of this envelope.
    pub format_version: u32,

    /// Row and column dimension `n` of the matrix.
    pub dimension: usize,

    /// Rows of `Bᵗ` (`transparent_dimension × n`).
    /// `None` when the producer had no factor to write.
    pub factor_transpose: Option<Vec<Vec<f64>>>,
}

impl PersistedMatrix {
    /// Captures the factor of `matrix` at the current format version.
    pub fn from_matrix(matrix: &DecomposedSpdMatrix) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            dimension: matrix.dimension(),
            factor_transpose: Some(matrix.bt().data()),
        }
    }

    /// Validates the envelope and rebuilds the matrix.
    ///
    /// # Errors
    /// Whatever [`validate_persisted`] reports.
    pub fn into_matrix(self) -> OrbisResult<DecomposedSpdMatrix> {
        validate_persisted(&self)?;
        let rows = self.factor_transpose.unwrap_or_default();
        DecomposedSpdMatrix::from_factor_rows(&rows)
    }
}

/// Human-facing digest of a decomposed matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSummary {
    pub dimension: usize,
    pub transparent_dimension: usize,
    pub trace: f64,
    /// Maximum absolute column sum.
    pub norm: f64,
    pub frobenius_norm: f64,
    pub min: f64,
    pub max: f64,
    pub is_diagonal: bool,
}

impl MatrixSummary {
    /// Computes the summary of `matrix`.
    pub fn from_matrix(matrix: &DecomposedSpdMatrix) -> Self {
        Self {
            dimension: matrix.row_dimension(),
            transparent_dimension: matrix.transparent_dimension(),
            trace: matrix.trace(),
            norm: matrix.norm(),
            frobenius_norm: matrix.frobenius_norm(),
            min: matrix.min(),
            max: matrix.max(),
            is_diagonal: matrix.is_diagonal(0.0),
        }
    }
}
