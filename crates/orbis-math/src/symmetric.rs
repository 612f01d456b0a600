//! Symmetric and symmetric positive semi-definite collaborators.
//!
//! Both store full dense entries, copied from the lower triangle so that
//! `M[i,j] == M[j,i]` holds exactly whatever the input rounding was.

use serde::{Deserialize, Serialize};

use orbis_types::constants::{
    DEFAULT_ABSOLUTE_SYMMETRY_THRESHOLD, DEFAULT_POSITIVITY_THRESHOLD, DEFAULT_RELATIVE_SYMMETRY_THRESHOLD,
};
use orbis_types::{OrbisError, OrbisResult};

use crate::checks;
use crate::decomposed::DecomposedSpdMatrix;
use crate::dense::DenseMatrix;
use crate::faer_bridge::symmetric_eigen;
use crate::matrix::{Matrix, MatrixKind, MatrixRef};
use crate::precision::equals_with_tolerances;

/// Symmetric matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DenseMatrix", into = "DenseMatrix")]
pub struct SymmetricMatrix {
    dense: DenseMatrix,
}

impl SymmetricMatrix {
    /// Validates symmetry with the default tolerances.
    pub fn from_dense(dense: DenseMatrix) -> OrbisResult<Self> {
        Self::from_dense_with_tolerances(
            dense,
            DEFAULT_RELATIVE_SYMMETRY_THRESHOLD,
            DEFAULT_ABSOLUTE_SYMMETRY_THRESHOLD,
        )
    }

    /// Validates symmetry with explicit tolerances, then keeps the lower
    /// triangle.
    ///
    /// # Errors
    /// `NonSquare` or `NonSymmetric`.
    pub fn from_dense_with_tolerances(dense: DenseMatrix, relative: f64, absolute: f64) -> OrbisResult<Self> {
        checks::check_square(&dense)?;
        let n = dense.row_dimension();
        for i in 0..n {
            for j in (i + 1)..n {
                if !equals_with_tolerances(dense.at(i, j), dense.at(j, i), relative, absolute) {
                    return Err(OrbisError::NonSymmetric { row: i, col: j });
                }
            }
        }
        Ok(Self::from_lower_triangle(dense))
    }

    /// Builds from rows, validating symmetry with the default tolerances.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> OrbisResult<Self> {
        Self::from_dense(DenseMatrix::from_rows(rows)?)
    }

    /// Mirrors the lower triangle onto the upper one; callers guarantee a
    /// square matrix.
    pub(crate) fn from_lower_triangle(mut dense: DenseMatrix) -> Self {
        let n = dense.row_dimension();
        for i in 0..n {
            for j in (i + 1)..n {
                let lower = dense.at(j, i);
                *dense.at_mut(i, j) = lower;
            }
        }
        Self { dense }
    }

    /// Dense entries.
    pub fn as_dense(&self) -> &DenseMatrix {
        &self.dense
    }

    /// Returns the entry at `(row, col)`.
    pub fn get_entry(&self, row: usize, col: usize) -> OrbisResult<f64> {
        self.dense.get_entry(row, col)
    }
}

impl Matrix for SymmetricMatrix {
    fn row_dimension(&self) -> usize {
        self.dense.row_dimension()
    }

    fn column_dimension(&self) -> usize {
        self.dense.column_dimension()
    }

    fn entry_at(&self, row: usize, col: usize) -> f64 {
        self.dense.at(row, col)
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::Symmetric
    }

    fn view(&self) -> MatrixRef<'_> {
        MatrixRef::Symmetric(self)
    }

    fn to_dense(&self) -> DenseMatrix {
        self.dense.clone()
    }
}

impl TryFrom<DenseMatrix> for SymmetricMatrix {
    type Error = OrbisError;

    fn try_from(dense: DenseMatrix) -> OrbisResult<Self> {
        Self::from_dense(dense)
    }
}

impl From<SymmetricMatrix> for DenseMatrix {
    fn from(m: SymmetricMatrix) -> Self {
        m.dense
    }
}

/// Symmetric positive semi-definite matrix, validated at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DenseMatrix", into = "DenseMatrix")]
pub struct SymmetricPositiveMatrix {
    inner: SymmetricMatrix,
}

impl SymmetricPositiveMatrix {
    /// Validates symmetry and positive semi-definiteness.
    ///
    /// # Errors
    /// `NonSquare`, `NonSymmetric`, or `NotPositiveSemiDefinite` when an
    /// eigenvalue is below `-DEFAULT_POSITIVITY_THRESHOLD · max(1, |λ|max)`.
    pub fn from_dense(dense: DenseMatrix) -> OrbisResult<Self> {
        Self::from_symmetric(SymmetricMatrix::from_dense(dense)?)
    }

    /// Validates positive semi-definiteness of a symmetric matrix.
    pub fn from_symmetric(symmetric: SymmetricMatrix) -> OrbisResult<Self> {
        let eigen = symmetric_eigen(symmetric.as_dense())?;
        let scale = eigen.values.iter().fold(1.0f64, |acc, v| acc.max(v.abs()));
        let smallest = eigen.values.iter().copied().fold(f64::INFINITY, f64::min);
        if smallest < -DEFAULT_POSITIVITY_THRESHOLD * scale {
            return Err(OrbisError::NotPositiveSemiDefinite { eigenvalue: smallest });
        }
        Ok(Self { inner: symmetric })
    }

    /// Builds from rows, validating symmetry and positivity.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> OrbisResult<Self> {
        Self::from_dense(DenseMatrix::from_rows(rows)?)
    }

    /// Wraps a symmetric matrix already known to be positive semi-definite.
    pub(crate) fn from_symmetric_unchecked(inner: SymmetricMatrix) -> Self {
        Self { inner }
    }

    /// Symmetric view.
    pub fn as_symmetric(&self) -> &SymmetricMatrix {
        &self.inner
    }

    /// Dense entries.
    pub fn as_dense(&self) -> &DenseMatrix {
        self.inner.as_dense()
    }

    /// Returns the entry at `(row, col)`.
    pub fn get_entry(&self, row: usize, col: usize) -> OrbisResult<f64> {
        self.inner.get_entry(row, col)
    }

    /// Factored form of this matrix.
    pub fn to_decomposed(&self) -> OrbisResult<DecomposedSpdMatrix> {
        DecomposedSpdMatrix::from_symmetric_positive(self)
    }
}

impl Matrix for SymmetricPositiveMatrix {
    fn row_dimension(&self) -> usize {
        self.inner.row_dimension()
    }

    fn column_dimension(&self) -> usize {
        self.inner.column_dimension()
    }

    fn entry_at(&self, row: usize, col: usize) -> f64 {
        self.inner.entry_at(row, col)
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::SymmetricPositive
    }

    fn view(&self) -> MatrixRef<'_> {
        MatrixRef::SymmetricPositive(self)
    }

    fn to_dense(&self) -> DenseMatrix {
        self.inner.to_dense()
    }
}

impl TryFrom<DenseMatrix> for SymmetricPositiveMatrix {
    type Error = OrbisError;

    fn try_from(dense: DenseMatrix) -> OrbisResult<Self> {
        Self::from_dense(dense)
    }
}

impl From<SymmetricPositiveMatrix> for DenseMatrix {
    fn from(m: SymmetricPositiveMatrix) -> Self {
        m.inner.dense
    }
}
