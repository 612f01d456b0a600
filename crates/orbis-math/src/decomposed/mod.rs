//! Decomposed symmetric positive semi-definite matrix.
//!
//! [`DecomposedSpdMatrix`] stores the factor transpose `Bᵗ`
//! (`transparent_dimension × n`) and represents `M = (Bᵗ)ᵗ·Bᵗ`, so that
//!
//! ```text
//! M[i, j] = Σ_k Bᵗ[k, i] · Bᵗ[k, j]
//! ```
//!
//! Symmetry and positive semi-definiteness follow from the factored form and
//! are never validated. Entry mutation is rejected since it could not keep
//! the factorization. The dense form of `M` is computed at most once per
//! factor and cached.
//!
//! The operation surface is split by concern:
//! - [`arithmetic`]: sums, scalar operations, products, powers, inverse
//! - [`access`]: rows, columns, sub-matrices, concatenation, visitors
//! - [`queries`]: norms, extrema and structural predicates

mod access;
mod arithmetic;
mod queries;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use orbis_types::{NoDataKind, OrbisError, OrbisResult};

use crate::checks;
use crate::decomposition::eigen_factor_transpose;
use crate::dense::DenseMatrix;
use crate::faer_bridge::upper_triangular_factor;
use crate::matrix::{Matrix, MatrixKind, MatrixRef};
use crate::symmetric::SymmetricPositiveMatrix;

/// Symmetric positive semi-definite matrix held as `M = (Bᵗ)ᵗ·Bᵗ`.
///
/// The persisted form is the factor transpose alone; the dense cache is
/// rebuilt on demand after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomposedSpdMatrix {
    factor_transpose: DenseMatrix,
    #[serde(skip)]
    dense: OnceLock<DenseMatrix>,
}

impl DecomposedSpdMatrix {
    /// Zero matrix of dimension `n` (factor `n × n` of zeros).
    ///
    /// # Errors
    /// `InvalidDimension` if `n == 0`.
    pub fn new(n: usize) -> OrbisResult<Self> {
        checks::check_dimension(n)?;
        Ok(Self::from_factor(DenseMatrix::zeros(n, n)))
    }

    /// Builds from the rows of `Bᵗ` (copied).
    ///
    /// # Errors
    /// - `NoData` if there are no rows or the rows are empty
    /// - `DimensionMismatch` if the rows are ragged
    pub fn from_factor_rows<R: AsRef<[f64]>>(rows: &[R]) -> OrbisResult<Self> {
        Ok(Self::from_factor(DenseMatrix::from_rows(rows)?))
    }

    /// Takes ownership of `Bᵗ`.
    pub fn from_factor(factor_transpose: DenseMatrix) -> Self {
        Self {
            factor_transpose,
            dense: OnceLock::new(),
        }
    }

    /// Builds from a borrowed `Bᵗ` (copied).
    pub fn from_factor_ref(factor_transpose: &DenseMatrix) -> Self {
        Self::from_factor(factor_transpose.clone())
    }

    /// Factors a validated symmetric positive semi-definite matrix as
    /// `Bᵗ = diag(√λ)·Uᵗ`.
    pub fn from_symmetric_positive(matrix: &SymmetricPositiveMatrix) -> OrbisResult<Self> {
        Ok(Self::from_factor(eigen_factor_transpose(matrix.as_dense())?))
    }

    /// Identity of dimension `n`, with the identity as factor.
    ///
    /// # Errors
    /// `NotStrictlyPositive` if `n == 0`.
    pub fn create_identity_matrix(n: usize) -> OrbisResult<Self> {
        if n == 0 {
            return Err(OrbisError::NotStrictlyPositive { value: 0.0 });
        }
        Ok(Self::from_factor(DenseMatrix::identity(n)?))
    }

    /// Zero matrix of the same kind.
    ///
    /// # Errors
    /// `InvalidDimension` for a zero dimension, `DimensionMismatch` if the
    /// requested shape is not square.
    pub fn create_matrix(&self, rows: usize, cols: usize) -> OrbisResult<Self> {
        checks::check_dimension(rows)?;
        checks::check_dimension(cols)?;
        if rows != cols {
            return Err(OrbisError::DimensionMismatch {
                actual: cols,
                expected: rows,
            });
        }
        Self::new(rows)
    }

    /// Deep copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // ─── Factor ──────────────────────────────────────────────────

    /// Row and column dimension `n` of `M`.
    pub fn dimension(&self) -> usize {
        self.factor_transpose.column_dimension()
    }

    /// Number of rows of `Bᵗ`.
    pub fn transparent_dimension(&self) -> usize {
        self.factor_transpose.row_dimension()
    }

    /// The factor transpose `Bᵗ`.
    pub fn bt(&self) -> &DenseMatrix {
        &self.factor_transpose
    }

    /// The factor `B`.
    pub fn b(&self) -> DenseMatrix {
        self.factor_transpose.transpose()
    }

    /// Compacts the factor in place.
    ///
    /// When `transparent_dimension > n`, `Bᵗ` is replaced by the `n × n`
    /// upper triangular `R` of its QR decomposition (`Bᵗ = Q·R`, hence
    /// `M = Rᵗ·R`). Otherwise the factor is left as is, which makes the
    /// operation idempotent.
    pub fn resize_b(&mut self) {
        if self.transparent_dimension() > self.dimension() {
            let before = self.transparent_dimension();
            self.factor_transpose = upper_triangular_factor(&self.factor_transpose);
            self.dense = OnceLock::new();
            tracing::trace!(before, after = self.transparent_dimension(), "resized factor");
        }
    }

    /// The factor transpose `resize_b` would produce, without changing `self`.
    pub fn resized_bt(&self) -> DenseMatrix {
        if self.transparent_dimension() > self.dimension() {
            upper_triangular_factor(&self.factor_transpose)
        } else {
            self.factor_transpose.clone()
        }
    }

    /// Transpose of [`resized_bt`](Self::resized_bt).
    pub fn resized_b(&self) -> DenseMatrix {
        self.resized_bt().transpose()
    }

    // ─── Entries ─────────────────────────────────────────────────

    /// Dense form of `M`, computed on first use.
    pub(crate) fn dense(&self) -> &DenseMatrix {
        self.dense
            .get_or_init(|| self.factor_transpose.transpose_multiply(&self.factor_transpose))
    }

    fn entry_from_factor(&self, row: usize, col: usize) -> f64 {
        let bt = &self.factor_transpose;
        (0..bt.row_dimension()).map(|k| bt.at(k, row) * bt.at(k, col)).sum()
    }

    /// Returns `M[row, col]`.
    pub fn get_entry(&self, row: usize, col: usize) -> OrbisResult<f64> {
        checks::check_entry_index(self, row, col)?;
        Ok(self.entry_at(row, col))
    }

    /// Entries of `M` as rows.
    pub fn data(&self) -> Vec<Vec<f64>> {
        self.dense().data()
    }

    // ─── Rejected mutations ──────────────────────────────────────

    /// Always fails: a single entry cannot be changed without breaking the
    /// factorization. Indices are validated first.
    pub fn set_entry(&mut self, row: usize, col: usize, _value: f64) -> OrbisResult<()> {
        checks::check_entry_index(&*self, row, col)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry).
    pub fn add_to_entry(&mut self, row: usize, col: usize, _increment: f64) -> OrbisResult<()> {
        checks::check_entry_index(&*self, row, col)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry).
    pub fn multiply_entry(&mut self, row: usize, col: usize, _factor: f64) -> OrbisResult<()> {
        checks::check_entry_index(&*self, row, col)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry).
    pub fn set_row(&mut self, row: usize, _values: &[f64]) -> OrbisResult<()> {
        checks::check_row_index(&*self, row)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry).
    pub fn set_column(&mut self, col: usize, _values: &[f64]) -> OrbisResult<()> {
        checks::check_column_index(&*self, col)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry).
    pub fn set_row_matrix(&mut self, row: usize, _values: &DenseMatrix) -> OrbisResult<()> {
        checks::check_row_index(&*self, row)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry).
    pub fn set_column_matrix(&mut self, col: usize, _values: &DenseMatrix) -> OrbisResult<()> {
        checks::check_column_index(&*self, col)?;
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails; see [`set_entry`](Self::set_entry). The block must be
    /// non-empty and its top-left corner must lie inside the matrix.
    pub fn set_sub_matrix(&mut self, block: &[Vec<f64>], row: usize, col: usize) -> OrbisResult<()> {
        let first = block.first().ok_or(OrbisError::NoData(NoDataKind::Rows))?;
        if first.is_empty() {
            return Err(OrbisError::NoData(NoDataKind::Columns));
        }
        checks::check_entry_index(&*self, row, col)?;
        Err(OrbisError::UnsupportedOperation)
    }
}

impl Matrix for DecomposedSpdMatrix {
    fn row_dimension(&self) -> usize {
        self.dimension()
    }

    fn column_dimension(&self) -> usize {
        self.dimension()
    }

    fn entry_at(&self, row: usize, col: usize) -> f64 {
        match self.dense.get() {
            Some(dense) => dense.at(row, col),
            None => self.entry_from_factor(row, col),
        }
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::DecomposedSymmetricPositive
    }

    fn view(&self) -> MatrixRef<'_> {
        MatrixRef::Decomposed(self)
    }

    fn to_dense(&self) -> DenseMatrix {
        self.dense().clone()
    }
}
