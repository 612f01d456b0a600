//! Rows, columns, sub-matrices, concatenation and traversal.
//!
//! Reads go through the cached dense form. Principal sub-matrices (same
//! row and column selection) stay decomposed: selecting columns of `Bᵗ`
//! reproduces `M[idx_i, idx_j] = Σ_k Bᵗ[k, idx_i]·Bᵗ[k, idx_j]` exactly,
//! with every transparent row kept.

use orbis_types::{IndexKind, NoDataKind, OrbisError, OrbisResult};

use crate::checks;
use crate::dense::DenseMatrix;
use crate::matrix::{AnyMatrix, Matrix};
use crate::ops;
use crate::visitor::{MatrixVisitor, MatrixVisitorMut, WalkOrder};

use super::DecomposedSpdMatrix;

impl DecomposedSpdMatrix {
    /// Entries of row `row`.
    pub fn row(&self, row: usize) -> OrbisResult<Vec<f64>> {
        ops::row(self.dense(), row)
    }

    /// Row `row` as a `1 × n` matrix.
    pub fn row_matrix(&self, row: usize) -> OrbisResult<DenseMatrix> {
        ops::row_matrix(self.dense(), row)
    }

    /// Entries of column `col`.
    pub fn column(&self, col: usize) -> OrbisResult<Vec<f64>> {
        ops::column(self.dense(), col)
    }

    /// Column `col` as an `n × 1` matrix.
    pub fn column_matrix(&self, col: usize) -> OrbisResult<DenseMatrix> {
        ops::column_matrix(self.dense(), col)
    }

    /// Sub-matrix over inclusive ranges. Identical row and column ranges
    /// give a decomposed principal sub-matrix, anything else a dense one.
    pub fn sub_matrix(
        &self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> OrbisResult<AnyMatrix> {
        checks::check_sub_matrix_range(self, start_row, end_row, start_col, end_col)?;
        if start_row == start_col && end_row == end_col {
            return self.symmetric_sub_matrix_range(start_row, end_row).map(AnyMatrix::Decomposed);
        }
        ops::sub_matrix(self.dense(), start_row, end_row, start_col, end_col).map(AnyMatrix::Dense)
    }

    /// Sub-matrix over explicit selections. Identical selections give a
    /// decomposed principal sub-matrix, anything else a dense one.
    pub fn sub_matrix_indices(&self, rows: &[usize], cols: &[usize]) -> OrbisResult<AnyMatrix> {
        checks::check_sub_matrix_indices(self, rows, cols)?;
        if rows == cols {
            return self.symmetric_sub_matrix(rows).map(AnyMatrix::Decomposed);
        }
        ops::sub_matrix_indices(self.dense(), rows, cols).map(AnyMatrix::Dense)
    }

    /// Principal sub-matrix `M[indices, indices]`.
    ///
    /// The transparent dimension is unchanged; call
    /// [`resize_b`](Self::resize_b) on the result to compact it.
    ///
    /// # Errors
    /// `NoData` for an empty selection, `OutOfRange` for a bad index.
    pub fn symmetric_sub_matrix(&self, indices: &[usize]) -> OrbisResult<Self> {
        if indices.is_empty() {
            return Err(OrbisError::NoData(NoDataKind::SelectedRows));
        }
        for &index in indices {
            checks::check_index(IndexKind::Index, index, self.dimension())?;
        }
        Ok(Self::from_factor(self.factor_transpose.select_columns(indices)))
    }

    /// Principal sub-matrix over the inclusive range `[start, end]`.
    pub fn symmetric_sub_matrix_range(&self, start: usize, end: usize) -> OrbisResult<Self> {
        checks::check_range(IndexKind::Index, start, end, self.dimension())?;
        let indices: Vec<usize> = (start..=end).collect();
        Ok(Self::from_factor(self.factor_transpose.select_columns(&indices)))
    }

    /// Copies the selected entries into the top-left corner of `dest`.
    pub fn copy_sub_matrix(&self, rows: &[usize], cols: &[usize], dest: &mut [Vec<f64>]) -> OrbisResult<()> {
        self.copy_sub_matrix_at(rows, cols, dest, 0, 0)
    }

    /// Copies the selected entries into `dest` at `(dest_row, dest_col)`.
    pub fn copy_sub_matrix_at(
        &self,
        rows: &[usize],
        cols: &[usize],
        dest: &mut [Vec<f64>],
        dest_row: usize,
        dest_col: usize,
    ) -> OrbisResult<()> {
        ops::copy_sub_matrix_indices(self.dense(), rows, cols, dest, dest_row, dest_col)
    }

    /// Copies an inclusive range into the top-left corner of `dest`.
    pub fn copy_sub_matrix_range(
        &self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
        dest: &mut [Vec<f64>],
    ) -> OrbisResult<()> {
        self.copy_sub_matrix_range_at(start_row, end_row, start_col, end_col, dest, 0, 0)
    }

    /// Copies an inclusive range into `dest` at `(dest_row, dest_col)`.
    #[allow(clippy::too_many_arguments)]
    pub fn copy_sub_matrix_range_at(
        &self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
        dest: &mut [Vec<f64>],
        dest_row: usize,
        dest_col: usize,
    ) -> OrbisResult<()> {
        ops::copy_sub_matrix_range(
            self.dense(),
            start_row,
            end_row,
            start_col,
            end_col,
            dest,
            dest_row,
            dest_col,
        )
    }

    // ─── Concatenation ───────────────────────────────────────────

    /// `[self | other]` when `right`, `[other | self]` otherwise.
    pub fn concatenate_horizontally(&self, other: &dyn Matrix, right: bool) -> OrbisResult<DenseMatrix> {
        ops::concatenate_horizontally(self.dense(), other, right)
    }

    /// `[self; other]` when `bottom`, `[other; self]` otherwise.
    pub fn concatenate_vertically(&self, other: &dyn Matrix, bottom: bool) -> OrbisResult<DenseMatrix> {
        ops::concatenate_vertically(self.dense(), other, bottom)
    }

    /// Block diagonal assembly with `other` in the lower right corner when
    /// `lower_right`, in the upper left one otherwise.
    pub fn concatenate_diagonally(&self, other: &dyn Matrix, lower_right: bool) -> DenseMatrix {
        ops::concatenate_diagonally(self.dense(), other, lower_right)
    }

    // ─── Traversal ───────────────────────────────────────────────

    /// Visits every entry in `order` and returns the visitor's result.
    pub fn walk(&self, order: WalkOrder, visitor: &mut dyn MatrixVisitor) -> f64 {
        ops::walk(self.dense(), order, visitor)
    }

    /// Visits the entries of an inclusive block in `order`.
    pub fn walk_range(
        &self,
        order: WalkOrder,
        visitor: &mut dyn MatrixVisitor,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> OrbisResult<f64> {
        ops::walk_range(self.dense(), order, visitor, start_row, end_row, start_col, end_col)
    }

    /// Always fails: visited entries cannot be replaced.
    pub fn walk_mut(&mut self, _order: WalkOrder, _visitor: &mut dyn MatrixVisitorMut) -> OrbisResult<f64> {
        Err(OrbisError::UnsupportedOperation)
    }

    /// Always fails once the range is validated.
    pub fn walk_range_mut(
        &mut self,
        _order: WalkOrder,
        _visitor: &mut dyn MatrixVisitorMut,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> OrbisResult<f64> {
        checks::check_sub_matrix_range(&*self, start_row, end_row, start_col, end_col)?;
        Err(OrbisError::UnsupportedOperation)
    }
}
