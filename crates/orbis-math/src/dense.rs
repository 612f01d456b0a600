//! Plain dense matrix.
//!
//! Row-major storage: `data[i * cols + j]` holds `A[i, j]`. This is the
//! general-purpose collaborator every structured matrix can be
//! materialized into; it is the only type that accepts entry mutation.

use serde::{Deserialize, Serialize};

use orbis_types::{NoDataKind, OrbisError, OrbisResult};

use crate::checks;
use crate::matrix::{Matrix, MatrixKind, MatrixRef};
use crate::visitor::{for_each_position, MatrixVisitorMut, WalkBounds, WalkOrder};

/// A dense real matrix with at least one row and one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Creates a zero matrix.
    ///
    /// # Errors
    /// `InvalidDimension` if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> OrbisResult<Self> {
        checks::check_dimension(rows)?;
        checks::check_dimension(cols)?;
        Ok(Self::zeros(rows, cols))
    }

    /// Zero matrix; callers guarantee non-zero dimensions.
    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix entry by entry; callers guarantee non-zero dimensions.
    pub(crate) fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Creates a matrix from row slices (copied).
    ///
    /// # Errors
    /// - `NoData` if there is no row or the first row is empty
    /// - `DimensionMismatch` if a row length differs from the first one
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> OrbisResult<Self> {
        let first = rows.first().ok_or(OrbisError::NoData(NoDataKind::Rows))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(OrbisError::NoData(NoDataKind::Columns));
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(OrbisError::DimensionMismatch {
                    actual: row.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    /// `InvalidDimension` for zero dimensions, `DimensionMismatch` if
    /// `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> OrbisResult<Self> {
        checks::check_dimension(rows)?;
        checks::check_dimension(cols)?;
        checks::check_vector_length(data.len(), rows * cols)?;
        Ok(Self { rows, cols, data })
    }

    /// Creates the `n × n` identity.
    pub fn identity(n: usize) -> OrbisResult<Self> {
        checks::check_dimension(n)?;
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Creates a square diagonal matrix.
    pub fn from_diagonal(diagonal: &[f64]) -> OrbisResult<Self> {
        if diagonal.is_empty() {
            return Err(OrbisError::NoData(NoDataKind::Rows));
        }
        let n = diagonal.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diagonal.iter().enumerate() {
            m.data[i * n + i] = d;
        }
        Ok(m)
    }

    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }

    /// Returns a slice of the specified row.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns the row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns a copy of the entries as rows.
    pub fn data(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Returns the entry at `(row, col)`.
    pub fn get_entry(&self, row: usize, col: usize) -> OrbisResult<f64> {
        checks::check_entry_index(self, row, col)?;
        Ok(self.at(row, col))
    }

    /// Sets the entry at `(row, col)`.
    pub fn set_entry(&mut self, row: usize, col: usize, value: f64) -> OrbisResult<()> {
        checks::check_entry_index(self, row, col)?;
        *self.at_mut(row, col) = value;
        Ok(())
    }

    /// Adds `increment` to the entry at `(row, col)`.
    pub fn add_to_entry(&mut self, row: usize, col: usize, increment: f64) -> OrbisResult<()> {
        checks::check_entry_index(self, row, col)?;
        *self.at_mut(row, col) += increment;
        Ok(())
    }

    /// Multiplies the entry at `(row, col)` by `factor`.
    pub fn multiply_entry(&mut self, row: usize, col: usize, factor: f64) -> OrbisResult<()> {
        checks::check_entry_index(self, row, col)?;
        *self.at_mut(row, col) *= factor;
        Ok(())
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.at(j, i))
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &DenseMatrix) -> OrbisResult<Self> {
        checks::check_add_compatible(self, other)?;
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect();
        Ok(Self { data, ..*self })
    }

    /// Entry-wise difference.
    pub fn subtract(&self, other: &DenseMatrix) -> OrbisResult<Self> {
        checks::check_add_compatible(self, other)?;
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a - b).collect();
        Ok(Self { data, ..*self })
    }

    /// Matrix product `self × other`.
    ///
    /// Kept in plain row-major loops with the same summation order as
    /// `transpose_multiply`, so a factor product and its dense form agree
    /// bit for bit. Decompositions go through faer.
    pub fn multiply(&self, other: &DenseMatrix) -> OrbisResult<Self> {
        checks::check_multiply_compatible(self, other)?;
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
            for (k, &a) in self.row_slice(i).iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out_row.iter_mut().zip(other.row_slice(k)) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    /// Product `selfᵗ × other`, without forming the transpose.
    pub(crate) fn transpose_multiply(&self, other: &DenseMatrix) -> Self {
        debug_assert_eq!(self.rows, other.rows);
        let mut out = Self::zeros(self.cols, other.cols);
        for k in 0..self.rows {
            let left = self.row_slice(k);
            let right = other.row_slice(k);
            for (i, &a) in left.iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in out_row.iter_mut().zip(right) {
                    *o += a * b;
                }
            }
        }
        out
    }

    /// Adds `scalar` to every entry.
    pub fn scalar_add(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|v| v + scalar).collect(),
            ..*self
        }
    }

    /// Multiplies every entry by `scalar`.
    pub fn scalar_multiply(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|v| v * scalar).collect(),
            ..*self
        }
    }

    /// Matrix-vector product `self × v`.
    pub fn operate(&self, v: &[f64]) -> OrbisResult<Vec<f64>> {
        checks::check_vector_length(v.len(), self.cols)?;
        Ok((0..self.rows)
            .map(|i| self.row_slice(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Vector-matrix product `vᵗ × self`.
    pub fn pre_multiply_vector(&self, v: &[f64]) -> OrbisResult<Vec<f64>> {
        checks::check_vector_length(v.len(), self.rows)?;
        let mut out = vec![0.0; self.cols];
        for (i, &vi) in v.iter().enumerate() {
            for (o, &a) in out.iter_mut().zip(self.row_slice(i)) {
                *o += vi * a;
            }
        }
        Ok(out)
    }

    /// Raises a square matrix to a non-negative integer power.
    pub fn power(&self, exponent: u32) -> OrbisResult<Self> {
        checks::check_square(self)?;
        let mut result = Self::identity(self.rows)?;
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.multiply(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.multiply(&base)?;
            }
        }
        Ok(result)
    }

    /// Copies rows `rows` of `self` (in order) into a new matrix.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Self {
        Self::from_fn(rows.len(), self.cols, |i, j| self.at(rows[i], j))
    }

    /// Copies columns `cols` of `self` (in order) into a new matrix.
    pub(crate) fn select_columns(&self, cols: &[usize]) -> Self {
        Self::from_fn(self.rows, cols.len(), |i, j| self.at(i, cols[j]))
    }

    /// Stacks `self` on top of `other`; callers guarantee equal column counts.
    pub(crate) fn stack(&self, other: &DenseMatrix) -> Self {
        debug_assert_eq!(self.cols, other.cols);
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Self {
            rows: self.rows + other.rows,
            cols: self.cols,
            data,
        }
    }

    /// Walks every entry with a changing visitor.
    pub fn walk_mut(&mut self, order: WalkOrder, visitor: &mut dyn MatrixVisitorMut) -> f64 {
        let bounds = WalkBounds::full(self.rows, self.cols);
        self.walk_bounds_mut(order, visitor, bounds)
    }

    /// Walks an inclusive sub-range with a changing visitor.
    pub fn walk_range_mut(
        &mut self,
        order: WalkOrder,
        visitor: &mut dyn MatrixVisitorMut,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> OrbisResult<f64> {
        checks::check_sub_matrix_range(self, start_row, end_row, start_col, end_col)?;
        let bounds = WalkBounds {
            start_row,
            end_row,
            start_col,
            end_col,
        };
        Ok(self.walk_bounds_mut(order, visitor, bounds))
    }

    fn walk_bounds_mut(&mut self, order: WalkOrder, visitor: &mut dyn MatrixVisitorMut, bounds: WalkBounds) -> f64 {
        visitor.start(
            self.rows,
            self.cols,
            bounds.start_row,
            bounds.end_row,
            bounds.start_col,
            bounds.end_col,
        );
        for_each_position(order, bounds, |i, j| {
            let value = visitor.visit(i, j, self.at(i, j));
            *self.at_mut(i, j) = value;
        });
        visitor.end()
    }
}

impl Matrix for DenseMatrix {
    fn row_dimension(&self) -> usize {
        self.rows
    }

    fn column_dimension(&self) -> usize {
        self.cols
    }

    fn entry_at(&self, row: usize, col: usize) -> f64 {
        self.at(row, col)
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::Dense
    }

    fn view(&self) -> MatrixRef<'_> {
        MatrixRef::Dense(self)
    }

    fn to_dense(&self) -> DenseMatrix {
        self.clone()
    }
}

impl TryFrom<Vec<Vec<f64>>> for DenseMatrix {
    type Error = OrbisError;

    fn try_from(rows: Vec<Vec<f64>>) -> OrbisResult<Self> {
        Self::from_rows(&rows)
    }
}

impl From<DenseMatrix> for Vec<Vec<f64>> {
    fn from(m: DenseMatrix) -> Self {
        m.data()
    }
}
