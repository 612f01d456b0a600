//! Argument validation shared by every matrix type.
//!
//! All checks run before any computation so that failing calls leave
//! no partial state behind.

use orbis_types::{IndexKind, NoDataKind, OrbisError, OrbisResult};

use crate::matrix::Matrix;

/// Checks that `row` is a valid row index of `m`.
pub fn check_row_index(m: &dyn Matrix, row: usize) -> OrbisResult<()> {
    check_index(IndexKind::Row, row, m.row_dimension())
}

/// Checks that `col` is a valid column index of `m`.
pub fn check_column_index(m: &dyn Matrix, col: usize) -> OrbisResult<()> {
    check_index(IndexKind::Column, col, m.column_dimension())
}

/// Checks that `(row, col)` addresses an entry of `m`.
pub fn check_entry_index(m: &dyn Matrix, row: usize, col: usize) -> OrbisResult<()> {
    check_row_index(m, row)?;
    check_column_index(m, col)
}

/// Checks `index < len`.
pub fn check_index(kind: IndexKind, index: usize, len: usize) -> OrbisResult<()> {
    if index >= len {
        return Err(OrbisError::OutOfRange {
            kind,
            index,
            min: 0,
            max: len.saturating_sub(1),
        });
    }
    Ok(())
}

/// Checks an inclusive range `[start, end]` against a dimension.
pub fn check_range(kind: IndexKind, start: usize, end: usize, len: usize) -> OrbisResult<()> {
    check_index(kind, start, len)?;
    check_index(kind, end, len)?;
    if end < start {
        return Err(OrbisError::InvalidRange { kind, start, end });
    }
    Ok(())
}

/// Checks an inclusive sub-matrix range of `m`.
pub fn check_sub_matrix_range(
    m: &dyn Matrix,
    start_row: usize,
    end_row: usize,
    start_col: usize,
    end_col: usize,
) -> OrbisResult<()> {
    check_range(IndexKind::Row, start_row, end_row, m.row_dimension())?;
    check_range(IndexKind::Column, start_col, end_col, m.column_dimension())
}

/// Checks explicit row and column selections of `m`.
pub fn check_sub_matrix_indices(m: &dyn Matrix, rows: &[usize], cols: &[usize]) -> OrbisResult<()> {
    if rows.is_empty() {
        return Err(OrbisError::NoData(NoDataKind::SelectedRows));
    }
    if cols.is_empty() {
        return Err(OrbisError::NoData(NoDataKind::SelectedColumns));
    }
    for &row in rows {
        check_row_index(m, row)?;
    }
    for &col in cols {
        check_column_index(m, col)?;
    }
    Ok(())
}

/// Checks that `lhs` and `rhs` have the same shape (add / subtract).
pub fn check_add_compatible(lhs: &dyn Matrix, rhs: &dyn Matrix) -> OrbisResult<()> {
    if lhs.row_dimension() != rhs.row_dimension() || lhs.column_dimension() != rhs.column_dimension() {
        return Err(OrbisError::MatrixDimensionMismatch {
            actual: (rhs.row_dimension(), rhs.column_dimension()),
            expected: (lhs.row_dimension(), lhs.column_dimension()),
        });
    }
    Ok(())
}

/// Checks that `lhs × rhs` is defined.
pub fn check_multiply_compatible(lhs: &dyn Matrix, rhs: &dyn Matrix) -> OrbisResult<()> {
    if lhs.column_dimension() != rhs.row_dimension() {
        return Err(OrbisError::DimensionMismatch {
            actual: rhs.row_dimension(),
            expected: lhs.column_dimension(),
        });
    }
    Ok(())
}

/// Checks that a vector has the expected length.
pub fn check_vector_length(len: usize, expected: usize) -> OrbisResult<()> {
    if len != expected {
        return Err(OrbisError::DimensionMismatch {
            actual: len,
            expected,
        });
    }
    Ok(())
}

/// Checks that `m` is square.
pub fn check_square(m: &dyn Matrix) -> OrbisResult<()> {
    if m.row_dimension() != m.column_dimension() {
        return Err(OrbisError::NonSquare {
            rows: m.row_dimension(),
            cols: m.column_dimension(),
        });
    }
    Ok(())
}

/// Checks that `dimension` is at least one.
pub fn check_dimension(dimension: usize) -> OrbisResult<()> {
    if dimension == 0 {
        return Err(OrbisError::InvalidDimension { dimension });
    }
    Ok(())
}

/// Checks that a destination buffer can hold a `rows × cols` block at
/// `(dest_row, dest_col)`.
pub fn check_destination(
    dest: &[Vec<f64>],
    dest_row: usize,
    dest_col: usize,
    rows: usize,
    cols: usize,
) -> OrbisResult<()> {
    let dest_cols = dest.first().map_or(0, Vec::len);
    let mismatch = || OrbisError::MatrixDimensionMismatch {
        actual: (dest.len(), dest_cols),
        expected: (dest_row.saturating_add(rows), dest_col.saturating_add(cols)),
    };
    let (Some(end_row), Some(end_col)) = (dest_row.checked_add(rows), dest_col.checked_add(cols)) else {
        return Err(mismatch());
    };
    if dest.len() < end_row || dest[dest_row..end_row].iter().any(|row| row.len() < end_col) {
        return Err(mismatch());
    }
    Ok(())
}
