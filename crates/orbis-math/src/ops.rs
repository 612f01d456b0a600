//! Structural operations shared by every matrix type.
//!
//! These work on any [`Matrix`] through its capability surface. The
//! concrete types expose them as inherent methods and override the ones
//! their structure lets them do better (the decomposed type keeps its
//! factored form wherever the dispatch table allows it).

use orbis_types::{OrbisError, OrbisResult};

use crate::checks;
use crate::dense::DenseMatrix;
use crate::dispatch;
use crate::matrix::{AnyMatrix, Matrix, MatrixKind, MatrixRef};
use crate::precision::{equals_with_relative_tolerance, equals_with_tolerances};
use crate::visitor::{for_each_position, MatrixVisitor, WalkBounds, WalkOrder};

// ─── Arithmetic ──────────────────────────────────────────────────

/// `lhs + rhs`, typed by [`dispatch::sum_kind`].
pub fn add(lhs: &dyn Matrix, rhs: &dyn Matrix) -> OrbisResult<AnyMatrix> {
    checks::check_add_compatible(lhs, rhs)?;
    if let (MatrixRef::Decomposed(a), MatrixRef::Decomposed(b)) = (lhs.view(), rhs.view()) {
        return Ok(AnyMatrix::Decomposed(a.add_decomposed(b, true)?));
    }
    let kind = dispatch::sum_kind(lhs.kind(), rhs.kind());
    let sum = lhs.to_dense().add(&rhs.to_dense())?;
    AnyMatrix::from_dense_as(kind, sum)
}

/// `lhs - rhs`, typed by [`dispatch::difference_kind`].
pub fn subtract(lhs: &dyn Matrix, rhs: &dyn Matrix) -> OrbisResult<AnyMatrix> {
    checks::check_add_compatible(lhs, rhs)?;
    let kind = dispatch::difference_kind(lhs.kind(), rhs.kind());
    let difference = lhs.to_dense().subtract(&rhs.to_dense())?;
    AnyMatrix::from_dense_as(kind, difference)
}

/// `lhs × rhs`, typed by [`dispatch::product_kind`].
pub fn multiply(lhs: &dyn Matrix, rhs: &dyn Matrix) -> OrbisResult<AnyMatrix> {
    checks::check_multiply_compatible(lhs, rhs)?;
    let kind = dispatch::product_kind(lhs.kind(), rhs.kind());
    let product = lhs.to_dense().multiply(&rhs.to_dense())?;
    AnyMatrix::from_dense_as(kind, product)
}

/// `m + c` on every entry, typed by [`dispatch::scalar_add_kind`].
pub fn scalar_add(m: &dyn Matrix, scalar: f64) -> OrbisResult<AnyMatrix> {
    if let (MatrixRef::Decomposed(d), MatrixKind::DecomposedSymmetricPositive) =
        (m.view(), dispatch::scalar_add_kind(m.kind(), scalar))
    {
        return Ok(AnyMatrix::Decomposed(d.positive_scalar_add(scalar)?));
    }
    let kind = dispatch::scalar_add_kind(m.kind(), scalar);
    AnyMatrix::from_dense_as(kind, m.to_dense().scalar_add(scalar))
}

/// `m · c`, typed by [`dispatch::scalar_multiply_kind`].
pub fn scalar_multiply(m: &dyn Matrix, scalar: f64) -> OrbisResult<AnyMatrix> {
    if let (MatrixRef::Decomposed(d), MatrixKind::DecomposedSymmetricPositive) =
        (m.view(), dispatch::scalar_multiply_kind(m.kind(), scalar))
    {
        return Ok(AnyMatrix::Decomposed(d.positive_scalar_multiply(scalar)?));
    }
    let kind = dispatch::scalar_multiply_kind(m.kind(), scalar);
    AnyMatrix::from_dense_as(kind, m.to_dense().scalar_multiply(scalar))
}

// ─── Rows, columns, sub-matrices ─────────────────────────────────

/// Row `row` as a vector.
pub fn row(m: &dyn Matrix, row: usize) -> OrbisResult<Vec<f64>> {
    checks::check_row_index(m, row)?;
    Ok((0..m.column_dimension()).map(|j| m.entry_at(row, j)).collect())
}

/// Column `col` as a vector.
pub fn column(m: &dyn Matrix, col: usize) -> OrbisResult<Vec<f64>> {
    checks::check_column_index(m, col)?;
    Ok((0..m.row_dimension()).map(|i| m.entry_at(i, col)).collect())
}

/// Row `row` as a `1 × n` matrix.
pub fn row_matrix(m: &dyn Matrix, row: usize) -> OrbisResult<DenseMatrix> {
    checks::check_row_index(m, row)?;
    Ok(DenseMatrix::from_fn(1, m.column_dimension(), |_, j| m.entry_at(row, j)))
}

/// Column `col` as an `n × 1` matrix.
pub fn column_matrix(m: &dyn Matrix, col: usize) -> OrbisResult<DenseMatrix> {
    checks::check_column_index(m, col)?;
    Ok(DenseMatrix::from_fn(m.row_dimension(), 1, |i, _| m.entry_at(i, col)))
}

/// Entries in the inclusive ranges `[start_row, end_row] × [start_col, end_col]`.
pub fn sub_matrix(
    m: &dyn Matrix,
    start_row: usize,
    end_row: usize,
    start_col: usize,
    end_col: usize,
) -> OrbisResult<DenseMatrix> {
    checks::check_sub_matrix_range(m, start_row, end_row, start_col, end_col)?;
    Ok(DenseMatrix::from_fn(
        end_row - start_row + 1,
        end_col - start_col + 1,
        |i, j| m.entry_at(start_row + i, start_col + j),
    ))
}

/// Entries at the selected rows and columns, in selection order.
pub fn sub_matrix_indices(m: &dyn Matrix, rows: &[usize], cols: &[usize]) -> OrbisResult<DenseMatrix> {
    checks::check_sub_matrix_indices(m, rows, cols)?;
    Ok(DenseMatrix::from_fn(rows.len(), cols.len(), |i, j| {
        m.entry_at(rows[i], cols[j])
    }))
}

/// Copies an inclusive range into `dest` at `(dest_row, dest_col)`.
#[allow(clippy::too_many_arguments)]
pub fn copy_sub_matrix_range(
    m: &dyn Matrix,
    start_row: usize,
    end_row: usize,
    start_col: usize,
    end_col: usize,
    dest: &mut [Vec<f64>],
    dest_row: usize,
    dest_col: usize,
) -> OrbisResult<()> {
    checks::check_sub_matrix_range(m, start_row, end_row, start_col, end_col)?;
    let (rows, cols) = (end_row - start_row + 1, end_col - start_col + 1);
    checks::check_destination(dest, dest_row, dest_col, rows, cols)?;
    for i in 0..rows {
        for j in 0..cols {
            dest[dest_row + i][dest_col + j] = m.entry_at(start_row + i, start_col + j);
        }
    }
    Ok(())
}

/// Copies the selected rows and columns into `dest` at `(dest_row, dest_col)`.
pub fn copy_sub_matrix_indices(
    m: &dyn Matrix,
    rows: &[usize],
    cols: &[usize],
    dest: &mut [Vec<f64>],
    dest_row: usize,
    dest_col: usize,
) -> OrbisResult<()> {
    checks::check_sub_matrix_indices(m, rows, cols)?;
    checks::check_destination(dest, dest_row, dest_col, rows.len(), cols.len())?;
    for (i, &r) in rows.iter().enumerate() {
        for (j, &c) in cols.iter().enumerate() {
            dest[dest_row + i][dest_col + j] = m.entry_at(r, c);
        }
    }
    Ok(())
}

// ─── Concatenation ───────────────────────────────────────────────

/// `[lhs | rhs]` when `right`, `[rhs | lhs]` otherwise.
pub fn concatenate_horizontally(lhs: &dyn Matrix, rhs: &dyn Matrix, right: bool) -> OrbisResult<DenseMatrix> {
    if lhs.row_dimension() != rhs.row_dimension() {
        return Err(OrbisError::DimensionMismatch {
            actual: rhs.row_dimension(),
            expected: lhs.row_dimension(),
        });
    }
    let (first, second) = if right { (lhs, rhs) } else { (rhs, lhs) };
    let split = first.column_dimension();
    Ok(DenseMatrix::from_fn(
        lhs.row_dimension(),
        split + second.column_dimension(),
        |i, j| {
            if j < split {
                first.entry_at(i, j)
            } else {
                second.entry_at(i, j - split)
            }
        },
    ))
}

/// `[lhs; rhs]` when `bottom`, `[rhs; lhs]` otherwise.
pub fn concatenate_vertically(lhs: &dyn Matrix, rhs: &dyn Matrix, bottom: bool) -> OrbisResult<DenseMatrix> {
    if lhs.column_dimension() != rhs.column_dimension() {
        return Err(OrbisError::DimensionMismatch {
            actual: rhs.column_dimension(),
            expected: lhs.column_dimension(),
        });
    }
    let (first, second) = if bottom { (lhs, rhs) } else { (rhs, lhs) };
    let split = first.row_dimension();
    Ok(DenseMatrix::from_fn(
        split + second.row_dimension(),
        lhs.column_dimension(),
        |i, j| {
            if i < split {
                first.entry_at(i, j)
            } else {
                second.entry_at(i - split, j)
            }
        },
    ))
}

/// Block diagonal `[[lhs, 0], [0, rhs]]` when `lower_right`,
/// `[[rhs, 0], [0, lhs]]` otherwise.
pub fn concatenate_diagonally(lhs: &dyn Matrix, rhs: &dyn Matrix, lower_right: bool) -> DenseMatrix {
    let (first, second) = if lower_right { (lhs, rhs) } else { (rhs, lhs) };
    let (r, c) = (first.row_dimension(), first.column_dimension());
    DenseMatrix::from_fn(
        r + second.row_dimension(),
        c + second.column_dimension(),
        |i, j| match (i < r, j < c) {
            (true, true) => first.entry_at(i, j),
            (false, false) => second.entry_at(i - r, j - c),
            _ => 0.0,
        },
    )
}

// ─── Scalar queries ──────────────────────────────────────────────

/// Sum of the diagonal entries.
pub fn trace(m: &dyn Matrix) -> OrbisResult<f64> {
    checks::check_square(m)?;
    Ok((0..m.row_dimension()).map(|i| m.entry_at(i, i)).sum())
}

/// Maximum absolute column sum.
pub fn norm(m: &dyn Matrix) -> f64 {
    (0..m.column_dimension())
        .map(|j| (0..m.row_dimension()).map(|i| m.entry_at(i, j).abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Square root of the sum of squared entries.
pub fn frobenius_norm(m: &dyn Matrix) -> f64 {
    let mut sum = 0.0;
    for i in 0..m.row_dimension() {
        for j in 0..m.column_dimension() {
            let v = m.entry_at(i, j);
            sum += v * v;
        }
    }
    sum.sqrt()
}

/// Smallest entry.
pub fn min(m: &dyn Matrix) -> f64 {
    fold_entries(m, f64::INFINITY, f64::min)
}

/// Largest entry.
pub fn max(m: &dyn Matrix) -> f64 {
    fold_entries(m, f64::NEG_INFINITY, f64::max)
}

fn fold_entries(m: &dyn Matrix, init: f64, f: impl Fn(f64, f64) -> f64) -> f64 {
    let mut acc = init;
    for i in 0..m.row_dimension() {
        for j in 0..m.column_dimension() {
            acc = f(acc, m.entry_at(i, j));
        }
    }
    acc
}

// ─── Predicates ──────────────────────────────────────────────────

/// Whether every off-diagonal entry has magnitude at most `threshold`.
pub fn is_diagonal(m: &dyn Matrix, threshold: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let n = m.row_dimension();
    (0..n).all(|i| (0..n).all(|j| i == j || m.entry_at(i, j).abs() <= threshold))
}

/// Whether `M[i,j]` and `M[j,i]` agree within tolerances for all pairs.
pub fn is_symmetric(m: &dyn Matrix, relative: f64, absolute: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let n = m.row_dimension();
    (0..n).all(|i| {
        ((i + 1)..n).all(|j| equals_with_tolerances(m.entry_at(i, j), m.entry_at(j, i), relative, absolute))
    })
}

/// Whether the diagonal is zero within `absolute` and `M[i,j] = -M[j,i]`
/// within tolerances for all pairs.
pub fn is_antisymmetric(m: &dyn Matrix, relative: f64, absolute: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let n = m.row_dimension();
    (0..n).all(|i| {
        m.entry_at(i, i).abs() <= absolute
            && ((i + 1)..n).all(|j| equals_with_tolerances(m.entry_at(i, j), -m.entry_at(j, i), relative, absolute))
    })
}

/// Whether the columns are unit vectors (within `norm_tolerance`,
/// relative to 1) and pairwise orthogonal (absolute dot products at most
/// `orthogonality_tolerance`).
pub fn is_orthogonal(m: &dyn Matrix, norm_tolerance: f64, orthogonality_tolerance: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let n = m.row_dimension();
    let dot = |a: usize, b: usize| -> f64 { (0..n).map(|k| m.entry_at(k, a) * m.entry_at(k, b)).sum() };
    (0..n).all(|i| {
        equals_with_relative_tolerance(dot(i, i).sqrt(), 1.0, norm_tolerance)
            && ((i + 1)..n).all(|j| dot(i, j).abs() <= orthogonality_tolerance)
    })
}

// ─── Traversal ───────────────────────────────────────────────────

/// Walks every entry with a read-only visitor.
pub fn walk(m: &dyn Matrix, order: WalkOrder, visitor: &mut dyn MatrixVisitor) -> f64 {
    let bounds = WalkBounds::full(m.row_dimension(), m.column_dimension());
    walk_bounds(m, order, visitor, bounds)
}

/// Walks an inclusive sub-range with a read-only visitor.
pub fn walk_range(
    m: &dyn Matrix,
    order: WalkOrder,
    visitor: &mut dyn MatrixVisitor,
    start_row: usize,
    end_row: usize,
    start_col: usize,
    end_col: usize,
) -> OrbisResult<f64> {
    checks::check_sub_matrix_range(m, start_row, end_row, start_col, end_col)?;
    let bounds = WalkBounds {
        start_row,
        end_row,
        start_col,
        end_col,
    };
    Ok(walk_bounds(m, order, visitor, bounds))
}

fn walk_bounds(m: &dyn Matrix, order: WalkOrder, visitor: &mut dyn MatrixVisitor, bounds: WalkBounds) -> f64 {
    visitor.start(
        m.row_dimension(),
        m.column_dimension(),
        bounds.start_row,
        bounds.end_row,
        bounds.start_col,
        bounds.end_col,
    );
    for_each_position(order, bounds, |i, j| visitor.visit(i, j, m.entry_at(i, j)));
    visitor.end()
}
