//! Conversions between [`DenseMatrix`] and `faer`, plus the factorizations
//! Orbis delegates to `faer`.
//!
//! `faer` works on its own column-major `Mat<f64>`; every routine here
//! converts at the boundary and returns Orbis types.

use faer::{Mat, Side};

use orbis_types::{OrbisError, OrbisResult};

use crate::dense::DenseMatrix;
use crate::matrix::Matrix;

/// Copies a dense matrix into a faer matrix.
pub(crate) fn to_faer(m: &DenseMatrix) -> Mat<f64> {
    Mat::from_fn(m.row_dimension(), m.column_dimension(), |i, j| m.at(i, j))
}

/// Copies a faer matrix back into a dense matrix.
pub(crate) fn from_faer(m: &Mat<f64>) -> DenseMatrix {
    DenseMatrix::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)])
}

/// Self-adjoint eigendecomposition `M = U·diag(λ)·Uᵗ`.
#[derive(Debug, Clone)]
pub(crate) struct SymmetricEigen {
    /// Eigenvalues, nondecreasing.
    pub values: Vec<f64>,
    /// Eigenvectors stored as columns.
    pub vectors: DenseMatrix,
}

/// Eigendecomposition of a symmetric matrix (lower triangle is read).
pub(crate) fn symmetric_eigen(m: &DenseMatrix) -> OrbisResult<SymmetricEigen> {
    let evd = to_faer(m)
        .self_adjoint_eigen(Side::Lower)
        .map_err(|e| OrbisError::DecompositionFailure(format!("eigendecomposition: {e:?}")))?;
    let vectors = from_faer(&evd.U().to_owned());

    // Rayleigh quotients of the unit eigenvectors give back the eigenvalues.
    let n = m.row_dimension();
    let values = (0..n)
        .map(|k| {
            (0..n)
                .map(|i| {
                    let mu: f64 = (0..n).map(|j| m.at(i, j) * vectors.at(j, k)).sum();
                    vectors.at(i, k) * mu
                })
                .sum()
        })
        .collect();

    Ok(SymmetricEigen { values, vectors })
}

/// Lower Cholesky factor `L` with `M = L·Lᵗ`.
///
/// Fails with `SingularMatrix` when faer meets a non-positive pivot.
pub(crate) fn cholesky_lower(m: &DenseMatrix) -> OrbisResult<DenseMatrix> {
    let llt = to_faer(m).llt(Side::Lower).map_err(|e| {
        tracing::debug!(error = ?e, "cholesky factorization rejected the matrix");
        OrbisError::SingularMatrix
    })?;
    Ok(from_faer(&llt.L().to_owned()))
}

/// Inverse of a square matrix through a partially pivoted LU, together with
/// the diagonal of `U` (used for singularity detection).
pub(crate) fn lu_inverse(m: &DenseMatrix) -> (DenseMatrix, Vec<f64>) {
    use faer::linalg::solvers::Solve;

    let n = m.row_dimension();
    let lu = to_faer(m).partial_piv_lu();
    let u = lu.U().to_owned();
    let pivots = (0..n).map(|i| u[(i, i)]).collect();
    let inverse = lu.solve(&Mat::<f64>::identity(n, n));
    (from_faer(&inverse), pivots)
}

/// Upper triangular `R` of a Householder QR of `a` (`min(rows, cols) × cols`),
/// with rows negated where needed so that the diagonal is non-negative.
///
/// `aᵗ·a = Rᵗ·R` holds for the result.
pub(crate) fn upper_triangular_factor(a: &DenseMatrix) -> DenseMatrix {
    let qr = to_faer(a).qr();
    let mut r = from_faer(&qr.thin_R().to_owned());
    for i in 0..r.row_dimension() {
        let flip = r.at(i, i) < 0.0;
        for j in 0..r.column_dimension() {
            let v = r.at_mut(i, j);
            if j < i {
                *v = 0.0;
            } else if flip {
                *v = -*v;
            }
        }
    }
    r
}
