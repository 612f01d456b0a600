//! Decomposition strategies used to invert symmetric positive matrices.
//!
//! A [`DecompositionStrategy`] turns a dense matrix into a
//! [`Decomposition`]. Strategies are plain values: callers either pass one
//! explicitly or use the one held by the active
//! [`DecompositionContext`](crate::config::DecompositionContext).
//!
//! | Strategy | Backend | Singularity test |
//! |---|---|---|
//! | [`CholeskyStrategy`] | faer `llt` | `L[i,i]² <= t · max M[i,i]` or non-positive pivot |
//! | [`EigenStrategy`] | faer `self_adjoint_eigen` | `λ_min <= t · λ_max` |
//! | [`LuStrategy`] | faer `partial_piv_lu` | `|U[i,i]| <= t · max |U[i,i]|` |

use std::fmt;

use orbis_types::constants::DEFAULT_SINGULARITY_THRESHOLD;
use orbis_types::{OrbisError, OrbisResult};

use crate::checks;
use crate::dense::DenseMatrix;
use crate::faer_bridge::{cholesky_lower, lu_inverse, symmetric_eigen, SymmetricEigen};
use crate::matrix::Matrix;

/// Result of decomposing a square matrix.
pub trait Decomposition: fmt::Debug {
    /// Whether the decomposed matrix is invertible.
    fn is_non_singular(&self) -> bool;

    /// Inverse of the decomposed matrix.
    ///
    /// # Errors
    /// `SingularMatrix` if the matrix is not invertible.
    fn inverse(&self) -> OrbisResult<DenseMatrix>;

    /// A matrix `F` with `inverse = Fᵗ·F`, when the decomposition yields
    /// one directly. `None` if it does not, or if the matrix is singular.
    fn inverse_factor_transpose(&self) -> Option<DenseMatrix> {
        None
    }
}

/// Factory of decompositions.
pub trait DecompositionStrategy: fmt::Debug + Send + Sync {
    /// Strategy name, for logs and configuration.
    fn name(&self) -> &str;

    /// Decomposes a square matrix.
    fn decompose(&self, matrix: &DenseMatrix) -> OrbisResult<Box<dyn Decomposition>>;
}

// ─── Cholesky ────────────────────────────────────────────────────

/// `M = L·Lᵗ` through faer's dense LLᵗ.
#[derive(Debug, Clone, Copy)]
pub struct CholeskyStrategy {
    /// Relative pivot threshold below which the matrix is singular.
    pub singularity_threshold: f64,
}

impl Default for CholeskyStrategy {
    fn default() -> Self {
        Self {
            singularity_threshold: DEFAULT_SINGULARITY_THRESHOLD,
        }
    }
}

/// Cholesky factor and its singularity verdict.
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition {
    lower: DenseMatrix,
    non_singular: bool,
}

impl CholeskyDecomposition {
    /// The lower triangular factor `L`.
    pub fn lower(&self) -> &DenseMatrix {
        &self.lower
    }
}

impl DecompositionStrategy for CholeskyStrategy {
    fn name(&self) -> &str {
        "cholesky"
    }

    fn decompose(&self, matrix: &DenseMatrix) -> OrbisResult<Box<dyn Decomposition>> {
        checks::check_square(matrix)?;
        let lower = cholesky_lower(matrix)?;
        let n = matrix.row_dimension();
        let max_diagonal = (0..n).map(|i| matrix.at(i, i)).fold(0.0f64, f64::max);
        let non_singular = max_diagonal > 0.0
            && (0..n).all(|i| lower.at(i, i) * lower.at(i, i) > self.singularity_threshold * max_diagonal);
        Ok(Box::new(CholeskyDecomposition { lower, non_singular }))
    }
}

impl Decomposition for CholeskyDecomposition {
    fn is_non_singular(&self) -> bool {
        self.non_singular
    }

    fn inverse(&self) -> OrbisResult<DenseMatrix> {
        let factor = self.inverse_factor_transpose().ok_or(OrbisError::SingularMatrix)?;
        Ok(factor.transpose_multiply(&factor))
    }

    /// `M⁻¹ = L⁻ᵗ·L⁻¹`, so `L⁻¹` is the factor transpose.
    fn inverse_factor_transpose(&self) -> Option<DenseMatrix> {
        self.non_singular.then(|| lower_triangular_inverse(&self.lower))
    }
}

/// Inverse of a non-singular lower triangular matrix by forward substitution.
fn lower_triangular_inverse(l: &DenseMatrix) -> DenseMatrix {
    let n = l.row_dimension();
    let mut x = DenseMatrix::zeros(n, n);
    for j in 0..n {
        *x.at_mut(j, j) = 1.0 / l.at(j, j);
        for i in (j + 1)..n {
            let s: f64 = (j..i).map(|k| l.at(i, k) * x.at(k, j)).sum();
            *x.at_mut(i, j) = -s / l.at(i, i);
        }
    }
    x
}

// ─── Eigen ───────────────────────────────────────────────────────

/// `M = U·diag(λ)·Uᵗ` through faer's self-adjoint eigensolver.
///
/// Slower than Cholesky, but reports singularity from the spectrum
/// rather than from a pivot.
#[derive(Debug, Clone, Copy)]
pub struct EigenStrategy {
    /// Relative eigenvalue threshold below which the matrix is singular.
    pub singularity_threshold: f64,
}

impl Default for EigenStrategy {
    fn default() -> Self {
        Self {
            singularity_threshold: DEFAULT_SINGULARITY_THRESHOLD,
        }
    }
}

/// Eigendecomposition and its singularity verdict.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    eigen: SymmetricEigen,
    non_singular: bool,
}

impl EigenDecomposition {
    /// Eigenvalues, nondecreasing.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigen.values
    }
}

impl DecompositionStrategy for EigenStrategy {
    fn name(&self) -> &str {
        "eigen"
    }

    fn decompose(&self, matrix: &DenseMatrix) -> OrbisResult<Box<dyn Decomposition>> {
        checks::check_square(matrix)?;
        let eigen = symmetric_eigen(matrix)?;
        let largest = eigen.values.iter().copied().fold(0.0f64, f64::max);
        let non_singular = largest > 0.0 && eigen.values.iter().all(|&v| v > self.singularity_threshold * largest);
        Ok(Box::new(EigenDecomposition { eigen, non_singular }))
    }
}

impl Decomposition for EigenDecomposition {
    fn is_non_singular(&self) -> bool {
        self.non_singular
    }

    fn inverse(&self) -> OrbisResult<DenseMatrix> {
        let factor = self.inverse_factor_transpose().ok_or(OrbisError::SingularMatrix)?;
        Ok(factor.transpose_multiply(&factor))
    }

    /// Row `k` is `uₖᵗ / √λₖ`.
    fn inverse_factor_transpose(&self) -> Option<DenseMatrix> {
        if !self.non_singular {
            return None;
        }
        let u = &self.eigen.vectors;
        let n = u.row_dimension();
        Some(DenseMatrix::from_fn(n, n, |k, j| u.at(j, k) / self.eigen.values[k].sqrt()))
    }
}

// ─── LU ──────────────────────────────────────────────────────────

/// Partially pivoted LU through faer. Does not exploit symmetry; kept for
/// comparison and for matrices that are only nearly symmetric.
#[derive(Debug, Clone, Copy)]
pub struct LuStrategy {
    /// Relative pivot threshold below which the matrix is singular.
    pub singularity_threshold: f64,
}

impl Default for LuStrategy {
    fn default() -> Self {
        Self {
            singularity_threshold: DEFAULT_SINGULARITY_THRESHOLD,
        }
    }
}

/// LU inverse and its singularity verdict.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    inverse: Option<DenseMatrix>,
}

impl DecompositionStrategy for LuStrategy {
    fn name(&self) -> &str {
        "lu"
    }

    fn decompose(&self, matrix: &DenseMatrix) -> OrbisResult<Box<dyn Decomposition>> {
        checks::check_square(matrix)?;
        let (inverse, pivots) = lu_inverse(matrix);
        let largest = pivots.iter().fold(0.0f64, |acc, p| acc.max(p.abs()));
        let non_singular = largest > 0.0 && pivots.iter().all(|p| p.abs() > self.singularity_threshold * largest);
        Ok(Box::new(LuDecomposition {
            inverse: non_singular.then_some(inverse),
        }))
    }
}

impl Decomposition for LuDecomposition {
    fn is_non_singular(&self) -> bool {
        self.inverse.is_some()
    }

    fn inverse(&self) -> OrbisResult<DenseMatrix> {
        self.inverse.clone().ok_or(OrbisError::SingularMatrix)
    }
}

/// Factor transpose `F = diag(√max(λ, 0))·Uᵗ` of a symmetric positive
/// semi-definite matrix, so that `Fᵗ·F` reproduces it.
pub(crate) fn eigen_factor_transpose(matrix: &DenseMatrix) -> OrbisResult<DenseMatrix> {
    let eigen = symmetric_eigen(matrix)?;
    let u = &eigen.vectors;
    let n = u.row_dimension();
    Ok(DenseMatrix::from_fn(n, n, |k, j| u.at(j, k) * eigen.values[k].max(0.0).sqrt()))
}
