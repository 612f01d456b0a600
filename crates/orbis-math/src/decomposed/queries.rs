//! Norms, extrema and structural predicates, computed on the dense form.

use crate::matrix::{entries_equal_with_tolerance, Matrix};
use crate::ops;

use super::DecomposedSpdMatrix;

impl DecomposedSpdMatrix {
    /// Smallest entry.
    pub fn min(&self) -> f64 {
        ops::min(self.dense())
    }

    /// Largest entry.
    pub fn max(&self) -> f64 {
        ops::max(self.dense())
    }

    /// Sum of the diagonal, i.e. the squared Frobenius norm of `Bᵗ`.
    pub fn trace(&self) -> f64 {
        let dense = self.dense();
        (0..self.dimension()).map(|i| dense.at(i, i)).sum()
    }

    /// Maximum absolute column sum.
    pub fn norm(&self) -> f64 {
        ops::norm(self.dense())
    }

    /// Square root of the sum of squared entries.
    pub fn frobenius_norm(&self) -> f64 {
        ops::frobenius_norm(self.dense())
    }

    /// Whether every off-diagonal entry has magnitude at most `threshold`.
    pub fn is_diagonal(&self, threshold: f64) -> bool {
        ops::is_diagonal(self.dense(), threshold)
    }

    /// Always true.
    pub fn is_symmetric(&self) -> bool {
        true
    }

    /// Always true.
    pub fn is_symmetric_with(&self, _relative: f64) -> bool {
        true
    }

    /// Always true.
    pub fn is_symmetric_with_tolerances(&self, _relative: f64, _absolute: f64) -> bool {
        true
    }

    /// Whether `M = -Mᵗ` within tolerances. For a symmetric matrix this
    /// holds only when every entry is within tolerance of zero.
    pub fn is_antisymmetric(&self, relative: f64, absolute: f64) -> bool {
        ops::is_antisymmetric(self.dense(), relative, absolute)
    }

    /// Whether the columns are orthonormal within tolerances. Among
    /// positive semi-definite matrices only the identity qualifies.
    pub fn is_orthogonal(&self, norm_tolerance: f64, orthogonality_tolerance: f64) -> bool {
        ops::is_orthogonal(self.dense(), norm_tolerance, orthogonality_tolerance)
    }

    /// Tolerant entry-wise comparison with any matrix.
    pub fn equals_with_tolerance(&self, other: &dyn Matrix, relative: f64, absolute: f64) -> bool {
        entries_equal_with_tolerance(self.dense(), other, relative, absolute)
    }
}
