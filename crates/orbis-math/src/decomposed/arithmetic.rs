//! Arithmetic on [`DecomposedSpdMatrix`].
//!
//! Operations that provably keep `M` positive semi-definite return a new
//! decomposed matrix built directly on the factor. The others go through
//! [`crate::ops`], which types the result from the dispatch table.

use orbis_types::{OrbisError, OrbisResult};

use crate::checks;
use crate::config::DecompositionContext;
use crate::decomposition::{eigen_factor_transpose, DecompositionStrategy};
use crate::dense::DenseMatrix;
use crate::matrix::{AnyMatrix, Matrix};
use crate::ops;

use super::DecomposedSpdMatrix;

impl DecomposedSpdMatrix {
    /// `self + other`.
    ///
    /// A decomposed operand gives a decomposed sum whose factor is resized
    /// (see [`add_decomposed`](Self::add_decomposed)). Other operands give
    /// the kind chosen by [`crate::dispatch::sum_kind`].
    ///
    /// # Errors
    /// `MatrixDimensionMismatch` if the shapes differ.
    pub fn add(&self, other: &dyn Matrix) -> OrbisResult<AnyMatrix> {
        ops::add(self, other)
    }

    /// `self + other`, stacking the two factors.
    ///
    /// With `resize`, the stacked factor is compacted by
    /// [`resize_b`](Self::resize_b); otherwise the result's `Bᵗ` is exactly
    /// `self.bt()` on top of `other.bt()`.
    pub fn add_decomposed(&self, other: &DecomposedSpdMatrix, resize: bool) -> OrbisResult<Self> {
        checks::check_add_compatible(self, other)?;
        let mut sum = Self::from_factor(self.factor_transpose.stack(&other.factor_transpose));
        if resize {
            sum.resize_b();
        }
        Ok(sum)
    }

    /// `self - other`; never decomposed.
    pub fn subtract(&self, other: &dyn Matrix) -> OrbisResult<AnyMatrix> {
        ops::subtract(self, other)
    }

    /// Adds `scalar` to every entry: decomposed for `scalar >= 0`,
    /// symmetric otherwise.
    pub fn scalar_add(&self, scalar: f64) -> OrbisResult<AnyMatrix> {
        ops::scalar_add(self, scalar)
    }

    /// Multiplies by `scalar`: decomposed for `scalar >= 0`, symmetric
    /// otherwise.
    pub fn scalar_multiply(&self, scalar: f64) -> OrbisResult<AnyMatrix> {
        ops::scalar_multiply(self, scalar)
    }

    /// Adds a non-negative `scalar` to every entry by appending the factor
    /// row `√c·1ᵗ` (`M + c·1·1ᵗ`).
    ///
    /// # Errors
    /// `NotPositive` if `scalar < 0`.
    pub fn positive_scalar_add(&self, scalar: f64) -> OrbisResult<Self> {
        check_non_negative(scalar)?;
        if scalar == 0.0 {
            return Ok(self.copy());
        }
        let row = DenseMatrix::from_fn(1, self.dimension(), |_, _| scalar.sqrt());
        Ok(Self::from_factor(self.factor_transpose.stack(&row)))
    }

    /// Multiplies by a non-negative `scalar` by scaling the factor by `√c`.
    ///
    /// # Errors
    /// `NotPositive` if `scalar < 0`.
    pub fn positive_scalar_multiply(&self, scalar: f64) -> OrbisResult<Self> {
        check_non_negative(scalar)?;
        Ok(Self::from_factor(self.factor_transpose.scalar_multiply(scalar.sqrt())))
    }

    /// `self × other`, dense.
    ///
    /// # Errors
    /// `DimensionMismatch` if `other` does not have `n` rows.
    pub fn multiply(&self, other: &dyn Matrix) -> OrbisResult<DenseMatrix> {
        ops::multiply(self.dense(), other).map(AnyMatrix::into_dense)
    }

    /// `other × self`, dense.
    ///
    /// # Errors
    /// `DimensionMismatch` if `other` does not have `n` columns.
    pub fn pre_multiply(&self, other: &dyn Matrix) -> OrbisResult<DenseMatrix> {
        ops::multiply(other, self.dense()).map(AnyMatrix::into_dense)
    }

    /// `M·v`, computed as `(Bᵗ)ᵗ·(Bᵗ·v)`.
    pub fn operate(&self, v: &[f64]) -> OrbisResult<Vec<f64>> {
        let projected = self.factor_transpose.operate(v)?;
        self.factor_transpose.pre_multiply_vector(&projected)
    }

    /// `vᵗ·M`; equal to `M·v` by symmetry.
    pub fn pre_multiply_vector(&self, v: &[f64]) -> OrbisResult<Vec<f64>> {
        self.operate(v)
    }

    /// Congruence transform of `M`, kept in factored form.
    ///
    /// - `transpose == false`: `A·M·Aᵗ` with factor `Bᵗ·Aᵗ`; `A` must have
    ///   `n` columns.
    /// - `transpose == true`: `Aᵗ·M·A` with factor `Bᵗ·A`; `A` must have
    ///   `n` rows.
    ///
    /// # Errors
    /// `DimensionMismatch` on an incompatible `A`.
    pub fn quadratic_multiplication(&self, a: &dyn Matrix, transpose: bool) -> OrbisResult<Self> {
        let a = a.to_dense();
        let a = if transpose { a } else { a.transpose() };
        checks::check_vector_length(a.row_dimension(), self.dimension())?;
        Ok(Self::from_factor(self.factor_transpose.multiply(&a)?))
    }

    /// `M^k` in factored form.
    ///
    /// `k = 0` gives the identity. With `h = k / 2`, an even `k` uses the
    /// symmetric factor `M^h` and an odd one uses `Bᵗ·M^h`.
    ///
    /// # Errors
    /// `NotPositive` if `k < 0`.
    pub fn power(&self, k: i32) -> OrbisResult<Self> {
        if k < 0 {
            return Err(OrbisError::NotPositive { value: f64::from(k) });
        }
        if k == 0 {
            return Self::create_identity_matrix(self.dimension());
        }
        let half = self.dense().power(k.unsigned_abs() / 2)?;
        let factor = if k % 2 == 0 {
            half
        } else {
            self.factor_transpose.multiply(&half)?
        };
        Ok(Self::from_factor(factor))
    }

    /// Transpose; `M` is symmetric so this is a copy.
    pub fn transpose(&self) -> Self {
        self.copy()
    }

    /// Inverse through the process-wide default strategy.
    ///
    /// # Errors
    /// `SingularMatrix` if `M` is not invertible.
    pub fn inverse(&self) -> OrbisResult<Self> {
        let context = DecompositionContext::global();
        self.inverse_with(context.strategy())
    }

    /// Inverse through an explicit strategy.
    ///
    /// When the decomposition yields a factor of the inverse directly it is
    /// used as is; otherwise the inverse is refactored from its eigenvalues.
    ///
    /// # Errors
    /// `SingularMatrix` if `M` is not invertible.
    pub fn inverse_with(&self, strategy: &dyn DecompositionStrategy) -> OrbisResult<Self> {
        let decomposition = strategy.decompose(self.dense())?;
        if !decomposition.is_non_singular() {
            tracing::debug!(strategy = strategy.name(), n = self.dimension(), "matrix is singular");
            return Err(OrbisError::SingularMatrix);
        }
        let factor = match decomposition.inverse_factor_transpose() {
            Some(factor) => factor,
            None => eigen_factor_transpose(&decomposition.inverse()?)?,
        };
        tracing::debug!(strategy = strategy.name(), n = self.dimension(), "inverted decomposed matrix");
        Ok(Self::from_factor(factor))
    }
}

fn check_non_negative(scalar: f64) -> OrbisResult<()> {
    if scalar.is_nan() || scalar < 0.0 {
        return Err(OrbisError::NotPositive { value: scalar });
    }
    Ok(())
}
