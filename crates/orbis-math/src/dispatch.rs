//! Result-kind table for binary and scalar operations.
//!
//! Each function returns the narrowest [`MatrixKind`] whose structure is
//! guaranteed for the result, given only the kinds of the operands. The
//! operations in [`crate::ops`] and on the concrete types build their
//! results from these answers, so the rules live in one place.

use crate::matrix::MatrixKind;

/// Kind of `lhs + rhs`.
pub fn sum_kind(lhs: MatrixKind, rhs: MatrixKind) -> MatrixKind {
    use MatrixKind::*;
    match (lhs, rhs) {
        (DecomposedSymmetricPositive, DecomposedSymmetricPositive) => DecomposedSymmetricPositive,
        (Diagonal, Diagonal) => Diagonal,
        (l, r) if l.is_known_positive() && r.is_known_positive() => SymmetricPositive,
        (l, r) if l.is_known_symmetric() && r.is_known_symmetric() => Symmetric,
        _ => Dense,
    }
}

/// Kind of `lhs - rhs`. Never positive: a difference can have any sign.
pub fn difference_kind(lhs: MatrixKind, rhs: MatrixKind) -> MatrixKind {
    use MatrixKind::*;
    match (lhs, rhs) {
        (Diagonal, Diagonal) => Diagonal,
        (l, r) if l.is_known_symmetric() && r.is_known_symmetric() => Symmetric,
        _ => Dense,
    }
}

/// Kind of `m + c` (added to every entry).
pub fn scalar_add_kind(kind: MatrixKind, scalar: f64) -> MatrixKind {
    use MatrixKind::*;
    match kind {
        DecomposedSymmetricPositive if scalar >= 0.0 => DecomposedSymmetricPositive,
        SymmetricPositive if scalar >= 0.0 => SymmetricPositive,
        Dense => Dense,
        _ => Symmetric,
    }
}

/// Kind of `m · c`.
pub fn scalar_multiply_kind(kind: MatrixKind, scalar: f64) -> MatrixKind {
    use MatrixKind::*;
    match kind {
        DecomposedSymmetricPositive if scalar >= 0.0 => DecomposedSymmetricPositive,
        SymmetricPositive if scalar >= 0.0 => SymmetricPositive,
        Diagonal => Diagonal,
        Dense => Dense,
        _ => Symmetric,
    }
}

/// Kind of `lhs × rhs`.
///
/// Products of symmetric matrices are not symmetric in general; only two
/// diagonal factors keep their structure.
pub fn product_kind(lhs: MatrixKind, rhs: MatrixKind) -> MatrixKind {
    match (lhs, rhs) {
        (MatrixKind::Diagonal, MatrixKind::Diagonal) => MatrixKind::Diagonal,
        _ => MatrixKind::Dense,
    }
}
