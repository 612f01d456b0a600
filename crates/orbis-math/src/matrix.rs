//! Matrix capability trait and the closed set of matrix kinds.
//!
//! Every matrix type exposes the same small surface: its dimensions,
//! unchecked entry reads, and its [`MatrixKind`]. Operations whose result
//! type depends on both operands match on [`MatrixRef`] pairs and pick the
//! result kind from [`crate::dispatch`].

use std::fmt;
use std::hash::{Hash, Hasher};

use orbis_types::OrbisResult;

use crate::decomposed::DecomposedSpdMatrix;
use crate::dense::DenseMatrix;
use crate::diagonal::DiagonalMatrix;
use crate::precision::{canonical_bits, equals_with_tolerances};
use crate::symmetric::{SymmetricMatrix, SymmetricPositiveMatrix};

/// Structural knowledge carried by a matrix type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    /// No structure known.
    Dense,
    /// Diagonal (hence symmetric).
    Diagonal,
    /// Symmetric.
    Symmetric,
    /// Symmetric positive semi-definite, validated at construction.
    SymmetricPositive,
    /// Symmetric positive semi-definite by construction, `M = Bᵗ·B`.
    DecomposedSymmetricPositive,
}

impl MatrixKind {
    /// Whether every matrix of this kind is symmetric.
    pub fn is_known_symmetric(self) -> bool {
        !matches!(self, MatrixKind::Dense)
    }

    /// Whether every matrix of this kind is positive semi-definite.
    pub fn is_known_positive(self) -> bool {
        matches!(
            self,
            MatrixKind::SymmetricPositive | MatrixKind::DecomposedSymmetricPositive
        )
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MatrixKind::Dense => "dense",
            MatrixKind::Diagonal => "diagonal",
            MatrixKind::Symmetric => "symmetric",
            MatrixKind::SymmetricPositive => "symmetric positive",
            MatrixKind::DecomposedSymmetricPositive => "decomposed symmetric positive",
        }
    }
}

/// Common read-only surface of all matrix types.
pub trait Matrix: fmt::Debug + Send + Sync {
    /// Number of rows.
    fn row_dimension(&self) -> usize;

    /// Number of columns.
    fn column_dimension(&self) -> usize;

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    /// May panic if the indices are out of range; use the checked
    /// `get_entry` of the concrete types for untrusted indices.
    fn entry_at(&self, row: usize, col: usize) -> f64;

    /// Structural kind of this matrix.
    fn kind(&self) -> MatrixKind;

    /// Borrowed variant of this matrix, for double dispatch.
    fn view(&self) -> MatrixRef<'_>;

    /// Dense materialization.
    fn to_dense(&self) -> DenseMatrix {
        DenseMatrix::from_fn(self.row_dimension(), self.column_dimension(), |i, j| {
            self.entry_at(i, j)
        })
    }

    /// Whether the matrix is square.
    fn is_square(&self) -> bool {
        self.row_dimension() == self.column_dimension()
    }
}

/// Borrowed matrix of any kind.
#[derive(Debug, Clone, Copy)]
pub enum MatrixRef<'a> {
    Dense(&'a DenseMatrix),
    Diagonal(&'a DiagonalMatrix),
    Symmetric(&'a SymmetricMatrix),
    SymmetricPositive(&'a SymmetricPositiveMatrix),
    Decomposed(&'a DecomposedSpdMatrix),
}

impl<'a> MatrixRef<'a> {
    /// Upcasts to the capability trait.
    pub fn as_matrix(self) -> &'a dyn Matrix {
        match self {
            MatrixRef::Dense(m) => m,
            MatrixRef::Diagonal(m) => m,
            MatrixRef::Symmetric(m) => m,
            MatrixRef::SymmetricPositive(m) => m,
            MatrixRef::Decomposed(m) => m,
        }
    }
}

/// Owned matrix of any kind, returned by type-narrowing operations.
#[derive(Debug, Clone)]
pub enum AnyMatrix {
    Dense(DenseMatrix),
    Diagonal(DiagonalMatrix),
    Symmetric(SymmetricMatrix),
    SymmetricPositive(SymmetricPositiveMatrix),
    Decomposed(DecomposedSpdMatrix),
}

impl AnyMatrix {
    /// Wraps dense entries into the given kind.
    ///
    /// The entries must already have the structure `kind` promises;
    /// symmetric kinds are stored from the lower triangle.
    pub(crate) fn from_dense_as(kind: MatrixKind, dense: DenseMatrix) -> OrbisResult<Self> {
        Ok(match kind {
            MatrixKind::Dense => AnyMatrix::Dense(dense),
            MatrixKind::Diagonal => AnyMatrix::Diagonal(DiagonalMatrix::from_dense_diagonal(&dense)),
            MatrixKind::Symmetric => AnyMatrix::Symmetric(SymmetricMatrix::from_lower_triangle(dense)),
            MatrixKind::SymmetricPositive => AnyMatrix::SymmetricPositive(
                SymmetricPositiveMatrix::from_symmetric_unchecked(SymmetricMatrix::from_lower_triangle(dense)),
            ),
            MatrixKind::DecomposedSymmetricPositive => {
                let spd = SymmetricPositiveMatrix::from_symmetric_unchecked(SymmetricMatrix::from_lower_triangle(dense));
                AnyMatrix::Decomposed(DecomposedSpdMatrix::from_symmetric_positive(&spd)?)
            }
        })
    }

    /// Upcasts to the capability trait.
    pub fn as_matrix(&self) -> &dyn Matrix {
        self.view().as_matrix()
    }

    /// Returns the decomposed matrix, if that is what this is.
    pub fn as_decomposed(&self) -> Option<&DecomposedSpdMatrix> {
        match self {
            AnyMatrix::Decomposed(m) => Some(m),
            _ => None,
        }
    }

    /// Converts into the decomposed matrix, if that is what this is.
    pub fn into_decomposed(self) -> Option<DecomposedSpdMatrix> {
        match self {
            AnyMatrix::Decomposed(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the symmetric matrix, if that is what this is.
    pub fn as_symmetric(&self) -> Option<&SymmetricMatrix> {
        match self {
            AnyMatrix::Symmetric(m) => Some(m),
            _ => None,
        }
    }

    /// Converts into a dense matrix.
    pub fn into_dense(self) -> DenseMatrix {
        match self {
            AnyMatrix::Dense(m) => m,
            other => other.to_dense(),
        }
    }
}

impl Matrix for AnyMatrix {
    fn row_dimension(&self) -> usize {
        self.as_matrix().row_dimension()
    }

    fn column_dimension(&self) -> usize {
        self.as_matrix().column_dimension()
    }

    fn entry_at(&self, row: usize, col: usize) -> f64 {
        self.as_matrix().entry_at(row, col)
    }

    fn kind(&self) -> MatrixKind {
        self.as_matrix().kind()
    }

    fn view(&self) -> MatrixRef<'_> {
        match self {
            AnyMatrix::Dense(m) => MatrixRef::Dense(m),
            AnyMatrix::Diagonal(m) => MatrixRef::Diagonal(m),
            AnyMatrix::Symmetric(m) => MatrixRef::Symmetric(m),
            AnyMatrix::SymmetricPositive(m) => MatrixRef::SymmetricPositive(m),
            AnyMatrix::Decomposed(m) => MatrixRef::Decomposed(m),
        }
    }

    fn to_dense(&self) -> DenseMatrix {
        self.as_matrix().to_dense()
    }
}

/// Exact value equality: same dimensions and same entries.
pub fn entries_equal(a: &dyn Matrix, b: &dyn Matrix) -> bool {
    if a.row_dimension() != b.row_dimension() || a.column_dimension() != b.column_dimension() {
        return false;
    }
    let (a, b) = (a.to_dense(), b.to_dense());
    a.as_slice().iter().zip(b.as_slice()).all(|(x, y)| x == y)
}

/// Tolerant value equality: same dimensions, entries equal within
/// `relative` or `absolute` tolerance.
pub fn entries_equal_with_tolerance(a: &dyn Matrix, b: &dyn Matrix, relative: f64, absolute: f64) -> bool {
    if a.row_dimension() != b.row_dimension() || a.column_dimension() != b.column_dimension() {
        return false;
    }
    let (a, b) = (a.to_dense(), b.to_dense());
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .all(|(&x, &y)| equals_with_tolerances(x, y, relative, absolute))
}

/// Hashes dimensions and entries, so that equal matrices of different
/// representations hash identically.
pub fn hash_entries<H: Hasher>(m: &dyn Matrix, state: &mut H) {
    m.row_dimension().hash(state);
    m.column_dimension().hash(state);
    for &v in m.to_dense().as_slice() {
        canonical_bits(v).hash(state);
    }
}

macro_rules! impl_value_eq {
    ($lhs:ty => $($rhs:ty),+) => {
        $(
            impl PartialEq<$rhs> for $lhs {
                fn eq(&self, other: &$rhs) -> bool {
                    entries_equal(self, other)
                }
            }
        )+
    };
}

macro_rules! impl_value_semantics {
    ($($ty:ty),+) => {
        $(
            impl_value_eq!($ty => DenseMatrix, DiagonalMatrix, SymmetricMatrix,
                SymmetricPositiveMatrix, DecomposedSpdMatrix, AnyMatrix);

            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    hash_entries(self, state);
                }
            }
        )+
    };
}

impl_value_semantics!(
    DenseMatrix,
    DiagonalMatrix,
    SymmetricMatrix,
    SymmetricPositiveMatrix,
    DecomposedSpdMatrix,
    AnyMatrix
);
