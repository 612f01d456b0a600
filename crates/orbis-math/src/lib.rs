//! # orbis-math
//!
//! Decomposed symmetric positive semi-definite matrices and the structured
//! matrix types they interoperate with.
//!
//! ## Key Types
//!
//! - [`DecomposedSpdMatrix`]: `M = (Bᵗ)ᵗ·Bᵗ`, positive semi-definite by construction
//! - [`Matrix`]: capability trait shared by every matrix type
//! - [`AnyMatrix`]: owned result of operations whose type depends on the operands
//! - [`DenseMatrix`], [`DiagonalMatrix`], [`SymmetricMatrix`], [`SymmetricPositiveMatrix`]: collaborators
//! - [`DecompositionStrategy`]: pluggable inversion backend (Cholesky, eigen, LU via faer)
//! - [`DecompositionConfig`] / [`DecompositionContext`]: strategy selection

pub mod checks;
pub mod config;
pub mod decomposed;
pub mod decomposition;
pub mod dense;
pub mod diagonal;
pub mod dispatch;
mod faer_bridge;
pub mod matrix;
pub mod ops;
pub mod precision;
pub mod symmetric;
pub mod visitor;

pub use config::{DecompositionConfig, DecompositionContext, StrategyKind};
pub use decomposed::DecomposedSpdMatrix;
pub use decomposition::{CholeskyStrategy, Decomposition, DecompositionStrategy, EigenStrategy, LuStrategy};
pub use dense::DenseMatrix;
pub use diagonal::DiagonalMatrix;
pub use matrix::{AnyMatrix, Matrix, MatrixKind, MatrixRef};
pub use symmetric::{SymmetricMatrix, SymmetricPositiveMatrix};
pub use visitor::{MatrixVisitor, MatrixVisitorMut, WalkOrder};
