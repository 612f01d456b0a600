//! Diagonal matrix collaborator.

use serde::{Deserialize, Serialize};

use orbis_types::{NoDataKind, OrbisError, OrbisResult};

use crate::checks;
use crate::dense::DenseMatrix;
use crate::matrix::{Matrix, MatrixKind, MatrixRef};

/// Square matrix with non-zero entries only on its diagonal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct DiagonalMatrix {
    diagonal: Vec<f64>,
}

impl DiagonalMatrix {
    /// Zero diagonal matrix of dimension `n`.
    pub fn new(n: usize) -> OrbisResult<Self> {
        checks::check_dimension(n)?;
        Ok(Self {
            diagonal: vec![0.0; n],
        })
    }

    /// Diagonal matrix with the given diagonal entries.
    pub fn from_diagonal(diagonal: Vec<f64>) -> OrbisResult<Self> {
        if diagonal.is_empty() {
            return Err(OrbisError::NoData(NoDataKind::Rows));
        }
        Ok(Self { diagonal })
    }

    /// Keeps only the diagonal of a square dense matrix.
    pub(crate) fn from_dense_diagonal(dense: &DenseMatrix) -> Self {
        let n = dense.row_dimension().min(dense.column_dimension());
        Self {
            diagonal: (0..n).map(|i| dense.entry_at(i, i)).collect(),
        }
    }

    /// Diagonal entries.
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Returns the entry at `(row, col)`.
    pub fn get_entry(&self, row: usize, col: usize) -> OrbisResult<f64> {
        checks::check_entry_index(self, row, col)?;
        Ok(self.entry_at(row, col))
    }

    /// Whether every diagonal entry is non-negative.
    pub fn is_non_negative(&self) -> bool {
        self.diagonal.iter().all(|&d| d >= 0.0)
    }
}

impl Matrix for DiagonalMatrix {
    fn row_dimension(&self) -> usize {
        self.diagonal.len()
    }

    fn column_dimension(&self) -> usize {
        self.diagonal.len()
    }

    fn entry_at(&self, row: usize, col: usize) -> f64 {
        if row == col {
            self.diagonal[row]
        } else {
            0.0
        }
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::Diagonal
    }

    fn view(&self) -> MatrixRef<'_> {
        MatrixRef::Diagonal(self)
    }
}

impl TryFrom<Vec<f64>> for DiagonalMatrix {
    type Error = OrbisError;

    fn try_from(diagonal: Vec<f64>) -> OrbisResult<Self> {
        Self::from_diagonal(diagonal)
    }
}

impl From<DiagonalMatrix> for Vec<f64> {
    fn from(m: DiagonalMatrix) -> Self {
        m.diagonal
    }
}
