//! Integration tests for orbis-math collaborators, dispatch and strategies.

use std::sync::Arc;

use orbis_math::dispatch::{difference_kind, product_kind, scalar_add_kind, scalar_multiply_kind, sum_kind};
use orbis_math::precision::{equals_with_relative_tolerance, equals_with_tolerances};
use orbis_math::{
    ops, AnyMatrix, CholeskyStrategy, DecomposedSpdMatrix, DecompositionConfig, DecompositionContext,
    DecompositionStrategy, DenseMatrix, DiagonalMatrix, EigenStrategy, LuStrategy, Matrix, MatrixKind,
    MatrixVisitorMut, StrategyKind, SymmetricMatrix, SymmetricPositiveMatrix, WalkOrder,
};
use orbis_types::{NoDataKind, OrbisError};

fn dense(rows: &[&[f64]]) -> DenseMatrix {
    DenseMatrix::from_rows(rows).unwrap()
}

// ─── DenseMatrix Tests ────────────────────────────────────────

#[test]
fn dense_from_rows_validation() {
    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(matches!(
        DenseMatrix::from_rows(&empty),
        Err(OrbisError::NoData(NoDataKind::Rows))
    ));
    assert!(matches!(
        DenseMatrix::from_rows(&[Vec::<f64>::new()]),
        Err(OrbisError::NoData(NoDataKind::Columns))
    ));
    assert!(matches!(DenseMatrix::new(0, 2), Err(OrbisError::InvalidDimension { .. })));
    assert!(matches!(
        DenseMatrix::from_row_major(2, 2, vec![1.0; 3]),
        Err(OrbisError::DimensionMismatch { actual: 3, expected: 4 })
    ));
}

#[test]
fn dense_arithmetic() {
    let a = dense(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = dense(&[&[0.0, 1.0], &[1.0, 0.0]]);

    assert_eq!(a.multiply(&b).unwrap().data(), vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
    assert_eq!(a.transpose().data(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    assert_eq!(a.add(&b).unwrap().data(), vec![vec![1.0, 3.0], vec![4.0, 4.0]]);
    assert_eq!(a.power(2).unwrap().data(), vec![vec![7.0, 10.0], vec![15.0, 22.0]]);
    assert_eq!(a.operate(&[1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
    assert_eq!(a.pre_multiply_vector(&[1.0, 1.0]).unwrap(), vec![4.0, 6.0]);

    let tall = dense(&[&[1.0], &[2.0], &[3.0]]);
    assert!(matches!(
        a.multiply(&tall),
        Err(OrbisError::DimensionMismatch { actual: 3, expected: 2 })
    ));
}

#[test]
fn dense_entry_mutation() {
    let mut a = DenseMatrix::identity(2).unwrap();
    a.set_entry(0, 1, 5.0).unwrap();
    a.add_to_entry(0, 1, 1.0).unwrap();
    a.multiply_entry(1, 1, 3.0).unwrap();
    assert_eq!(a.data(), vec![vec![1.0, 6.0], vec![0.0, 3.0]]);
    assert!(matches!(a.set_entry(2, 0, 1.0), Err(OrbisError::OutOfRange { .. })));
}

#[test]
fn dense_changing_visitor() {
    struct Doubler {
        visited: usize,
    }
    impl MatrixVisitorMut for Doubler {
        fn visit(&mut self, _row: usize, _column: usize, value: f64) -> f64 {
            self.visited += 1;
            2.0 * value
        }

        fn end(&mut self) -> f64 {
            self.visited as f64
        }
    }

    let mut a = dense(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let visited = a.walk_mut(WalkOrder::Column, &mut Doubler { visited: 0 });
    assert_eq!(visited, 4.0);
    assert_eq!(a.data(), vec![vec![2.0, 4.0], vec![6.0, 8.0]]);

    a.walk_range_mut(WalkOrder::Row, &mut Doubler { visited: 0 }, 1, 1, 0, 1)
        .unwrap();
    assert_eq!(a.data(), vec![vec![2.0, 4.0], vec![12.0, 16.0]]);
}

#[test]
fn dense_serde_is_row_arrays() {
    let a = dense(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
    let back: DenseMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
    assert!(serde_json::from_str::<DenseMatrix>("[]").is_err());
}

// ─── Symmetric Collaborators ──────────────────────────────────

#[test]
fn symmetric_validation() {
    let ok = SymmetricMatrix::from_rows(&[[1.0, 2.0], [2.0, 3.0]]).unwrap();
    assert_eq!(ok.kind(), MatrixKind::Symmetric);

    assert!(matches!(
        SymmetricMatrix::from_rows(&[[1.0, 2.0], [2.5, 3.0]]),
        Err(OrbisError::NonSymmetric { row: 0, col: 1 })
    ));
    assert!(matches!(
        SymmetricMatrix::from_rows(&[[1.0, 2.0, 3.0]]),
        Err(OrbisError::NonSquare { rows: 1, cols: 3 })
    ));

    let loose = SymmetricMatrix::from_dense_with_tolerances(dense(&[&[1.0, 2.0], &[2.1, 3.0]]), 0.0, 0.2).unwrap();
    assert_eq!(loose.get_entry(0, 1).unwrap(), loose.get_entry(1, 0).unwrap());
}

#[test]
fn symmetric_positive_validation() {
    let spd = SymmetricPositiveMatrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
    assert_eq!(spd.kind(), MatrixKind::SymmetricPositive);

    let err = SymmetricPositiveMatrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap_err();
    match err {
        OrbisError::NotPositiveSemiDefinite { eigenvalue } => assert!((eigenvalue + 1.0).abs() < 1e-12),
        other => panic!("unexpected error {other}"),
    }

    let decomposed = spd.to_decomposed().unwrap();
    assert!(decomposed.equals_with_tolerance(&spd, 1e-12, 1e-12));
}

#[test]
fn diagonal_entries() {
    let d = DiagonalMatrix::from_diagonal(vec![1.0, -2.0, 3.0]).unwrap();
    assert_eq!(d.get_entry(1, 1).unwrap(), -2.0);
    assert_eq!(d.get_entry(0, 2).unwrap(), 0.0);
    assert!(!d.is_non_negative());
    assert!(DiagonalMatrix::from_diagonal(Vec::new()).is_err());
    assert_eq!(d, DenseMatrix::from_diagonal(&[1.0, -2.0, 3.0]).unwrap());
}

// ─── Dispatch Table ───────────────────────────────────────────

#[test]
fn sum_kinds() {
    use MatrixKind::*;
    assert_eq!(sum_kind(DecomposedSymmetricPositive, DecomposedSymmetricPositive), DecomposedSymmetricPositive);
    assert_eq!(sum_kind(DecomposedSymmetricPositive, SymmetricPositive), SymmetricPositive);
    assert_eq!(sum_kind(DecomposedSymmetricPositive, Diagonal), Symmetric);
    assert_eq!(sum_kind(Symmetric, DecomposedSymmetricPositive), Symmetric);
    assert_eq!(sum_kind(Diagonal, Diagonal), Diagonal);
    assert_eq!(sum_kind(Dense, DecomposedSymmetricPositive), Dense);
}

#[test]
fn difference_kinds_are_never_positive() {
    use MatrixKind::*;
    assert_eq!(difference_kind(DecomposedSymmetricPositive, DecomposedSymmetricPositive), Symmetric);
    assert_eq!(difference_kind(SymmetricPositive, SymmetricPositive), Symmetric);
    assert_eq!(difference_kind(Diagonal, Diagonal), Diagonal);
    assert_eq!(difference_kind(Symmetric, Dense), Dense);
}

#[test]
fn scalar_kinds_follow_sign() {
    use MatrixKind::*;
    assert_eq!(scalar_add_kind(DecomposedSymmetricPositive, 0.0), DecomposedSymmetricPositive);
    assert_eq!(scalar_add_kind(DecomposedSymmetricPositive, -1.0), Symmetric);
    assert_eq!(scalar_add_kind(Diagonal, 1.0), Symmetric);
    assert_eq!(scalar_add_kind(Dense, 1.0), Dense);
    assert_eq!(scalar_multiply_kind(DecomposedSymmetricPositive, 2.0), DecomposedSymmetricPositive);
    assert_eq!(scalar_multiply_kind(SymmetricPositive, -2.0), Symmetric);
    assert_eq!(scalar_multiply_kind(Diagonal, -2.0), Diagonal);
    assert_eq!(scalar_add_kind(DecomposedSymmetricPositive, f64::NAN), Symmetric);
}

#[test]
fn product_kinds() {
    use MatrixKind::*;
    assert_eq!(product_kind(Diagonal, Diagonal), Diagonal);
    assert_eq!(product_kind(Symmetric, Symmetric), Dense);
    assert_eq!(product_kind(DecomposedSymmetricPositive, DecomposedSymmetricPositive), Dense);
}

// ─── Generic Operations ───────────────────────────────────────

#[test]
fn generic_add_narrows_result() {
    let d1 = DiagonalMatrix::from_diagonal(vec![1.0, 2.0]).unwrap();
    let d2 = DiagonalMatrix::from_diagonal(vec![3.0, 4.0]).unwrap();
    let spd = SymmetricPositiveMatrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
    let sym = SymmetricMatrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();

    match ops::add(&d1, &d2).unwrap() {
        AnyMatrix::Diagonal(d) => assert_eq!(d.diagonal(), &[4.0, 6.0]),
        other => panic!("expected diagonal, got {:?}", other.kind()),
    }
    assert_eq!(ops::add(&spd, &spd).unwrap().kind(), MatrixKind::SymmetricPositive);
    assert_eq!(ops::add(&spd, &sym).unwrap().kind(), MatrixKind::Symmetric);
    assert_eq!(ops::subtract(&spd, &spd).unwrap().kind(), MatrixKind::Symmetric);
    assert_eq!(ops::multiply(&d1, &d2).unwrap().kind(), MatrixKind::Diagonal);
    assert_eq!(ops::multiply(&spd, &spd).unwrap().kind(), MatrixKind::Dense);
}

#[test]
fn generic_add_shape_mismatch_message() {
    let a = DenseMatrix::identity(2).unwrap();
    let b = DenseMatrix::identity(3).unwrap();
    let err = ops::add(&a, &b).unwrap_err();
    assert_eq!(err.to_string(), "got 3x3 but expected 2x2");
}

#[test]
fn generic_predicates() {
    let rotation = dense(&[&[0.0, -1.0], &[1.0, 0.0]]);
    assert!(ops::is_orthogonal(&rotation, 0.0, 0.0));
    assert!(ops::is_antisymmetric(&rotation, 0.0, 0.0));
    assert!(!ops::is_symmetric(&rotation, 0.0, 0.0));
    assert!(!ops::is_diagonal(&rotation, 0.5));
    assert!(!ops::is_orthogonal(&dense(&[&[1.0, 0.0, 0.0]]), 1.0, 1.0));
    assert!(matches!(
        ops::trace(&dense(&[&[1.0, 2.0]])),
        Err(OrbisError::NonSquare { rows: 1, cols: 2 })
    ));
}

// ─── Precision ────────────────────────────────────────────────

#[test]
fn tolerant_comparisons() {
    assert!(equals_with_tolerances(1.0, 1.0 + 1e-12, 0.0, 1e-11));
    assert!(!equals_with_tolerances(1.0, 1.1, 0.0, 1e-3));
    assert!(equals_with_relative_tolerance(100.0, 101.0, 0.01));
    assert!(!equals_with_relative_tolerance(100.0, 102.0, 0.01));
    assert!(equals_with_tolerances(0.0, -0.0, 0.0, 0.0));
}

// ─── Strategies ───────────────────────────────────────────────

#[test]
fn strategies_invert_two_by_two() {
    let m = dense(&[&[4.0, 2.0], &[2.0, 3.0]]);
    // inverse = 1/8 [[3, -2], [-2, 4]]
    let expected = [[0.375, -0.25], [-0.25, 0.5]];
    let strategies: [Box<dyn DecompositionStrategy>; 3] = [
        Box::new(CholeskyStrategy::default()),
        Box::new(EigenStrategy::default()),
        Box::new(LuStrategy::default()),
    ];
    for strategy in &strategies {
        let decomposition = strategy.decompose(&m).unwrap();
        assert!(decomposition.is_non_singular(), "{}", strategy.name());
        let inverse = decomposition.inverse().unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!(
                    (inverse.get_entry(i, j).unwrap() - expected[i][j]).abs() < 1e-12,
                    "{} inverse ({i},{j})",
                    strategy.name()
                );
            }
        }
    }
}

#[test]
fn strategies_flag_singular_matrices() {
    let singular = dense(&[&[1.0, 1.0], &[1.0, 1.0]]);

    match CholeskyStrategy::default().decompose(&singular) {
        Ok(decomposition) => assert!(!decomposition.is_non_singular()),
        Err(err) => assert!(matches!(err, OrbisError::SingularMatrix)),
    }
    let eigen = EigenStrategy::default().decompose(&singular).unwrap();
    assert!(!eigen.is_non_singular());
    assert!(matches!(eigen.inverse(), Err(OrbisError::SingularMatrix)));
    assert!(eigen.inverse_factor_transpose().is_none());

    let lu = LuStrategy::default().decompose(&singular).unwrap();
    assert!(!lu.is_non_singular());
    assert!(matches!(lu.inverse(), Err(OrbisError::SingularMatrix)));
}

#[test]
fn strategies_reject_non_square() {
    let wide = dense(&[&[1.0, 2.0, 3.0]]);
    assert!(matches!(
        CholeskyStrategy::default().decompose(&wide),
        Err(OrbisError::NonSquare { .. })
    ));
}

#[test]
fn cholesky_factor_is_lower() {
    let m = dense(&[&[4.0, 2.0], &[2.0, 3.0]]);
    let factor = CholeskyStrategy::default()
        .decompose(&m)
        .unwrap()
        .inverse_factor_transpose()
        .unwrap();
    // L⁻¹ is lower triangular.
    assert_eq!(factor.get_entry(0, 1).unwrap(), 0.0);
}

// ─── Configuration ────────────────────────────────────────────

#[test]
fn config_defaults_and_presets() {
    let config = DecompositionConfig::default();
    assert_eq!(config.strategy, StrategyKind::Cholesky);
    assert!(config.validate().is_ok());
    assert_eq!(DecompositionConfig::fast(), config);
    assert_eq!(DecompositionConfig::robust().strategy, StrategyKind::Eigen);
    assert_eq!(DecompositionConfig::robust().build_strategy().name(), "eigen");
}

#[test]
fn config_toml_round_trip() {
    let config = DecompositionConfig {
        strategy: StrategyKind::Lu,
        singularity_threshold: 1e-9,
    };
    let text = config.to_toml_string().unwrap();
    let back = DecompositionConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);

    let partial = DecompositionConfig::from_toml_str("strategy = \"eigen\"").unwrap();
    assert_eq!(partial.strategy, StrategyKind::Eigen);
    assert_eq!(partial.singularity_threshold, DecompositionConfig::default().singularity_threshold);
}

#[test]
fn config_rejects_bad_values() {
    assert!(matches!(
        DecompositionConfig::from_toml_str("singularity_threshold = 2.0"),
        Err(OrbisError::InvalidConfig(_))
    ));
    assert!(matches!(
        DecompositionConfig::from_toml_str("singularity_threshold = -1.0"),
        Err(OrbisError::InvalidConfig(_))
    ));
    assert!(matches!(
        DecompositionConfig::from_toml_str("strategy = \"qr\""),
        Err(OrbisError::InvalidConfig(_))
    ));
}

#[test]
fn global_context_can_be_replaced() {
    let m = DecomposedSpdMatrix::from_factor_rows(&[[2.0, 0.0], [1.0, 1.0]]).unwrap();

    let eigen = DecompositionContext::from_config(&DecompositionConfig::robust()).unwrap();
    let previous = DecompositionContext::set_global(eigen);
    assert_eq!(DecompositionContext::global().strategy().name(), "eigen");
    let with_eigen = m.inverse().unwrap();

    DecompositionContext::set_global(previous);
    let explicit = m
        .inverse_with(DecompositionContext::new(Arc::new(CholeskyStrategy::default())).strategy())
        .unwrap();
    assert!(with_eigen.equals_with_tolerance(&explicit, 1e-10, 1e-12));
}
