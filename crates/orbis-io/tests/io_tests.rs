//! Integration tests for orbis-io.

use std::path::{Path, PathBuf};

use orbis_io::contract::{MatrixSummary, PersistedMatrix};
use orbis_io::store::{self, StorageFormat};
use orbis_io::validator::validate_persisted;
use orbis_math::{DecomposedSpdMatrix, Matrix};
use orbis_types::constants::FORMAT_VERSION;
use orbis_types::{NoDataKind, OrbisError};

fn sample_matrix() -> DecomposedSpdMatrix {
    DecomposedSpdMatrix::from_factor_rows(&[
        vec![1.0, 2.0, 0.0],
        vec![0.0, 1.0, -1.0],
        vec![3.0, 0.5, 2.0],
        vec![-1.0, 0.0, 4.0],
    ])
    .unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("orbis-io-{}-{name}", std::process::id()))
}

fn envelope(rows: Option<Vec<Vec<f64>>>, dimension: usize) -> PersistedMatrix {
    PersistedMatrix {
        format_version: FORMAT_VERSION,
        dimension,
        factor_transpose: rows,
    }
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn persisted_matrix_keeps_factor() {
    let m = sample_matrix();
    let persisted = PersistedMatrix::from_matrix(&m);
    assert_eq!(persisted.format_version, FORMAT_VERSION);
    assert_eq!(persisted.dimension, 3);
    assert_eq!(persisted.factor_transpose.as_ref().map(Vec::len), Some(4));

    let rebuilt = persisted.into_matrix().unwrap();
    assert_eq!(rebuilt.transparent_dimension(), 4);
    assert_eq!(rebuilt.data(), m.data());
}

#[test]
fn summary_reports_matrix_properties() {
    let m = sample_matrix();
    let summary = MatrixSummary::from_matrix(&m);
    assert_eq!(summary.dimension, 3);
    assert_eq!(summary.transparent_dimension, 4);
    assert!((summary.trace - m.trace()).abs() < 1e-12);
    assert!((summary.frobenius_norm - m.frobenius_norm()).abs() < 1e-12);
    assert!(summary.min <= summary.max);
    assert!(!summary.is_diagonal);
}

#[test]
fn identity_summary_is_diagonal() {
    let m = DecomposedSpdMatrix::create_identity_matrix(3).unwrap();
    let summary = MatrixSummary::from_matrix(&m);
    assert!(summary.is_diagonal);
    assert!((summary.trace - 3.0).abs() < 1e-12);
    assert!((summary.norm - 1.0).abs() < 1e-12);
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_envelope_passes() {
    let persisted = PersistedMatrix::from_matrix(&sample_matrix());
    assert!(validate_persisted(&persisted).is_ok());
}

#[test]
fn missing_factor_is_null_argument() {
    let err = validate_persisted(&envelope(None, 2)).unwrap_err();
    assert!(matches!(err, OrbisError::NullArgument("factor_transpose")));
}

#[test]
fn empty_factor_has_no_data() {
    let err = validate_persisted(&envelope(Some(vec![]), 2)).unwrap_err();
    assert!(matches!(err, OrbisError::NoData(NoDataKind::Rows)));

    let err = validate_persisted(&envelope(Some(vec![vec![]]), 0)).unwrap_err();
    assert!(matches!(err, OrbisError::NoData(NoDataKind::Columns)));
}

#[test]
fn ragged_factor_rejected() {
    let rows = vec![vec![1.0, 2.0], vec![3.0]];
    let err = validate_persisted(&envelope(Some(rows), 2)).unwrap_err();
    assert!(matches!(err, OrbisError::DimensionMismatch { actual: 1, expected: 2 }));
}

#[test]
fn dimension_must_match_rows() {
    let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let err = validate_persisted(&envelope(Some(rows), 3)).unwrap_err();
    assert!(matches!(err, OrbisError::DimensionMismatch { actual: 2, expected: 3 }));
}

#[test]
fn non_finite_entry_rejected() {
    let rows = vec![vec![1.0, f64::NAN]];
    let err = validate_persisted(&envelope(Some(rows), 2)).unwrap_err();
    assert!(matches!(err, OrbisError::Serialization(_)));
}

#[test]
fn future_version_rejected() {
    let mut persisted = PersistedMatrix::from_matrix(&sample_matrix());
    persisted.format_version = FORMAT_VERSION + 1;
    assert!(matches!(
        persisted.into_matrix().unwrap_err(),
        OrbisError::Serialization(_)
    ));
}

// ─── Store Tests ──────────────────────────────────────────────

#[test]
fn format_from_extension() {
    assert_eq!(StorageFormat::from_path(Path::new("m.json")).unwrap(), StorageFormat::Json);
    assert_eq!(StorageFormat::from_path(Path::new("m.bin")).unwrap(), StorageFormat::Binary);
    assert_eq!(StorageFormat::from_path(Path::new("m.orbis")).unwrap(), StorageFormat::Binary);
    assert!(matches!(
        StorageFormat::from_path(Path::new("m.csv")),
        Err(OrbisError::InvalidConfig(_))
    ));
    assert!(StorageFormat::from_path(Path::new("matrix")).is_err());
}

#[test]
fn json_round_trip() {
    let persisted = PersistedMatrix::from_matrix(&sample_matrix());
    let json = store::to_json(&persisted).unwrap();
    assert!(json.contains("factor_transpose"));
    let recovered = store::from_json(&json).unwrap();
    assert_eq!(recovered, persisted);
}

#[test]
fn json_with_null_factor_fails_on_load() {
    let json = r#"{"format_version": 1, "dimension": 2, "factor_transpose": null}"#;
    let persisted = store::from_json(json).unwrap();
    assert!(matches!(
        persisted.into_matrix().unwrap_err(),
        OrbisError::NullArgument(_)
    ));
}

#[test]
fn malformed_json_is_serialization_error() {
    assert!(matches!(
        store::from_json("{not json"),
        Err(OrbisError::Serialization(_))
    ));
}

#[test]
fn binary_round_trip() {
    let persisted = PersistedMatrix::from_matrix(&sample_matrix());
    let bytes = store::to_bytes(&persisted).unwrap();
    assert!(!bytes.is_empty());
    let recovered = store::from_bytes(&bytes).unwrap();
    assert_eq!(recovered, persisted);
}

#[test]
fn truncated_binary_is_serialization_error() {
    let persisted = PersistedMatrix::from_matrix(&sample_matrix());
    let bytes = store::to_bytes(&persisted).unwrap();
    assert!(matches!(
        store::from_bytes(&bytes[..bytes.len() / 2]),
        Err(OrbisError::Serialization(_))
    ));
}

#[test]
fn file_round_trip_both_formats() {
    let m = sample_matrix();
    for name in ["round.json", "round.orbis"] {
        let path = temp_path(name);
        store::save(&path, &m).unwrap();
        let loaded = store::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.dimension(), m.dimension());
        assert_eq!(loaded.bt().data(), m.bt().data());
        assert!(loaded.equals_with_tolerance(&m, 0.0, 0.0));
        assert!((loaded.entry_at(0, 2) - m.entry_at(0, 2)).abs() < 1e-12);
    }
}

#[test]
fn load_missing_file_is_io_error() {
    let path = temp_path("missing.json");
    assert!(matches!(store::load(&path), Err(OrbisError::Io(_))));
}
