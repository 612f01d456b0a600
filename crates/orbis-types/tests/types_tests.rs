//! Integration tests for orbis-types.

use orbis_types::{IndexKind, NoDataKind, OrbisError};

// ─── Message Tests ─────────────────────────────────────────────

#[test]
fn unsupported_operation_message() {
    let err = OrbisError::UnsupportedOperation;
    assert_eq!(err.to_string(), "unsupported operation");
}

#[test]
fn no_data_messages_are_distinct() {
    let rows = OrbisError::NoData(NoDataKind::Rows).to_string();
    let cols = OrbisError::NoData(NoDataKind::Columns).to_string();
    assert_eq!(rows, "matrix must have at least one row");
    assert_eq!(cols, "matrix must have at least one column");
    assert_ne!(rows, cols);
}

#[test]
fn dimension_mismatch_carries_both_values() {
    let err = OrbisError::DimensionMismatch {
        actual: 3,
        expected: 4,
    };
    let msg = err.to_string();
    assert!(msg.contains('3'));
    assert!(msg.contains('4'));
}

#[test]
fn matrix_dimension_mismatch_message() {
    let err = OrbisError::MatrixDimensionMismatch {
        actual: (2, 3),
        expected: (4, 4),
    };
    assert_eq!(err.to_string(), "got 2x3 but expected 4x4");
}

#[test]
fn out_of_range_message() {
    let err = OrbisError::OutOfRange {
        kind: IndexKind::Column,
        index: 7,
        min: 0,
        max: 3,
    };
    assert_eq!(err.to_string(), "column index 7 out of allowed range [0, 3]");
}

#[test]
fn invalid_range_message() {
    let err = OrbisError::InvalidRange {
        kind: IndexKind::Row,
        start: 3,
        end: 1,
    };
    assert_eq!(err.to_string(), "initial row 3 after final row 1");
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: OrbisError = io.into();
    assert!(matches!(err, OrbisError::Io(_)));
}

// ─── Kind Tests ───────────────────────────────────────────────

#[test]
fn kinds_are_serializable() {
    let json = serde_json::to_string(&NoDataKind::SelectedRows).unwrap();
    let recovered: NoDataKind = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, NoDataKind::SelectedRows);

    let json = serde_json::to_string(&IndexKind::Row).unwrap();
    let recovered: IndexKind = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, IndexKind::Row);
}
