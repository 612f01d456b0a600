//! Persisted matrix validation.
//!
//! Checks an envelope before a matrix is built from it, so that a bad file
//! is reported with a precise error instead of a generic parse failure.

use orbis_types::constants::FORMAT_VERSION;
use orbis_types::{NoDataKind, OrbisError, OrbisResult};

use crate::contract::PersistedMatrix;

/// Validates a persisted matrix.
///
/// Checks:
/// - The format version is the one this build writes
/// - The factor is present and has at least one row and one column
/// - Every factor row has `dimension` entries
/// - Every entry is finite
pub fn validate_persisted(persisted: &PersistedMatrix) -> OrbisResult<()> {
    if persisted.format_version != FORMAT_VERSION {
        return Err(OrbisError::Serialization(format!(
            "unsupported format version {} (expected {FORMAT_VERSION})",
            persisted.format_version
        )));
    }

    let rows = persisted
        .factor_transpose
        .as_ref()
        .ok_or(OrbisError::NullArgument("factor_transpose"))?;
    let first = rows.first().ok_or(OrbisError::NoData(NoDataKind::Rows))?;
    if first.is_empty() {
        return Err(OrbisError::NoData(NoDataKind::Columns));
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != persisted.dimension {
            return Err(OrbisError::DimensionMismatch {
                actual: row.len(),
                expected: persisted.dimension,
            });
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(OrbisError::Serialization(format!(
                "non-finite factor entry at ({i}, {j})"
            )));
        }
    }

    Ok(())
}
