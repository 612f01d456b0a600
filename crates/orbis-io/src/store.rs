//! JSON and binary storage of persisted matrices.
//!
//! JSON goes through `serde_json` and is meant to be read and edited by
//! hand; the binary form goes through `bincode` and is compact. Files pick
//! their format from the extension.

use std::fs;
use std::path::Path;

use orbis_math::DecomposedSpdMatrix;
use orbis_types::{OrbisError, OrbisResult};

use crate::contract::PersistedMatrix;

/// On-disk encoding of a persisted matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    /// Pretty-printed JSON (`.json`).
    Json,
    /// `bincode` (`.bin`, `.orbis`).
    Binary,
}

impl StorageFormat {
    /// Chooses the format from a file extension.
    ///
    /// # Errors
    /// `InvalidConfig` for a missing or unknown extension.
    pub fn from_path(path: &Path) -> OrbisResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("bin") | Some("orbis") => Ok(Self::Binary),
            other => Err(OrbisError::InvalidConfig(format!(
                "unsupported matrix file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Encodes an envelope.
    pub fn encode(self, persisted: &PersistedMatrix) -> OrbisResult<Vec<u8>> {
        match self {
            Self::Json => to_json(persisted).map(String::into_bytes),
            Self::Binary => to_bytes(persisted),
        }
    }

    /// Decodes an envelope (not yet validated).
    pub fn decode(self, data: &[u8]) -> OrbisResult<PersistedMatrix> {
        match self {
            Self::Json => serde_json::from_slice(data).map_err(|e| OrbisError::Serialization(e.to_string())),
            Self::Binary => from_bytes(data),
        }
    }
}

/// Serializes to pretty JSON.
pub fn to_json(persisted: &PersistedMatrix) -> OrbisResult<String> {
    serde_json::to_string_pretty(persisted).map_err(|e| OrbisError::Serialization(e.to_string()))
}

/// Deserializes from JSON.
pub fn from_json(content: &str) -> OrbisResult<PersistedMatrix> {
    serde_json::from_str(content).map_err(|e| OrbisError::Serialization(e.to_string()))
}

/// Serializes to compact binary format.
pub fn to_bytes(persisted: &PersistedMatrix) -> OrbisResult<Vec<u8>> {
    bincode::serialize(persisted).map_err(|e| OrbisError::Serialization(e.to_string()))
}

/// Deserializes from binary format.
pub fn from_bytes(data: &[u8]) -> OrbisResult<PersistedMatrix> {
    bincode::deserialize(data).map_err(|e| OrbisError::Serialization(format!("matrix deserialization failed: {e}")))
}

/// Writes `matrix` to `path`, in the format its extension names.
pub fn save(path: impl AsRef<Path>, matrix: &DecomposedSpdMatrix) -> OrbisResult<()> {
    let path = path.as_ref();
    let format = StorageFormat::from_path(path)?;
    let data = format.encode(&PersistedMatrix::from_matrix(matrix))?;
    fs::write(path, &data)?;
    tracing::debug!(path = %path.display(), ?format, bytes = data.len(), "saved matrix");
    Ok(())
}

/// Reads, validates and rebuilds the matrix stored at `path`.
pub fn load(path: impl AsRef<Path>) -> OrbisResult<DecomposedSpdMatrix> {
    let path = path.as_ref();
    let format = StorageFormat::from_path(path)?;
    let data = fs::read(path)?;
    let matrix = format.decode(&data)?.into_matrix()?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        dimension = matrix.dimension(),
        transparent_dimension = matrix.transparent_dimension(),
        "loaded matrix"
    );
    Ok(matrix)
}
