//! # orbis-io
//!
//! Persistence boundary for decomposed matrices.
//!
//! Defines the versioned envelope that leaves the process (files, other
//! tools), checks it before anything is built from it, and stores it as
//! JSON or compact binary.

pub mod contract;
pub mod store;
pub mod validator;

pub use contract::{MatrixSummary, PersistedMatrix};
pub use store::{load, save, StorageFormat};
pub use validator::validate_persisted;
