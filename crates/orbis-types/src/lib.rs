//! # orbis-types
//!
//! Shared error types and numerical constants for the Orbis matrix crates.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other Orbis crates share.

pub mod constants;
pub mod error;

pub use error::{IndexKind, NoDataKind, OrbisError, OrbisResult};
