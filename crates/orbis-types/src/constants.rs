//! Numerical tolerances and format constants.

/// Relative tolerance used when comparing floating-point entries.
pub const DOUBLE_COMPARISON_EPSILON: f64 = 1.0e-14;

/// Default relative tolerance for symmetry checks.
pub const DEFAULT_RELATIVE_SYMMETRY_THRESHOLD: f64 = 1.0e-14;

/// Default absolute tolerance for symmetry checks.
pub const DEFAULT_ABSOLUTE_SYMMETRY_THRESHOLD: f64 = 0.0;

/// Eigenvalues above `-DEFAULT_POSITIVITY_THRESHOLD * max(1, |λ_max|)` are
/// accepted as non-negative when validating a positive semi-definite matrix.
pub const DEFAULT_POSITIVITY_THRESHOLD: f64 = 1.0e-10;

/// A pivot (or eigenvalue) below this fraction of the largest one marks the
/// matrix as singular.
pub const DEFAULT_SINGULARITY_THRESHOLD: f64 = 1.0e-12;

/// Version written into persisted matrix envelopes.
pub const FORMAT_VERSION: u32 = 1;
