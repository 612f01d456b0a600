//! Tolerant floating-point comparisons.

/// Returns true if `|x - y| <= absolute` or `|x - y| <= relative * max(|x|, |y|)`.
#[inline]
pub fn equals_with_tolerances(x: f64, y: f64, relative: f64, absolute: f64) -> bool {
    if x == y {
        return true;
    }
    let diff = (x - y).abs();
    diff <= absolute || diff <= relative * x.abs().max(y.abs())
}

/// Returns true if `|x - y| <= relative * max(|x|, |y|)`.
#[inline]
pub fn equals_with_relative_tolerance(x: f64, y: f64, relative: f64) -> bool {
    equals_with_tolerances(x, y, relative, 0.0)
}

/// Maps `-0.0` to `0.0` so that equal values share one bit pattern.
#[inline]
pub(crate) fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else {
        x.to_bits()
    }
}
