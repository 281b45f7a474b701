//! Derived-metric formulas.
//!
//! Pure functions over already-resolved base values. Absence propagates:
//! a missing operand (or a zero denominator) yields an absent result, never
//! an error. No rounding happens here; presentation formatting is the
//! caller's concern.

/// `numerator / denominator * 100`, absent unless both operands are present
/// and the denominator is non-zero.
pub fn safe_pct(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d * 100.0),
        _ => None,
    }
}

/// `current - previous`, absent if either operand is absent. Zero is a valid
/// result, not an absence.
pub fn safe_delta(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) => Some(c - p),
        _ => None,
    }
}
