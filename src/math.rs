#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Degrees in a full turn.
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Hours in a full turn of sidereal or solar time.
pub const FULL_TURN_HOURS: f64 = 24.0;

/// Wraps `value` into the half-open range `[0, modulus)`.
///
/// Unlike Rust's `%` operator, negative operands land in range as well, which
/// matters for hour-angle deltas driven by western longitudes.
///
/// The result is idempotent: wrapping an already wrapped value returns it unchanged.
///
/// # Examples
///
/// ```
/// use solar_ephemeris::math::wrap;
///
/// assert_eq!(wrap(370.0, 360.0), 10.0);
/// assert_eq!(wrap(-30.0, 360.0), 330.0);
/// assert_eq!(wrap(25.5, 24.0), 1.5);
/// ```
pub fn wrap(value: f64, modulus: f64) -> f64 {
    let mut limited = value % modulus;
    if limited < 0.0 {
        limited += modulus;
    }
    // a tiny negative remainder can round up to the modulus itself
    if limited >= modulus {
        limited = 0.0;
    }
    // exact negative multiples leave -0.0
    limited + 0.0
}

/// Normalizes an angle in degrees to the range [0, 360).
pub fn wrap_degrees(degrees: f64) -> f64 {
    wrap(degrees, FULL_TURN_DEGREES)
}

/// Normalizes a time of day or sidereal time in hours to the range [0, 24).
pub fn wrap_hours(hours: f64) -> f64 {
    wrap(hours, FULL_TURN_HOURS)
}

/// Converts degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}
