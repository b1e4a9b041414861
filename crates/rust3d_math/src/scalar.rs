//! Scalar helpers shared by every module of the kernel
//!
//! All tolerant comparisons in the workspace (distance region boundaries,
//! containment tests, culling) go through [`EPSILON`], so there is exactly
//! one knob for how much rounding error the kernel absorbs.

/// Tolerance used for every epsilon-aware comparison in the kernel
pub const EPSILON: f32 = 1e-6;

/// Check if two reals are equal within [`EPSILON`]
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Check if two reals are equal within a caller supplied tolerance
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Check if a real is zero within [`EPSILON`]
#[inline]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= EPSILON
}

/// Check if `value` vanishes next to `scale`, within [`EPSILON`] relative
/// to it
///
/// Determinants and pivots are tested this way so a uniformly small but
/// regular matrix is not mistaken for a singular one.
#[inline]
pub fn is_negligible(value: f32, scale: f32) -> bool {
    value.abs() <= EPSILON * scale.abs()
}

/// Reciprocal square root
#[inline]
pub fn inv_sqrt(value: f32) -> f32 {
    debug_assert!(value > 0.0, "inv_sqrt of a non-positive value: {}", value);
    1.0 / value.sqrt()
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Convert radians to degrees
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * (180.0 / std::f32::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + EPSILON * 0.5));
        assert!(!approx_eq(1.0, 1.001));
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(-EPSILON * 0.5));
        assert!(!is_zero(0.01));
    }

    #[test]
    fn test_angle_conversion() {
        assert!((to_radians(180.0) - std::f32::consts::PI).abs() < 0.0001);
        assert!((to_degrees(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 0.0001);
    }

    #[test]
    fn test_inv_sqrt() {
        assert!((inv_sqrt(4.0) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_is_negligible_is_relative() {
        assert!(!is_negligible(1e-6, 1e-6));
        assert!(is_negligible(1e-13, 1e-6));
        assert!(is_negligible(0.0, 0.0));
        assert!(!is_negligible(0.5, 1.0));
    }
}
