//! Angle and unit helpers shared by both propagation paths.

use std::f64::consts::TAU;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Uses a Euclidean remainder so negative angles (queries before epoch) land
/// in range instead of keeping their sign.
pub fn wrap_degrees(deg: f64) -> f64 {
    wrap(deg, 360.0)
}

/// Wrap an angle in radians into `[0, 2pi)`.
pub fn wrap_radians(rad: f64) -> f64 {
    wrap(rad, TAU)
}

/// True modulo of `value` by a positive `modulus`, result in `[0, modulus)`.
pub fn wrap(value: f64, modulus: f64) -> f64 {
    let r = value.rem_euclid(modulus);
    // rem_euclid rounds tiny negative inputs up to exactly `modulus`
    if r >= modulus { 0.0 } else { r }
}

/// Degrees to radians after wrapping into `[0, 360)`.
pub fn wrapped_radians(deg: f64) -> f64 {
    wrap_degrees(deg).to_radians()
}

/// Rotate `(x, y)` counter-clockwise by `angle` radians.
pub fn rotate_2d(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (s, c) = angle.sin_cos();
    (x * c - y * s, x * s + y * c)
}
