//! Free functions over `Vec3` that glam does not provide in the form the
//! renderer needs.
//!
//! These are plain numeric helpers: degenerate input (a zero-length vector
//! passed to `unit_vector`) propagates NaN instead of failing.

use crate::Vec3;

/// Threshold below which a component counts as zero in `near_zero`.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Scale `v` to unit length.
///
/// Callers must guarantee `v` is non-degenerate; a zero vector yields NaN.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// True if every component of `v` is within `NEAR_ZERO_EPSILON` of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices on the incoming side
/// over the outgoing side.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
