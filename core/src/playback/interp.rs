//! Cubic Hermite interpolation between tick samples
//!
//! Every function blends four consecutive control points `p0..p3` and
//! returns a value on the segment `p1..p2`. Tangents are central
//! differences of the neighbours (Catmull-Rom).

use glam::{Vec2, Vec3};

/// Interpolate between `p1` (t = 0) and `p2` (t = 1).
///
/// Returns `p1` exactly at `t = 0` and `p2` exactly at `t = 1`.
pub fn hermite(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    // Halve before subtracting so opposite-signed extremes stay finite
    let m0 = p2 * 0.5 - p0 * 0.5;
    let m1 = p3 * 0.5 - p1 * 0.5;
    let t2 = t * t;
    let t3 = t2 * t;

    (2.0 * t3 - 3.0 * t2 + 1.0) * p1
        + (t3 - 2.0 * t2 + t) * m0
        + (-2.0 * t3 + 3.0 * t2) * p2
        + (t3 - t2) * m1
}

/// Component-wise [`hermite`] over two-component vectors
pub fn hermite_vec2(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    Vec2::new(
        hermite(p0.x, p1.x, p2.x, p3.x, t),
        hermite(p0.y, p1.y, p2.y, p3.y, t),
    )
}

/// Component-wise [`hermite`] over three-component vectors
pub fn hermite_vec3(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        hermite(p0.x, p1.x, p2.x, p3.x, t),
        hermite(p0.y, p1.y, p2.y, p3.y, t),
        hermite(p0.z, p1.z, p2.z, p3.z, t),
    )
}

/// Signed shortest rotation from `a` to `b` in degrees, in `[-180, 180)`
pub fn delta_angle(a: f32, b: f32) -> f32 {
    let delta = b - a;
    delta - ((delta + 180.0) / 360.0).floor() * 360.0
}

/// [`hermite`] over angles in degrees, always sweeping the short way round.
///
/// Neighbours are unwrapped relative to `a1`, so the result is continuous
/// with `a1` but not normalized into `[0, 360)`.
pub fn hermite_angle(a0: f32, a1: f32, a2: f32, a3: f32, t: f32) -> f32 {
    hermite(
        a1 + delta_angle(a1, a0),
        a1,
        a1 + delta_angle(a1, a2),
        a1 + delta_angle(a1, a3),
        t,
    )
}

/// [`hermite_angle`] over (pitch, yaw) pairs
pub fn hermite_angles(a0: Vec2, a1: Vec2, a2: Vec2, a3: Vec2, t: f32) -> Vec2 {
    Vec2::new(
        hermite_angle(a0.x, a1.x, a2.x, a3.x, t),
        hermite_angle(a0.y, a1.y, a2.y, a3.y, t),
    )
}
