//! Raycast shadows.
//!
//! There is no acceleration structure: a shadow ray is tested against every
//! shadow-casting triangle of the frame that lies within the configured
//! squared centroid distance of the receiver.

use crate::math::Vec3;
use crate::render::Triangle;

/// Offset along the surface normal applied to shadow ray origins.
pub const SHADOW_BIAS: f32 = 0.01;

const EPSILON: f32 = 1e-6;

/// Möller–Trumbore ray/triangle intersection.
///
/// Returns the ray parameter `t` of the hit, or `None` when the ray is
/// parallel to the triangle, misses it, or hits at `t <= 1e-6`. Both
/// windings are hit.
pub fn intersect_triangle(origin: Vec3, direction: Vec3, vertices: &[Vec3; 3]) -> Option<f32> {
    let [v0, v1, v2] = *vertices;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// True if any other shadow-casting triangle near `receiver` blocks the ray
/// from `origin` along `direction`. Stops at the first hit.
///
/// # Arguments
/// * `receiver` - The triangle being shaded; skipped by index
/// * `origin` - Ray origin, already offset off the surface
/// * `direction` - Unit vector toward the light
/// * `triangles` - The frame's full triangle list
/// * `max_distance_squared` - Occluders whose centroid is farther than this
///   (squared) from the receiver's centroid are ignored
pub fn is_occluded(
    receiver: &Triangle,
    origin: Vec3,
    direction: Vec3,
    triangles: &[Triangle],
    max_distance_squared: f32,
) -> bool {
    triangles
        .iter()
        .filter(|t| t.index != receiver.index && t.cast_shadows)
        .filter(|t| t.centroid.distance_squared(receiver.centroid) <= max_distance_squared)
        .any(|t| intersect_triangle(origin, direction, &t.world).is_some())
}
