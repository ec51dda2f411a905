//! Unit quaternions for node orientation.
//!
//! Rotations compose right-to-left like [`Mat4`]: `a * b` applies `b` first.
//! Euler angles are in radians and follow the intrinsic order named by
//! [`EulerOrder`], so `Xyz` means `Rx * Ry * Rz`.

use std::ops::Mul;

use super::mat4::Mat4;
use super::vec3::Vec3;

/// Axis order used when converting between Euler angles and quaternions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EulerOrder {
    #[default]
    Xyz,
    Yxz,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians around `axis`. The axis does not need to be
    /// normalized; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize_or_zero();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    pub fn from_euler(euler: Vec3, order: EulerOrder) -> Self {
        let qx = Self::from_axis_angle(Vec3::RIGHT, euler.x);
        let qy = Self::from_axis_angle(Vec3::UP, euler.y);
        let qz = Self::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), euler.z);
        match order {
            EulerOrder::Xyz => qx * qy * qz,
            EulerOrder::Yxz => qy * qx * qz,
        }
    }

    /// Extracts Euler angles in the given order. Near gimbal lock the last
    /// angle is pinned to zero.
    pub fn to_euler(&self, order: EulerOrder) -> Vec3 {
        let m = self.to_mat4();
        match order {
            EulerOrder::Xyz => {
                let m02 = m.get(0, 2).clamp(-1.0, 1.0);
                let y = m02.asin();
                if m02.abs() < 0.999_999 {
                    Vec3::new(
                        (-m.get(1, 2)).atan2(m.get(2, 2)),
                        y,
                        (-m.get(0, 1)).atan2(m.get(0, 0)),
                    )
                } else {
                    Vec3::new(m.get(2, 1).atan2(m.get(1, 1)), y, 0.0)
                }
            }
            EulerOrder::Yxz => {
                let m12 = m.get(1, 2).clamp(-1.0, 1.0);
                let x = (-m12).asin();
                if m12.abs() < 0.999_999 {
                    Vec3::new(
                        x,
                        m.get(0, 2).atan2(m.get(2, 2)),
                        m.get(1, 0).atan2(m.get(1, 1)),
                    )
                } else {
                    Vec3::new(x, (-m.get(2, 0)).atan2(m.get(0, 0)), 0.0)
                }
            }
        }
    }

    /// Builds a quaternion from the rotation part of an affine matrix.
    ///
    /// Scale is divided out of each basis column first, so world matrices
    /// with non-unit scale are accepted.
    pub fn from_rotation_matrix(matrix: &Mat4) -> Self {
        let column = |c: usize| {
            Vec3::new(matrix.get(0, c), matrix.get(1, c), matrix.get(2, c)).normalize_or_zero()
        };
        let (c0, c1, c2) = (column(0), column(1), column(2));
        let (m00, m01, m02) = (c0.x, c1.x, c2.x);
        let (m10, m11, m12) = (c0.y, c1.y, c2.y);
        let (m20, m21, m22) = (c0.z, c1.z, c2.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(0.25 / s, (m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        };
        q.normalize()
    }

    pub fn magnitude(&self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the unit quaternion, or the identity if the magnitude is zero.
    pub fn normalize(&self) -> Self {
        let m = self.magnitude();
        if m <= f32::EPSILON {
            return Self::IDENTITY;
        }
        Self::new(self.w / m, self.x / m, self.y / m, self.z / m)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Rotates a vector by this quaternion.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Spherical interpolation along the shorter arc.
    pub fn slerp(&self, other: Self, t: f32) -> Self {
        let mut end = other;
        let mut cos_half = self.dot(other);
        if cos_half < 0.0 {
            end = Self::new(-other.w, -other.x, -other.y, -other.z);
            cos_half = -cos_half;
        }

        // Nearly parallel: fall back to normalized lerp.
        if cos_half > 0.9995 {
            return Self::new(
                self.w + (end.w - self.w) * t,
                self.x + (end.x - self.x) * t,
                self.y + (end.y - self.y) * t,
                self.z + (end.z - self.z) * t,
            )
            .normalize();
        }

        let half = cos_half.acos();
        let sin_half = half.sin();
        let a = ((1.0 - t) * half).sin() / sin_half;
        let b = (t * half).sin() / sin_half;
        Self::new(
            self.w * a + end.w * b,
            self.x * a + end.x * b,
            self.y * a + end.y * b,
            self.z * a + end.z * b,
        )
    }

    pub fn to_mat4(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;
        Mat4::new([
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - w * z),
                2.0 * (x * z + w * y),
                0.0,
            ],
            [
                2.0 * (x * y + w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - w * x),
                0.0,
            ],
            [
                2.0 * (x * z - w * y),
                2.0 * (y * z + w * x),
                1.0 - 2.0 * (x * x + y * y),
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// Hamilton product: `a * b` rotates by `b`, then by `a`.
impl Mul<Quat> for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Self::Output {
        Quat::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn test_axis_angle_rotates_counter_clockwise() {
        let q = Quat::from_axis_angle(Vec3::UP, FRAC_PI_2);
        // +90 degrees around Y turns -Z into -X.
        assert_vec3_eq(q * Vec3::FORWARD, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_matrix_matches_vector_rotation() {
        let q = Quat::from_euler(Vec3::new(0.3, -0.7, 1.1), EulerOrder::Xyz);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec3_eq(q.to_mat4().transform_point(v), q * v);
    }

    #[test]
    fn test_euler_round_trip_xyz() {
        let euler = Vec3::new(0.4, -0.2, 0.9);
        let back = Quat::from_euler(euler, EulerOrder::Xyz).to_euler(EulerOrder::Xyz);
        assert_vec3_eq(back, euler);
    }

    #[test]
    fn test_euler_round_trip_yxz() {
        let euler = Vec3::new(-0.3, 1.2, 0.5);
        let back = Quat::from_euler(euler, EulerOrder::Yxz).to_euler(EulerOrder::Yxz);
        assert_vec3_eq(back, euler);
    }

    #[test]
    fn test_from_rotation_matrix_ignores_scale() {
        let q = Quat::from_euler(Vec3::new(0.1, 2.0, -0.5), EulerOrder::Xyz);
        let m = q.to_mat4() * Mat4::scaling(2.0, 3.0, 0.5);
        let recovered = Quat::from_rotation_matrix(&m);
        let v = Vec3::new(0.5, -1.0, 2.0);
        assert_vec3_eq(recovered * v, q * v);
    }

    #[test]
    fn test_slerp_halfway() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::UP, FRAC_PI_2);
        let mid = a.slerp(b, 0.5);
        let expected = Quat::from_axis_angle(Vec3::UP, FRAC_PI_2 * 0.5);
        assert_relative_eq!(mid.dot(expected).abs(), 1.0, epsilon = 1e-5);
    }
}
