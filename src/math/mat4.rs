//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let transform = rotation * scale;  // scale applied first, then rotation
//! let result = transform * vertex;   // transform the vertex
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective matrix.
    ///
    /// The camera looks down -Z and clip `w` equals the view-space distance
    /// in front of the camera. Depth is reversed: NDC z is +1 on the near
    /// plane and -1 on the far plane, so a larger depth is closer.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `near`, `far` - Clip plane distances
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let t = (fov_y / 2.0).tan();
        let range = far - near;
        Mat4::new([
            [1.0 / (aspect_ratio * t), 0.0, 0.0, 0.0],
            [0.0, 1.0 / t, 0.0, 0.0],
            [0.0, 0.0, (far + near) / range, 2.0 * far * near / range],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    ///
    /// # Returns
    ///
    /// A view matrix mapping world space to a camera looking down -Z.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let back = (eye - target).normalize();
        let right = up.cross(back).normalize();
        let up = back.cross(right);

        // Rotation matrix (transpose of basis vectors as rows)
        // Combined with translation to eye position
        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [back.x, back.y, back.z, -back.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation stored in the last column.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.data[0][3], self.data[1][3], self.data[2][3])
    }

    /// Copy of this matrix with the translation column cleared.
    pub fn without_translation(&self) -> Self {
        let mut m = *self;
        m.data[0][3] = 0.0;
        m.data[1][3] = 0.0;
        m.data[2][3] = 0.0;
        m
    }

    /// Column `i` of the upper-left 3x3 block.
    #[inline]
    fn basis(&self, i: usize) -> Vec3 {
        Vec3::new(self.data[0][i], self.data[1][i], self.data[2][i])
    }

    /// Inverse-transpose of the linear part, for transforming normals.
    ///
    /// With basis columns `a`, `b`, `c` this is the matrix whose columns are
    /// `b x c`, `c x a` and `a x b`, divided by the determinant `a . (b x c)`.
    /// Falls back to the linear part itself when it is singular.
    pub fn normal_matrix(&self) -> Self {
        let (a, b, c) = (self.basis(0), self.basis(1), self.basis(2));
        let (bc, ca, ab) = (b.cross(c), c.cross(a), a.cross(b));
        let det = a.dot(bc);
        if det.abs() < f32::EPSILON {
            return self.without_translation();
        }
        let [x, y, z] = [bc / det, ca / det, ab / det];
        Mat4::new([
            [x.x, y.x, z.x, 0.0],
            [x.y, y.y, z.y, 0.0],
            [x.z, y.z, z.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transforms a point (w = 1) without perspective division.
    #[inline]
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::point(v)).to_vec3()
    }

    /// Transforms a direction (w = 0); translation does not apply.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: [f32; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vec4::new(
            row(self.data[0]),
            row(self.data[1]),
            row(self.data[2]),
            row(self.data[3]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_multiplication() {
        let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::rotation_y(0.5);
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(Mat4::identity() * m, m);
    }

    #[test]
    fn test_rotation_y_turns_forward_to_left() {
        let v = Mat4::rotation_y(std::f32::consts::FRAC_PI_2).transform_vector(Vec3::FORWARD);
        assert_relative_eq!(v.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let m = Mat4::translation(3.0, -2.0, 5.0) * Mat4::rotation_x(0.3) * Mat4::rotation_z(1.1);
        let n = m.normal_matrix();
        let r = m.without_translation();
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(n.get(row, col), r.get(row, col), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_singular_normal_matrix_falls_back() {
        let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::scaling(1.0, 0.0, 1.0);
        assert_eq!(m.normal_matrix(), Mat4::scaling(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_look_at_places_target_on_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let p = view.transform_point(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_depth_is_reversed() {
        let (near, far) = (0.1, 300.0);
        let proj = Mat4::perspective(60f32.to_radians(), 4.0 / 3.0, near, far);

        let at_near = proj * Vec4::new(0.0, 0.0, -near, 1.0);
        let at_far = proj * Vec4::new(0.0, 0.0, -far, 1.0);

        assert_relative_eq!(at_near.w, near, epsilon = 1e-6);
        assert_relative_eq!(at_near.perspective_divide().z, 1.0, epsilon = 1e-4);
        assert_relative_eq!(at_far.perspective_divide().z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_normal_matrix_handles_non_uniform_scale() {
        // A plane tilted 45 degrees, squashed along y.
        let m = Mat4::scaling(1.0, 0.5, 1.0);
        let n = m.normal_matrix().transform_vector(Vec3::new(0.0, 1.0, 1.0)).normalize();
        let tangent = m.transform_vector(Vec3::new(0.0, 1.0, -1.0));
        assert_relative_eq!(n.dot(tangent), 0.0, epsilon = 1e-6);
    }
}
