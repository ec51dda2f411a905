//! Local transform of a scene node.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation and scale. Rotation is stored as a quaternion; an Euler angle
//! cache is kept in sync with it so behaviors can adjust individual axes.

use crate::math::{EulerOrder, Mat4, Quat, Vec3};

/// A 3D transform with position, quaternion rotation, and scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    euler: Vec3, // Cached Euler angles in radians, in `euler_order`
    euler_order: EulerOrder,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            euler: Vec3::ZERO,
            euler_order: EulerOrder::Xyz,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=identity, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    /// Get the position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Set the position from x, y, z components.
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position += delta;
        self
    }

    // ============ Rotation ============

    /// Get the rotation quaternion.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Set the rotation; the Euler cache is recomputed in the current order.
    pub fn set_rotation(&mut self, rotation: Quat) -> &mut Self {
        self.rotation = rotation.normalize();
        self.euler = self.rotation.to_euler(self.euler_order);
        self
    }

    /// Get the cached Euler angles (radians).
    pub fn euler(&self) -> Vec3 {
        self.euler
    }

    pub fn euler_order(&self) -> EulerOrder {
        self.euler_order
    }

    /// Set the rotation from Euler angles (radians) applied in `order`.
    pub fn set_euler(&mut self, euler: Vec3, order: EulerOrder) -> &mut Self {
        self.euler = euler;
        self.euler_order = order;
        self.rotation = Quat::from_euler(euler, order);
        self
    }

    /// Add a delta to the cached Euler angles and rebuild the rotation.
    pub fn rotate_euler(&mut self, delta: Vec3) -> &mut Self {
        self.set_euler(self.euler + delta, self.euler_order)
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotate_euler(Vec3::new(0.0, angle, 0.0))
    }

    /// Look direction: local forward (-Z) rotated into parent space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::FORWARD
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::RIGHT
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::UP
    }

    // ============ Scale ============

    /// Get the scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the scale.
    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::splat(s);
        self
    }

    // ============ Matrix Generation ============

    /// Generate the local transformation matrix.
    ///
    /// Order: Translation * Rotation * Scale
    /// (Scale applied first, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * self.rotation.to_mat4()
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}
