//! Perspective projection parameters.
//!
//! A [`Projection`] holds the camera's field of view, aspect ratio and clip
//! planes for one frame. Besides the projection matrix it answers the two
//! depth questions the assembler asks about every vertex: is it between the
//! clip planes, and where does it fall between them.

use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near`, `z_far` - Clip plane distances, `0 < z_near < z_far`
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Right-handed perspective matrix with reversed depth.
    ///
    /// Clip `w` is the view-space distance in front of the camera, and NDC
    /// depth runs from +1 at the near plane to -1 at the far plane.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// True if a clip-space `w` lies within `[z_near, z_far]`. NaN is outside.
    #[inline]
    pub fn in_depth_range(&self, w: f32) -> bool {
        w >= self.z_near && w <= self.z_far
    }

    /// Clip-space `w` remapped linearly to `[0, 1]` between the planes.
    #[inline]
    pub fn normalized_distance(&self, w: f32) -> f32 {
        (w - self.z_near) / (self.z_far - self.z_near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_degrees() {
        let p = Projection::from_degrees(90.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(p.fov_y(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_edge_of_fov_maps_to_ndc_edge() {
        let p = Projection::from_degrees(90.0, 2.0, 0.1, 100.0);
        // At distance 1 a 90 degree FOV spans y in [-1, 1] and x in [-2, 2].
        let ndc = (p.matrix() * Vec4::new(2.0, 1.0, -1.0, 1.0)).perspective_divide();
        assert_relative_eq!(ndc.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_depth_range() {
        let p = Projection::from_degrees(60.0, 1.0, 1.0, 11.0);
        assert!(p.in_depth_range(1.0));
        assert!(p.in_depth_range(11.0));
        assert!(!p.in_depth_range(0.5));
        assert!(!p.in_depth_range(-3.0));
        assert!(!p.in_depth_range(f32::NAN));
        assert_relative_eq!(p.normalized_distance(6.0), 0.5);
    }
}
