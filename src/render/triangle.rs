//! Assembled triangle.
//!
//! A [`Triangle`] is everything the rasterizer and the shadow tester need
//! about one mesh face for the current frame. Triangles are rebuilt every
//! frame and borrow their material from the scene.

use crate::material::Material;
use crate::math::{Vec2, Vec3, Vec4};

#[derive(Debug, Clone, Copy)]
pub struct Triangle<'a> {
    /// Position in this frame's triangle list. Shadow rays use it to skip
    /// the receiving triangle.
    pub index: usize,
    /// World-space vertex positions.
    pub world: [Vec3; 3],
    /// Clip-space vertex positions; `w` is the view-space depth.
    pub clip: [Vec4; 3],
    /// Normalized device coordinates; z is +1 at the near plane.
    pub ndc: [Vec3; 3],
    /// Pixel coordinates with a top-left origin. `z` is the view depth
    /// remapped to [0, 1] between the clip planes.
    pub screen: [Vec3; 3],
    /// World-space unit normals.
    pub normals: [Vec3; 3],
    pub uvs: [Vec2; 3],
    pub centroid: Vec3,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
    pub material: &'a Material,
}

impl Triangle<'_> {
    /// Averaged vertex normal, used for flat shading.
    pub fn face_normal(&self) -> Vec3 {
        ((self.normals[0] + self.normals[1] + self.normals[2]) / 3.0).normalize_or_zero()
    }

    /// NDC depth at barycentric weights `lambda`, interpolated linearly in
    /// screen space.
    #[inline]
    pub fn depth(&self, lambda: [f32; 3]) -> f32 {
        lambda[0] * self.ndc[0].z + lambda[1] * self.ndc[1].z + lambda[2] * self.ndc[2].z
    }

    /// Perspective-correct texture coordinate at screen-space weights
    /// `lambda`: attributes are interpolated divided by clip `w`, then
    /// rescaled by the interpolated `1/w`.
    #[inline]
    pub fn perspective_uv(&self, lambda: [f32; 3]) -> Vec2 {
        let inv_w = [
            1.0 / self.clip[0].w,
            1.0 / self.clip[1].w,
            1.0 / self.clip[2].w,
        ];
        let weights = [lambda[0] * inv_w[0], lambda[1] * inv_w[1], lambda[2] * inv_w[2]];
        let w = 1.0 / (weights[0] + weights[1] + weights[2]);
        (self.uvs[0] * weights[0] + self.uvs[1] * weights[1] + self.uvs[2] * weights[2]) * w
    }

    /// Re-normalized normal at barycentric weights `lambda`.
    #[inline]
    pub fn interpolated_normal(&self, lambda: [f32; 3]) -> Vec3 {
        Vec3::barycentric(self.normals, lambda).normalize_or_zero()
    }

    /// World-space point at barycentric weights `lambda`.
    #[inline]
    pub fn surface_point(&self, lambda: [f32; 3]) -> Vec3 {
        Vec3::barycentric(self.world, lambda)
    }
}
