//! Pixel lighting for triangle rasterization.
//!
//! This module separates per-pixel lighting from the fixed-function part of
//! the rasterizer, similar to how GPUs split rasterization from fragment
//! shaders.
//!
//! # Architecture
//!
//! The rasterizer handles:
//! - Bounding box computation
//! - Edge function evaluation and inside testing
//! - Depth testing
//! - Perspective-correct texture sampling and the final color write
//!
//! The shader handles:
//! - Light accumulation over every light
//! - Shadow rays
//!
//! [`FlatShader`] lights the triangle once before the pixel loop;
//! [`SmoothShader`] lights every covered pixel.

use crate::colors::Color;
use crate::config::RenderConfig;
use crate::light::ResolvedLight;
use crate::lighting;
use crate::math::Vec3;
use crate::render::Triangle;
use crate::shadow::{self, SHADOW_BIAS};

/// Frame-wide inputs shared by every triangle draw.
#[derive(Clone, Copy)]
pub struct ShadingContext<'a> {
    pub config: &'a RenderConfig,
    pub lights: &'a [ResolvedLight<'a>],
    pub camera_position: Vec3,
    /// The frame's full triangle list, for shadow rays.
    pub triangles: &'a [Triangle<'a>],
}

impl ShadingContext<'_> {
    /// Sum of every light's contribution at one surface point.
    ///
    /// When a light's shadow ray is blocked, the running total is halved
    /// after adding that light.
    ///
    /// # Arguments
    /// * `triangle` - The triangle being shaded
    /// * `surface` - World-space point, already offset along the normal
    /// * `normal` - Unit surface normal
    /// * `view_dir` - Unit vector toward the camera
    pub fn accumulate(&self, triangle: &Triangle, surface: Vec3, normal: Vec3, view_dir: Vec3) -> Color {
        let shadows = self.config.raycast_shadows && triangle.receive_shadows;
        let mut color = Color::BLACK;

        for light in self.lights {
            let sample = lighting::evaluate(light, surface);
            color += lighting::shade(self.config.lighting, light, &sample, normal, view_dir);

            if shadows
                && light.light.cast_shadows
                && shadow::is_occluded(
                    triangle,
                    surface,
                    sample.direction,
                    self.triangles,
                    self.config.shadow_draw_distance,
                )
            {
                color = color.halved();
            }
        }
        color
    }
}

/// Trait for per-pixel lighting computations.
///
/// The rasterizer calls `light()` for each pixel that passes the depth
/// test, providing the barycentric coordinates for attribute interpolation.
///
/// # Barycentric Coordinates
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that:
/// - Sum to 1.0 for any point inside the triangle
/// - Represent the "influence" of each vertex on the current pixel
/// - Can be used to interpolate any per-vertex attribute:
///   `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
pub trait PixelShader {
    /// Accumulated light color for a pixel, on the 0..255 scale.
    ///
    /// # Arguments
    /// * `lambda` - Barycentric coordinates [λ₀, λ₁, λ₂] that sum to 1.0
    fn light(&self, lambda: [f32; 3]) -> Color;
}

/// Flat shader - one light color for the whole triangle.
///
/// Lit at the centroid with the averaged vertex normal.
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(ctx: &ShadingContext, triangle: &Triangle) -> Self {
        let normal = triangle.face_normal();
        let surface = triangle.centroid + normal * SHADOW_BIAS;
        let view_dir = (ctx.camera_position - triangle.centroid).normalize_or_zero();
        Self {
            color: ctx.accumulate(triangle, surface, normal, view_dir),
        }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn light(&self, _lambda: [f32; 3]) -> Color {
        self.color
    }
}

/// Smooth shader - full light evaluation per pixel using the interpolated
/// normal and surface position.
pub struct SmoothShader<'s, 'a> {
    ctx: &'s ShadingContext<'a>,
    triangle: &'s Triangle<'a>,
}

impl<'s, 'a> SmoothShader<'s, 'a> {
    pub fn new(ctx: &'s ShadingContext<'a>, triangle: &'s Triangle<'a>) -> Self {
        Self { ctx, triangle }
    }
}

impl PixelShader for SmoothShader<'_, '_> {
    #[inline]
    fn light(&self, lambda: [f32; 3]) -> Color {
        let normal = self.triangle.interpolated_normal(lambda);
        let surface = self.triangle.surface_point(lambda) + normal * SHADOW_BIAS;
        let view_dir = (self.ctx.camera_position - surface).normalize_or_zero();
        self.ctx.accumulate(self.triangle, surface, normal, view_dir)
    }
}
