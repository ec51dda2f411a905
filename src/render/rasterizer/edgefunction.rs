//! Edge function-based triangle rasterization.
//!
//! This module implements triangle rasterization using the edge function algorithm,
//! which is the foundation of modern GPU rasterization. The algorithm tests each
//! pixel against three edge equations to determine triangle coverage.
//!
//! # Algorithm Overview
//!
//! The edge function algorithm works by:
//! 1. Computing a bounding box around the triangle
//! 2. For each pixel in the bounding box, evaluating three edge functions
//! 3. A pixel is inside the triangle if all edge functions are non-negative
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! # Barycentric Coordinates
//!
//! The edge function values are proportional to barycentric coordinates:
//!
//! ```text
//! lambda_i = E_i(P) / E(v0, v1, v2)
//! ```
//!
//! Where E_i is the edge function for the edge opposite to vertex i.
//!
//! # Winding Order
//!
//! Only triangles with a positive signed area are drawn. The assembler has
//! already culled back faces, so a non-positive area here means the triangle
//! is degenerate or wound the wrong way and nothing is written. There is no
//! top-left fill rule: pixels exactly on a shared edge are covered by both
//! triangles.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::{FlatShader, PixelShader, ShadingContext, SmoothShader};
use crate::colors::modulate;
use crate::config::{ShadingMode, TextureFilter};
use crate::math::Vec3;
use crate::render::framebuffer::FrameBuffer;
use crate::render::Triangle;

/// Computes the edge function value for point P relative to edge (A -> B).
///
/// The edge function is the signed area of the parallelogram formed by
/// vectors (B - A) and (P - A), computed as their 2D cross product:
///
/// ```text
/// E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
/// ```
///
/// # Arguments
///
/// * `a` - Start point of the edge
/// * `b` - End point of the edge
/// * `p` - Point to test against the edge
#[inline]
pub fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates over all pixels in the triangle's bounding box and uses edge
/// functions to decide coverage, then depth-tests, samples the material
/// texture with perspective-correct UVs and modulates it by the shader's
/// light color.
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Draw one assembled triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The triangle to draw
    /// * `buffer` - Color and depth target
    /// * `ctx` - Lights, camera position, configuration and the frame's
    ///   triangle list
    pub fn draw_triangle(triangle: &Triangle, buffer: &mut FrameBuffer, ctx: &ShadingContext) {
        let [s0, s1, s2] = triangle.screen;
        let area = edge_function(s0, s1, s2);
        // Also rejects NaN from degenerate projections.
        if !(area > 0.0) {
            return;
        }

        let filter = ctx.config.texture_filter;
        match ctx.config.shading {
            ShadingMode::Flat => {
                let shader = FlatShader::new(ctx, triangle);
                Self::rasterize_with_shader(triangle, area, buffer, filter, &shader);
            }
            ShadingMode::Smooth => {
                let shader = SmoothShader::new(ctx, triangle);
                Self::rasterize_with_shader(triangle, area, buffer, filter, &shader);
            }
        }
    }

    /// Rasterize a triangle using the provided pixel shader.
    ///
    /// The shader is only invoked for pixels that pass the depth test.
    fn rasterize_with_shader<S: PixelShader>(
        triangle: &Triangle,
        area: f32,
        buffer: &mut FrameBuffer,
        filter: TextureFilter,
        shader: &S,
    ) {
        let [v0, v1, v2] = triangle.screen;

        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Compute bounding box, clipped to framebuffer bounds
        // ─────────────────────────────────────────────────────────────────────
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        let inv_area = 1.0 / area;

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Iterate over all pixels in bounding box
        // ─────────────────────────────────────────────────────────────────────
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = edge_function(v1, v2, p);
                let w1 = edge_function(v2, v0, p);
                let w2 = edge_function(v0, v1, p);
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];

                // ─────────────────────────────────────────────────────────────
                // Step 3: Depth test (greater is nearer)
                // ─────────────────────────────────────────────────────────────
                let depth = triangle.depth(lambda);
                if !buffer.depth_test(x, y, depth) {
                    continue;
                }

                // ─────────────────────────────────────────────────────────────
                // Step 4: Texture, light, write
                // ─────────────────────────────────────────────────────────────
                let uv = triangle.perspective_uv(lambda);
                let texel = triangle.material.sample(uv.x, uv.y, filter);
                let light = shader.light(lambda);
                buffer.write(x, y, depth, modulate(light, texel));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{unpack_rgb, Color};
    use crate::config::RenderConfig;
    use crate::light::{Light, ResolvedLight};
    use crate::material::Material;
    use crate::math::{Vec2, Vec4};
    use crate::render::framebuffer::DEPTH_FAR;
    use crate::scene::{Node, SceneGraph};
    use crate::texture::Texture;
    use std::sync::Arc;

    const W: u32 = 16;
    const H: u32 = 16;

    /// Triangle given directly in screen space with a constant NDC depth
    /// and w = 1.
    fn screen_triangle(points: [(f32, f32); 3], depth: f32, material: &Material) -> Triangle<'_> {
        let screen = points.map(|(x, y)| Vec3::new(x, y, 0.5));
        Triangle {
            index: 0,
            world: screen,
            clip: [Vec4::new(0.0, 0.0, depth, 1.0); 3],
            ndc: [Vec3::new(0.0, 0.0, depth); 3],
            screen,
            normals: [Vec3::new(0.0, 0.0, 1.0); 3],
            uvs: [Vec2::ZERO; 3],
            centroid: (screen[0] + screen[1] + screen[2]) / 3.0,
            cast_shadows: false,
            receive_shadows: false,
            material,
        }
    }

    fn ambient_light(graph: &mut SceneGraph) -> Light {
        Light::directional(graph.add(Node::new("sun"))).with_powers(0.0, 0.0, 1.0)
    }

    fn draw(triangles: &[Triangle], lights: &[ResolvedLight], config: &RenderConfig) -> (Vec<u32>, Vec<f32>) {
        let mut color = vec![0u32; (W * H) as usize];
        let mut depth = vec![DEPTH_FAR; (W * H) as usize];
        {
            let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
            let ctx = ShadingContext {
                config,
                lights,
                camera_position: Vec3::new(8.0, 8.0, 100.0),
                triangles,
            };
            for triangle in triangles {
                EdgeFunctionRasterizer::draw_triangle(triangle, &mut fb, &ctx);
            }
        }
        (color, depth)
    }

    #[test]
    fn test_non_positive_area_writes_nothing() {
        let material = Material::default();
        let mut graph = SceneGraph::new();
        let light = ambient_light(&mut graph);
        let lights = [light.resolve(&graph)];
        let config = RenderConfig::default();

        // Reversed winding: E(v0, v1, v2) < 0.
        let reversed = screen_triangle([(1.0, 1.0), (14.0, 1.0), (1.0, 14.0)], 0.5, &material);
        assert!(edge_function(reversed.screen[0], reversed.screen[1], reversed.screen[2]) < 0.0);
        let (color, depth) = draw(&[reversed], &lights, &config);
        assert!(color.iter().all(|&c| c == 0));
        assert!(depth.iter().all(|&d| d == DEPTH_FAR));

        // Collapsed to a line.
        let line = screen_triangle([(1.0, 1.0), (8.0, 8.0), (14.0, 14.0)], 0.5, &material);
        let (color, _) = draw(&[line], &lights, &config);
        assert!(color.iter().all(|&c| c == 0));

        // Same triangle, drawable winding.
        let forward = screen_triangle([(1.0, 1.0), (1.0, 14.0), (14.0, 1.0)], 0.5, &material);
        let (color, _) = draw(&[forward], &lights, &config);
        assert!(color.iter().any(|&c| c != 0));
    }

    #[test]
    fn test_nearer_triangle_wins_in_any_order() {
        let red = Material::with_texture(Arc::new(Texture::solid(1, 1, Color::rgb(255, 0, 0))));
        let blue = Material::with_texture(Arc::new(Texture::solid(1, 1, Color::rgb(0, 0, 255))));
        let mut graph = SceneGraph::new();
        let light = ambient_light(&mut graph);
        let lights = [light.resolve(&graph)];
        let config = RenderConfig::default();

        let pts = [(0.0, 0.0), (0.0, 16.0), (16.0, 0.0)];
        let near = screen_triangle(pts, 0.9, &red);
        let far = screen_triangle(pts, 0.1, &blue);

        let (a, _) = draw(&[near, far], &lights, &config);
        let (b, _) = draw(&[far, near], &lights, &config);
        let probe = (4 * W + 4) as usize;
        assert_eq!(a[probe], b[probe]);
        let (r, _, bl) = unpack_rgb(a[probe]);
        assert!(r > 0);
        assert_eq!(bl, 0);
    }

    #[test]
    fn test_covers_pixel_centers_only() {
        let material = Material::default();
        let mut graph = SceneGraph::new();
        let light = ambient_light(&mut graph);
        let lights = [light.resolve(&graph)];
        let config = RenderConfig::default();

        // Right triangle covering exactly the pixel centers with x + y <= 7.
        let tri = screen_triangle([(0.0, 0.0), (0.0, 8.0), (8.0, 0.0)], 0.5, &material);
        let (color, _) = draw(&[tri], &lights, &config);
        for y in 0..H {
            for x in 0..W {
                let covered = color[(y * W + x) as usize] != 0;
                let cx = x as f32 + 0.5;
                let cy = y as f32 + 0.5;
                assert_eq!(covered, cx + cy <= 8.0, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_flat_and_smooth_agree_for_uniform_light() {
        let material = Material::default();
        let mut graph = SceneGraph::new();
        let light = ambient_light(&mut graph);
        let lights = [light.resolve(&graph)];
        let tri = screen_triangle([(0.0, 0.0), (0.0, 16.0), (16.0, 0.0)], 0.5, &material);

        let smooth = RenderConfig::default();
        let flat = RenderConfig {
            shading: ShadingMode::Flat,
            ..RenderConfig::default()
        };
        let (a, _) = draw(&[tri], &lights, &smooth);
        let (b, _) = draw(&[tri], &lights, &flat);
        assert_eq!(a, b);
        assert_eq!(unpack_rgb(a[0]), (16, 16, 16));
    }
}
