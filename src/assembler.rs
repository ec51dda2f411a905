//! Triangle assembly.
//!
//! Walks the scene graph once per frame and turns every visible mesh face
//! into a [`Triangle`]: world positions and normals, clip and NDC
//! coordinates, and pixel coordinates. The full list is built before any
//! triangle is drawn, since shadow rays from one triangle must see all the
//! others regardless of draw order.
//!
//! Triangles are rejected here, never clipped:
//! - any vertex whose view distance lies outside `[near, far]`
//! - back faces, i.e. clockwise in NDC
//! - faces whose indices point past the vertex buffer

use crate::config::RenderConfig;
use crate::math::{Mat4, Vec3, Vec4};
use crate::projection::Projection;
use crate::render::Triangle;
use crate::scene::{NodeKey, SceneGraph};

/// Append this frame's triangles to `out`.
///
/// Each triangle's `index` is its position in `out`.
///
/// # Arguments
/// * `graph` - Scene graph to walk, parents before children
/// * `view` - World to view transform
/// * `projection` - Camera lens and clip planes
/// * `config` - Output resolution
/// * `out` - Triangle list; existing entries are kept
pub fn assemble<'a>(
    graph: &'a SceneGraph,
    view: &Mat4,
    projection: &Projection,
    config: &RenderConfig,
    out: &mut Vec<Triangle<'a>>,
) {
    let view_projection = projection.matrix() * *view;

    // (node, parent world matrix)
    let mut stack: Vec<(NodeKey, Mat4)> = graph
        .roots()
        .iter()
        .rev()
        .map(|&key| (key, Mat4::identity()))
        .collect();

    while let Some((key, parent_world)) = stack.pop() {
        let Some(node) = graph.get(key) else {
            continue;
        };
        let world = parent_world * node.transform.to_matrix();
        stack.extend(node.children().iter().rev().map(|&child| (child, world)));

        if !node.visible || node.meshes.is_empty() {
            continue;
        }

        let normal_matrix = world.normal_matrix();
        for mesh in &node.meshes {
            for face in 0..mesh.triangle_count() {
                let Some(vertices) = mesh.triangle(face) else {
                    log::trace!("mesh '{}' face {face} has an out-of-range index", mesh.name);
                    continue;
                };

                let positions = vertices.map(|v| world.transform_point(v.position));
                let clip = positions.map(|p| view_projection * Vec4::point(p));
                if !clip.iter().all(|c| projection.in_depth_range(c.w)) {
                    continue;
                }

                let ndc = clip.map(Vec4::perspective_divide);
                if is_back_facing(&ndc) {
                    continue;
                }

                let screen = [0, 1, 2].map(|i| {
                    let mut p = to_screen(ndc[i], config);
                    p.z = projection.normalized_distance(clip[i].w);
                    p
                });

                out.push(Triangle {
                    index: out.len(),
                    world: positions,
                    clip,
                    ndc,
                    screen,
                    normals: vertices
                        .map(|v| normal_matrix.transform_vector(v.normal).normalize_or_zero()),
                    uvs: vertices.map(|v| v.uv),
                    centroid: (positions[0] + positions[1] + positions[2]) / 3.0,
                    cast_shadows: node.cast_shadows,
                    receive_shadows: node.receive_shadows,
                    material: &mesh.material,
                });
            }
        }
    }
}

/// Clockwise in NDC (x right, y up), or degenerate with a negative cross.
#[inline]
fn is_back_facing(ndc: &[Vec3; 3]) -> bool {
    let a = ndc[1] - ndc[0];
    let b = ndc[2] - ndc[0];
    a.x * b.y - a.y * b.x < 0.0
}

/// NDC x and y to pixel coordinates with a top-left origin. `z` is left at
/// zero for the caller to fill.
#[inline]
pub(crate) fn to_screen(ndc: Vec3, config: &RenderConfig) -> Vec3 {
    Vec3::new(
        (ndc.x + 1.0) * 0.5 * config.width as f32,
        (1.0 - ndc.y) * 0.5 * config.height as f32,
        0.0,
    )
}
