//! Scene graph and the bundle of everything needed to draw a frame.
//!
//! A [`Scene`] owns the node forest, the light list, the camera and the
//! background color. Lights and the camera refer to nodes by [`NodeKey`], so
//! they move with whatever they are attached to.

mod behavior;
mod graph;
mod node;

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

pub use behavior::{Behavior, HelicopterControls, NodeBehavior};
pub use graph::SceneGraph;
pub use node::{Node, NodeKey};

use crate::camera::Camera;
use crate::colors::Color;
use crate::light::{Light, ResolvedLight};
use crate::material::Material;
use crate::math::{EulerOrder, Vec3};
use crate::mesh::Mesh;
use crate::texture::Texture;

/// Name of the node created for the default free camera.
pub const CAMERA_NODE: &str = "camera";

#[derive(Debug)]
pub struct Scene {
    pub graph: SceneGraph,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with a free camera at the origin looking down -Z.
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let camera_node = graph.add(Node::new(CAMERA_NODE));
        Self {
            graph,
            lights: Vec::new(),
            camera: Camera::free(camera_node),
            background: Color::rgb(80, 80, 80),
        }
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }

    /// Place every light whose node still exists in world space.
    pub fn resolve_lights(&self) -> Vec<ResolvedLight<'_>> {
        self.lights
            .iter()
            .filter(|light| {
                let present = self.graph.contains(light.node);
                if !present {
                    log::debug!("light node {:?} is gone; light skipped", light.node);
                }
                present
            })
            .map(|light| light.resolve(&self.graph))
            .collect()
    }

    /// Procedural scene: a floor, a spinning cube with a smaller cube
    /// orbiting it, and red, green and blue shadow-casting lights.
    pub fn demo() -> Self {
        let mut scene = Self::new();
        let graph = &mut scene.graph;

        let camera = scene.camera.node();
        if let Some(node) = graph.get_mut(camera) {
            node.transform
                .set_position_xyz(0.0, 4.0, 14.0)
                .set_euler(Vec3::new(-0.25, 0.0, 0.0), EulerOrder::Yxz);
        }

        let floor_material =
            Material::with_texture(Arc::new(Texture::solid(1, 1, Color::rgb(200, 200, 200))));
        let mut floor = Node::new("floor")
            .with_mesh(Arc::new(Mesh::quad(20.0, 20.0, floor_material)))
            .with_shadows(false, true);
        floor
            .transform
            .set_euler(Vec3::new(-FRAC_PI_2, 0.0, 0.0), EulerOrder::Xyz);
        graph.add(floor);

        let cube_material =
            Material::with_texture(Arc::new(Texture::solid(1, 1, Color::rgb(230, 180, 90))));
        let cube = graph.add(
            Node::new("cube")
                .with_position(Vec3::new(0.0, 1.5, 0.0))
                .with_mesh(Arc::new(Mesh::cube(2.0, cube_material)))
                .with_shadows(true, true)
                .with_behavior(Behavior::Spin {
                    rate: Vec3::new(0.0, 0.8, 0.0),
                }),
        );

        let moon_material =
            Material::with_texture(Arc::new(Texture::solid(1, 1, Color::rgb(120, 160, 230))));
        let moon = Node::new("moon")
            .with_position(Vec3::new(3.0, 0.5, 0.0))
            .with_mesh(Arc::new(Mesh::cube(0.8, moon_material)))
            .with_shadows(true, true);
        if let Err(err) = graph.add_child(cube, moon) {
            log::warn!("demo scene: {err}");
        }

        let red = graph.add(Node::new("red light").with_position(Vec3::new(-8.0, 10.0, 6.0)));
        let green = graph.add(Node::new("green light").with_position(Vec3::new(8.0, 6.0, 4.0)));
        let mut blue_node = Node::new("blue light").with_position(Vec3::new(0.0, 9.0, 0.0));
        blue_node
            .transform
            .set_euler(Vec3::new(-FRAC_PI_2, 0.0, 0.0), EulerOrder::Xyz);
        let blue = graph.add(blue_node);

        scene
            .add_light(
                Light::directional(red)
                    .with_colors(
                        Color::rgb(60, 20, 20),
                        Color::rgb(220, 90, 90),
                        Color::rgb(255, 200, 200),
                    )
                    .with_powers(0.8, 0.6, 16.0)
                    .with_shadows(true),
            )
            .add_light(
                Light::point(green, 0.01)
                    .with_colors(
                        Color::rgb(20, 60, 20),
                        Color::rgb(90, 220, 90),
                        Color::rgb(200, 255, 200),
                    )
                    .with_powers(0.8, 0.6, 16.0)
                    .with_shadows(true),
            )
            .add_light(
                Light::spot(blue, 35f32.to_radians(), 0.3)
                    .with_colors(
                        Color::rgb(20, 20, 60),
                        Color::rgb(90, 90, 220),
                        Color::rgb(200, 200, 255),
                    )
                    .with_powers(1.0, 0.8, 32.0)
                    .with_shadows(true),
            );

        log::info!(
            "demo scene: {} nodes, {} lights",
            scene.graph.len(),
            scene.lights.len()
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_has_camera_node() {
        let scene = Scene::new();
        assert_eq!(scene.graph.len(), 1);
        assert_eq!(scene.graph.find_by_name(CAMERA_NODE), Some(scene.camera.node()));
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_demo_scene_layout() {
        let scene = Scene::demo();
        assert_eq!(scene.lights.len(), 3);
        assert!(scene.lights.iter().all(|l| l.cast_shadows));

        let cube = scene.graph.find_by_name("cube").unwrap();
        let moon = scene.graph.find_by_name("moon").unwrap();
        assert_eq!(scene.graph.parent(moon), Some(cube));
        assert!(matches!(
            scene.graph.get(cube).unwrap().behavior,
            Some(Behavior::Spin { .. })
        ));
        assert_eq!(scene.resolve_lights().len(), 3);
    }

    #[test]
    fn test_lights_on_removed_nodes_are_skipped() {
        let mut scene = Scene::new();
        let a = scene.graph.add(Node::new("a"));
        let b = scene.graph.add(Node::new("b"));
        scene
            .add_light(Light::directional(a))
            .add_light(Light::directional(b));
        scene.graph.remove(a);

        let resolved = scene.resolve_lights();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].light.node, b);
    }
}
