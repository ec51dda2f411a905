//! Light sources.
//!
//! A [`Light`] takes its position and orientation from a node in the scene
//! graph, so lights can be parented to moving objects. Before drawing, each
//! light is resolved once per frame into a [`ResolvedLight`] holding its
//! world-space position and cone axis.

use crate::colors::Color;
use crate::math::Vec3;
use crate::scene::{NodeKey, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    /// Unattenuated light whose direction is taken from the light's position.
    #[default]
    Directional,
    /// Omnidirectional light with distance falloff.
    Point,
    /// Point light restricted to a cone around the node's forward axis.
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub node: NodeKey,
    pub diffuse_power: f32,
    pub specular_power: f32,
    pub shininess: f32,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub cast_shadows: bool,
    /// Quadratic falloff factor for point and spot lights.
    pub decay: f32,
    /// Spot half-angle in radians.
    pub angle: f32,
    /// Fraction of the spot angle, in [0, 1], that fades out.
    pub penumbra: f32,
}

impl Light {
    pub fn new(kind: LightKind, node: NodeKey) -> Self {
        Self {
            kind,
            node,
            diffuse_power: 1.0,
            specular_power: 1.0,
            shininess: 1.0,
            ambient: Color::rgb(80, 80, 80),
            diffuse: Color::rgb(200, 200, 200),
            specular: Color::rgb(255, 255, 255),
            cast_shadows: false,
            decay: 0.0,
            angle: 30f32.to_radians(),
            penumbra: 0.0,
        }
    }

    pub fn directional(node: NodeKey) -> Self {
        Self::new(LightKind::Directional, node)
    }

    pub fn point(node: NodeKey, decay: f32) -> Self {
        Self {
            decay,
            ..Self::new(LightKind::Point, node)
        }
    }

    pub fn spot(node: NodeKey, angle: f32, penumbra: f32) -> Self {
        Self {
            angle,
            penumbra,
            ..Self::new(LightKind::Spot, node)
        }
    }

    pub fn with_colors(mut self, ambient: Color, diffuse: Color, specular: Color) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn with_powers(mut self, diffuse_power: f32, specular_power: f32, shininess: f32) -> Self {
        self.diffuse_power = diffuse_power;
        self.specular_power = specular_power;
        self.shininess = shininess;
        self
    }

    pub fn with_shadows(mut self, cast: bool) -> Self {
        self.cast_shadows = cast;
        self
    }

    /// Snapshot this light's world placement for the current frame.
    pub fn resolve(&self, graph: &SceneGraph) -> ResolvedLight<'_> {
        let world = graph.world_matrix(self.node);
        ResolvedLight {
            light: self,
            position: world.translation_part(),
            axis: world.transform_vector(Vec3::FORWARD).normalize_or_zero(),
        }
    }
}

/// A light placed in world space for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLight<'a> {
    pub light: &'a Light,
    pub position: Vec3,
    /// Node forward (-Z) in world space; the spot cone axis.
    pub axis: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EulerOrder, Vec3};
    use crate::scene::Node;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let mut graph = SceneGraph::new();
        let light = Light::directional(graph.add(Node::new("sun")));
        assert_eq!(light.ambient, Color::rgb(80, 80, 80));
        assert_eq!(light.diffuse, Color::rgb(200, 200, 200));
        assert_eq!(light.specular, Color::WHITE);
        assert_relative_eq!(light.diffuse_power, 1.0);
        assert!(!light.cast_shadows);
    }

    #[test]
    fn test_resolve_follows_parent() {
        let mut graph = SceneGraph::new();
        let mut parent = Node::new("lamp post").with_position(Vec3::new(0.0, 5.0, 0.0));
        parent
            .transform
            .set_euler(Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0), EulerOrder::Xyz);
        let parent = graph.add(parent);
        let node = graph.add_child(parent, Node::new("bulb")).unwrap();

        let light = Light::spot(node, 0.5, 0.2);
        let resolved = light.resolve(&graph);
        assert_eq!(resolved.position, Vec3::new(0.0, 5.0, 0.0));
        // Pitched down a quarter turn: the cone points at the ground.
        assert_relative_eq!(resolved.axis.y, -1.0, epsilon = 1e-5);
    }
}
