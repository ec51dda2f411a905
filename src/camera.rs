//! Scene camera.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer; the camera looks down -Z
//!
//! # Modes
//!
//! The camera is bound to a node in the scene graph, which holds its
//! position and orientation.
//!
//! - **Free**: fly-through controls. Yaw turns around world up, pitch around
//!   the camera's own right axis, and movement follows the rotated basis.
//! - **Attached**: no input. The camera looks from its node toward the
//!   node's parent, so parenting it to an object orbits or follows it.

use crate::input::InputState;
use crate::math::{Mat4, Quat, Vec3};
use crate::projection::Projection;
use crate::scene::{NodeKey, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Free,
    Attached,
}

#[derive(Debug, Clone)]
pub struct Camera {
    node: NodeKey,
    mode: CameraMode,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    /// World units per second.
    pub move_speed: f32,
    /// Radians per second for keyboard look.
    pub look_speed: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    // Per-frame look deltas, cleared at the start of every update.
    yaw: f32,
    pitch: f32,
    view: Mat4,
}

impl Camera {
    pub fn new(node: NodeKey, mode: CameraMode) -> Self {
        Self {
            node,
            mode,
            fov: 45.0,
            aspect_ratio: 4.0 / 3.0,
            move_speed: 50.0,
            look_speed: 1.0,
            mouse_sensitivity: 0.002,
            yaw: 0.0,
            pitch: 0.0,
            view: Mat4::identity(),
        }
    }

    pub fn free(node: NodeKey) -> Self {
        Self::new(node, CameraMode::Free)
    }

    pub fn attached(node: NodeKey) -> Self {
        Self::new(node, CameraMode::Attached)
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees;
        self
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    /// View matrix from the most recent [`Camera::update`].
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self, near: f32, far: f32) -> Projection {
        Projection::from_degrees(self.fov, self.aspect_ratio, near, far)
    }

    pub fn world_position(&self, graph: &SceneGraph) -> Vec3 {
        graph.world_position(self.node)
    }

    /// Apply input (free mode) and rebuild the view matrix.
    pub fn update(&mut self, graph: &mut SceneGraph, input: &InputState, dt: f32) {
        if !graph.contains(self.node) {
            log::debug!("camera node {:?} is gone; view left unchanged", self.node);
            return;
        }
        match self.mode {
            CameraMode::Free => {
                self.fly(graph, input, dt);
                self.view = self.free_view(graph);
            }
            CameraMode::Attached => {
                if let Some(view) = self.attached_view(graph) {
                    self.view = view;
                }
            }
        }
    }

    fn fly(&mut self, graph: &mut SceneGraph, input: &InputState, dt: f32) {
        self.yaw = 0.0;
        self.pitch = 0.0;

        let turn = self.look_speed * dt;
        self.yaw += InputState::axis(input.look_left, input.look_right) * turn;
        self.pitch += InputState::axis(input.look_up, input.look_down) * turn;
        self.yaw -= input.mouse_delta.0 as f32 * self.mouse_sensitivity;
        self.pitch -= input.mouse_delta.1 as f32 * self.mouse_sensitivity;

        let Some(node) = graph.get_mut(self.node) else {
            return;
        };
        let transform = &mut node.transform;

        if input.reset_view {
            transform.set_rotation(Quat::IDENTITY);
        }

        if self.yaw != 0.0 || self.pitch != 0.0 {
            let yaw = Quat::from_axis_angle(Vec3::UP, self.yaw);
            let pitch = Quat::from_axis_angle(Vec3::RIGHT, self.pitch);
            transform.set_rotation((yaw * transform.rotation() * pitch).normalize());
        }

        let step = self.move_speed * dt;
        let forward = transform.forward();
        let right = transform.right();
        let up = transform.up();

        let mut delta = Vec3::ZERO;
        delta += forward * (InputState::axis(input.forward, input.back) * step);
        delta += right * (InputState::axis(input.right, input.left) * step);
        delta += up * (InputState::axis(input.up, input.down) * step);
        if delta != Vec3::ZERO {
            transform.translate(delta);
        }
    }

    fn free_view(&self, graph: &SceneGraph) -> Mat4 {
        let world = graph.world_matrix(self.node);
        let eye = world.translation_part();
        let forward = world.transform_vector(Vec3::FORWARD).normalize_or_zero();

        // Looking straight up or down leaves world-up undefined as a
        // reference; use the camera's own up instead.
        let up = if forward.cross(Vec3::UP).magnitude_squared() > 1e-8 {
            Vec3::UP
        } else {
            world.transform_vector(Vec3::UP).normalize_or_zero()
        };
        Mat4::look_at(eye, eye + forward, up)
    }

    fn attached_view(&self, graph: &SceneGraph) -> Option<Mat4> {
        let parent = graph.parent(self.node)?;
        let world = graph.world_matrix(self.node);
        let eye = world.translation_part();
        let target = graph.world_position(parent);
        let to_target = target - eye;
        if to_target.magnitude_squared() <= f32::EPSILON {
            log::debug!("attached camera sits on its parent; view left unchanged");
            return None;
        }

        // Straight above or below the parent: orient by the node's own
        // forward, then world forward, which cannot both be parallel to it.
        let up = [
            Vec3::UP,
            world.transform_vector(Vec3::FORWARD).normalize_or_zero(),
            Vec3::FORWARD,
        ]
        .into_iter()
        .find(|up| to_target.cross(*up).magnitude_squared() > 1e-8)?;
        Some(Mat4::look_at(eye, target, up))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;
    use approx::assert_relative_eq;

    fn free_camera_at(position: Vec3) -> (SceneGraph, Camera) {
        let mut graph = SceneGraph::new();
        let node = graph.add(Node::new("camera").with_position(position));
        (graph, Camera::free(node))
    }

    #[test]
    fn move_forward_translates_by_speed_times_dt() {
        let (mut graph, mut camera) = free_camera_at(Vec3::new(1.0, 2.0, 3.0));
        let before = graph.get(camera.node()).unwrap().transform.rotation();
        let input = InputState {
            forward: true,
            ..InputState::default()
        };
        let dt = 0.016;

        camera.update(&mut graph, &input, dt);

        let node = graph.get(camera.node()).unwrap();
        let moved = node.transform.position() - Vec3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(moved.magnitude(), camera.move_speed * dt, epsilon = 1e-5);
        assert_relative_eq!(moved.normalize().dot(Vec3::FORWARD), 1.0, epsilon = 1e-5);
        assert_eq!(node.transform.rotation(), before);
    }

    #[test]
    fn look_left_yaws_around_world_up() {
        let (mut graph, mut camera) = free_camera_at(Vec3::ZERO);
        let input = InputState {
            look_left: true,
            ..InputState::default()
        };
        camera.update(&mut graph, &input, std::f32::consts::FRAC_PI_2);

        let forward = graph.get(camera.node()).unwrap().transform.forward();
        assert_relative_eq!(forward.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(forward.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn look_deltas_do_not_accumulate_between_frames() {
        let (mut graph, mut camera) = free_camera_at(Vec3::ZERO);
        let look = InputState {
            look_up: true,
            ..InputState::default()
        };
        camera.update(&mut graph, &look, 0.1);
        let after_look = graph.get(camera.node()).unwrap().transform.rotation();
        camera.update(&mut graph, &InputState::default(), 0.1);
        assert_eq!(graph.get(camera.node()).unwrap().transform.rotation(), after_look);
    }

    #[test]
    fn reset_view_restores_identity() {
        let (mut graph, mut camera) = free_camera_at(Vec3::ZERO);
        let look = InputState {
            look_right: true,
            look_down: true,
            ..InputState::default()
        };
        camera.update(&mut graph, &look, 0.3);
        let reset = InputState {
            reset_view: true,
            ..InputState::default()
        };
        camera.update(&mut graph, &reset, 0.3);
        assert_eq!(graph.get(camera.node()).unwrap().transform.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn free_view_maps_eye_to_origin() {
        let (mut graph, mut camera) = free_camera_at(Vec3::new(0.0, 0.0, 10.0));
        camera.update(&mut graph, &InputState::default(), 0.0);
        let p = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(p.z, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn attached_camera_directly_above_parent_looks_down() {
        let mut graph = SceneGraph::new();
        let target = graph.add(Node::new("target"));
        let node = graph
            .add_child(target, Node::new("camera").with_position(Vec3::new(0.0, 10.0, 0.0)))
            .unwrap();
        let mut camera = Camera::attached(node);

        camera.update(&mut graph, &InputState::default(), 0.016);

        assert_ne!(camera.view_matrix(), Mat4::identity());
        let p = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -10.0, epsilon = 1e-4);
        let eye = camera.view_matrix().transform_point(Vec3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(eye.magnitude(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn attached_camera_looks_at_parent() {
        let mut graph = SceneGraph::new();
        let target = graph.add(Node::new("target").with_position(Vec3::new(5.0, 0.0, 0.0)));
        let node = graph
            .add_child(target, Node::new("camera").with_position(Vec3::new(0.0, 2.0, 8.0)))
            .unwrap();
        let mut camera = Camera::attached(node);

        let input = InputState {
            forward: true,
            ..InputState::default()
        };
        camera.update(&mut graph, &input, 1.0);

        // No input-driven motion.
        assert_eq!(graph.world_position(node), Vec3::new(5.0, 2.0, 8.0));
        let p = camera.view_matrix().transform_point(Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert!(p.z < 0.0);
    }
}
