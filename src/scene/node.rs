use std::sync::Arc;

use slotmap::new_key_type;

use super::behavior::Behavior;
use crate::math::Vec3;
use crate::mesh::Mesh;
use crate::transform::Transform;

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`](super::SceneGraph).
    pub struct NodeKey;
}

/// One node of the transform tree.
///
/// Links to parent and children are owned by the graph and only change
/// through its attach/detach operations.
#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    /// Hides this node's own meshes. Children are still drawn.
    pub visible: bool,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
    pub meshes: Vec<Arc<Mesh>>,
    pub behavior: Option<Behavior>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            cast_shadows: false,
            receive_shadows: false,
            meshes: Vec::new(),
            behavior: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.set_position(position);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: Arc<Mesh>) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_meshes(mut self, meshes: impl IntoIterator<Item = Arc<Mesh>>) -> Self {
        self.meshes.extend(meshes);
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadows = cast;
        self.receive_shadows = receive;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}
