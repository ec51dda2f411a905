//! Arena-backed transform forest.
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeKey`]. A
//! node's parent link is a plain key; its children are an ordered key list.
//! Nodes without a parent are roots, kept in insertion order. Every
//! mutation of the links goes through this type so the forest stays
//! acyclic.

use slotmap::SlotMap;

use super::node::{Node, NodeKey};
use crate::error::SceneError;
use crate::input::InputState;
use crate::math::{Mat4, Quat, Vec3};

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map_or(&[], |n| n.children.as_slice())
    }

    /// First node with the given name, in pre-order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.pre_order().into_iter().find(|&k| self.nodes[k].name == name)
    }

    // ============ Structure ============

    /// Insert a node as a new root. Any links already on `node` are dropped.
    pub fn add(&mut self, mut node: Node) -> NodeKey {
        node.parent = None;
        node.children.clear();
        let key = self.nodes.insert(node);
        self.roots.push(key);
        key
    }

    /// Insert a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeKey, node: Node) -> Result<NodeKey, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let key = self.add(node);
        self.attach(key, parent)?;
        Ok(key)
    }

    /// Move `child` (with its subtree) under `parent`.
    ///
    /// Fails without changing anything if either key is unknown or if
    /// `parent` is `child` or one of its descendants.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) -> Result<(), SceneError> {
        if !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if child == parent {
            return Err(SceneError::SelfParent);
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { child, parent });
        }

        self.unlink(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Attach `child` under the first node named `parent_name`.
    ///
    /// An unresolved or invalid parent is logged and leaves `child` where it
    /// was. Returns whether the attachment happened.
    pub fn attach_by_name(&mut self, child: NodeKey, parent_name: &str) -> bool {
        let Some(parent) = self.find_by_name(parent_name) else {
            log::warn!("attach: no node named '{}', leaving {:?} unattached", parent_name, child);
            return false;
        };
        match self.attach(child, parent) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("attach to '{}' rejected: {}", parent_name, e);
                false
            }
        }
    }

    /// Detach `key` from its parent, making it a root.
    pub fn detach(&mut self, key: NodeKey) {
        if self.nodes.get(key).is_some_and(|n| n.parent.is_some()) {
            self.unlink(key);
            self.roots.push(key);
        }
    }

    /// Remove a node. Its children are detached and become roots; they are
    /// not removed with it.
    pub fn remove(&mut self, key: NodeKey) -> Option<Node> {
        if !self.nodes.contains_key(key) {
            return None;
        }
        self.unlink(key);
        let mut node = self.nodes.remove(key)?;
        for child in node.children.drain(..) {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
                self.roots.push(child);
            }
        }
        Some(node)
    }

    /// True if `ancestor` lies on the parent chain of `key`.
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.parent(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Remove `key` from its parent's child list or from the roots.
    fn unlink(&mut self, key: NodeKey) {
        match self.nodes[key].parent.take() {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|&c| c != key);
                }
            }
            None => self.roots.retain(|&r| r != key),
        }
    }

    // ============ Traversal ============

    /// All nodes in pre-order: each root, then its children in order.
    pub fn pre_order(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            order.push(key);
            stack.extend(self.nodes[key].children.iter().rev());
        }
        order
    }

    /// Run every node's behavior once, parents before children.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        for key in self.pre_order() {
            let node = &mut self.nodes[key];
            if let Some(behavior) = node.behavior.as_mut() {
                behavior.advance(&mut node.transform, input, dt);
            }
        }
    }

    // ============ Transforms ============

    pub fn local_matrix(&self, key: NodeKey) -> Mat4 {
        self.nodes
            .get(key)
            .map_or(Mat4::identity(), |n| n.transform.to_matrix())
    }

    /// Parent's world matrix times the local matrix; a root's world matrix
    /// is its local matrix. Unknown keys yield the identity.
    pub fn world_matrix(&self, key: NodeKey) -> Mat4 {
        let mut world = self.local_matrix(key);
        let mut current = self.parent(key);
        while let Some(parent) = current {
            world = self.local_matrix(parent) * world;
            current = self.parent(parent);
        }
        world
    }

    pub fn world_position(&self, key: NodeKey) -> Vec3 {
        self.world_matrix(key).translation_part()
    }

    pub fn world_rotation(&self, key: NodeKey) -> Quat {
        Quat::from_rotation_matrix(&self.world_matrix(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EulerOrder, Vec3};
    use crate::scene::Behavior;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-5);
            }
        }
    }

    fn posed(name: &str, position: Vec3, euler: Vec3, scale: f32) -> Node {
        let mut node = Node::new(name);
        node.transform
            .set_position(position)
            .set_euler(euler, EulerOrder::Xyz)
            .set_scale_uniform(scale);
        node
    }

    #[test]
    fn test_three_level_world_transform() {
        let mut graph = SceneGraph::new();
        let a = graph.add(posed("a", Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.5, 0.0), 2.0));
        let b = graph
            .add_child(a, posed("b", Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, 0.0, 0.0), 1.0))
            .unwrap();
        let c = graph
            .add_child(b, posed("c", Vec3::new(-2.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.2), 0.5))
            .unwrap();

        let manual = graph.local_matrix(a) * graph.local_matrix(b) * graph.local_matrix(c);
        assert_mat_eq(graph.world_matrix(c), manual);
        assert_mat_eq(graph.world_matrix(a), graph.local_matrix(a));
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a"));
        let b = graph.add_child(a, Node::new("b")).unwrap();
        let c = graph.add_child(b, Node::new("c")).unwrap();

        assert!(matches!(graph.attach(a, c), Err(SceneError::Cycle { .. })));
        assert!(matches!(graph.attach(b, b), Err(SceneError::SelfParent)));
        // Nothing moved.
        assert_eq!(graph.parent(c), Some(b));
        assert_eq!(graph.roots(), &[a]);
    }

    #[test]
    fn test_reparent_moves_subtree() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a"));
        let b = graph.add(Node::new("b"));
        let c = graph.add_child(a, Node::new("c")).unwrap();

        graph.attach(c, b).unwrap();
        assert!(graph.children(a).is_empty());
        assert_eq!(graph.children(b), &[c]);

        graph.attach(a, c).unwrap();
        assert_eq!(graph.roots(), &[b]);
        assert!(graph.is_ancestor(b, a));
    }

    #[test]
    fn test_attach_by_name_missing_parent_leaves_node() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a"));
        assert!(!graph.attach_by_name(a, "nowhere"));
        assert_eq!(graph.roots(), &[a]);

        let b = graph.add(Node::new("b"));
        assert!(graph.attach_by_name(a, "b"));
        assert_eq!(graph.parent(a), Some(b));
    }

    #[test]
    fn test_remove_keeps_children_as_roots() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a"));
        let b = graph.add_child(a, Node::new("b")).unwrap();
        let c = graph.add_child(a, Node::new("c")).unwrap();

        let removed = graph.remove(a).unwrap();
        assert_eq!(removed.name, "a");
        assert!(!graph.contains(a));
        assert_eq!(graph.roots(), &[b, c]);
        assert_eq!(graph.parent(b), None);
    }

    #[test]
    fn test_pre_order() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a"));
        let b = graph.add_child(a, Node::new("b")).unwrap();
        let c = graph.add_child(b, Node::new("c")).unwrap();
        let d = graph.add_child(a, Node::new("d")).unwrap();
        let e = graph.add(Node::new("e"));

        assert_eq!(graph.pre_order(), vec![a, b, c, d, e]);
        assert_eq!(graph.find_by_name("d"), Some(d));
    }

    #[test]
    fn test_update_runs_parent_before_child() {
        let mut graph = SceneGraph::new();
        let parent = graph.add(Node::new("rotor").with_behavior(Behavior::Rotor { speed: 1.0 }));
        let child = graph
            .add_child(parent, Node::new("blade").with_position(Vec3::new(0.0, 0.0, -1.0)))
            .unwrap();

        graph.update(&InputState::default(), std::f32::consts::FRAC_PI_2);

        // Child is carried around by the parent's quarter turn.
        let p = graph.world_position(child);
        assert_relative_eq!(p.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }
}
