//! Minimal retained scene graph.
//!
//! This is the insertion point the rest of the core writes to: add a node,
//! remove or hide it, recolor it, and move it relative to its parent. The
//! renderer only reads from it (see [`Scene::drawables`]).

use glam::{Mat4, Quat, Vec3, Vec4};
use smallvec::SmallVec;

/// Stable identity of a node. Ids are never reused within one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Renderable primitive attached to a node, expressed in node-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned box centred on the origin.
    Box { size: Vec3 },
    /// Capped cylinder centred on the origin, axis along local +Y.
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
    /// Double-sided rectangle in the local XY plane.
    Plane { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub shape: Option<Shape>,
    pub color: Vec4,
    pub visible: bool,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    /// A shapeless node used to move or hide its children together.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            shape: None,
            color: Vec4::ONE,
            visible: true,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, shape: Shape, color: Vec4) -> Self {
        Self {
            shape: Some(shape),
            color,
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// One shaped, effectively visible node ready for drawing.
#[derive(Clone, Copy, Debug)]
pub struct Drawable {
    pub node: NodeId,
    pub world: Mat4,
    pub shape: Shape,
    pub color: Vec4,
}

#[derive(Default, Debug)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    roots: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` under `parent` (or at the root). An absent parent
    /// degrades to a root insertion.
    pub fn add(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = parent.filter(|p| self.get(*p).is_some());
        node.parent = parent;
        node.children.clear();
        self.nodes.push(Some(node));
        match parent {
            Some(p) => {
                if let Some(Some(pn)) = self.nodes.get_mut(p.index()) {
                    pn.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    /// Remove a node and its whole subtree. Returns false when the node was
    /// already absent.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).map(|n| n.parent) else {
            return false;
        };
        match parent {
            Some(p) => {
                if let Some(Some(pn)) = self.nodes.get_mut(p.index()) {
                    pn.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        for n in self.subtree(id) {
            self.nodes[n.index()] = None;
        }
        true
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(|n| n.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(|n| n.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, n)| n.as_ref().is_some_and(|n| n.name == name))
            .map(|(i, _)| NodeId(i as u32))
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.get_mut(id) {
            Some(n) => {
                n.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, id: NodeId, color: Vec4) -> bool {
        match self.get_mut(id) {
            Some(n) => {
                n.color = color;
                true
            }
            None => false,
        }
    }

    /// Set the node's translation relative to its parent.
    pub fn set_offset(&mut self, id: NodeId, offset: Vec3) -> bool {
        match self.get_mut(id) {
            Some(n) => {
                n.transform.translation = offset;
                true
            }
            None => false,
        }
    }

    pub fn offset(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|n| n.transform.translation)
    }

    pub fn color(&self, id: NodeId) -> Option<Vec4> {
        self.get(id).map(|n| n.color)
    }

    /// Visible only when the node and every ancestor are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            match self.get(c) {
                Some(n) if n.visible => cur = n.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut m = self.get(id)?.transform.matrix();
        let mut cur = self.get(id)?.parent;
        while let Some(p) = cur {
            let pn = self.get(p)?;
            m = pn.transform.matrix() * m;
            cur = pn.parent;
        }
        Some(m)
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.get(n) {
                out.push(n);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Every effectively visible node that carries a shape, with its world matrix.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Mat4)> =
            self.roots.iter().rev().map(|r| (*r, Mat4::IDENTITY)).collect();
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            if let Some(shape) = node.shape {
                out.push(Drawable {
                    node: id,
                    world,
                    shape,
                    color: node.color,
                });
            }
            stack.extend(node.children.iter().rev().map(|c| (*c, world)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Shape {
        Shape::Box { size: Vec3::ONE }
    }

    #[test]
    fn world_matrix_composes_parent_offsets() {
        let mut scene = Scene::new();
        let group = scene.add(Node::group("g").at(Vec3::new(1.0, 0.0, 0.0)), None);
        let child = scene.add(
            Node::mesh("c", unit_box(), Vec4::ONE).at(Vec3::new(0.0, 2.0, 0.0)),
            Some(group),
        );
        let p = scene.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn hiding_a_group_hides_descendants_from_drawables() {
        let mut scene = Scene::new();
        let group = scene.add(Node::group("g"), None);
        let child = scene.add(Node::mesh("c", unit_box(), Vec4::ONE), Some(group));
        assert_eq!(scene.drawables().len(), 1);
        scene.set_visible(group, false);
        assert!(!scene.is_visible(child));
        assert!(scene.drawables().is_empty());
    }

    #[test]
    fn remove_drops_subtree_and_ignores_repeats() {
        let mut scene = Scene::new();
        let group = scene.add(Node::group("g"), None);
        let child = scene.add(Node::mesh("c", unit_box(), Vec4::ONE), Some(group));
        assert!(scene.remove(group));
        assert!(!scene.contains(child));
        assert!(!scene.remove(group));
        assert!(!scene.set_color(child, Vec4::ZERO));
        assert!(scene.is_empty());
    }

    #[test]
    fn add_under_missing_parent_falls_back_to_root() {
        let mut scene = Scene::new();
        let ghost = scene.add(Node::group("ghost"), None);
        scene.remove(ghost);
        let n = scene.add(Node::mesh("n", unit_box(), Vec4::ONE), Some(ghost));
        assert_eq!(scene.get(n).unwrap().parent(), None);
        assert_eq!(scene.drawables().len(), 1);
    }
}
