//! The scene-graph seam.
//!
//! The part manager never owns the transform hierarchy. It reads and writes
//! through [`SceneGraph`], which a rendering backend implements over its own
//! node storage. [`Scene`](super::Scene) is the in-memory implementation.

use std::fmt;

use glam::Vec3;

/// Opaque, stable identity of a scene node.
///
/// Assigned by the scene graph; the part manager only compares and hashes
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a scene node is, as far as part detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Structural container with no geometry.
    Group,
    /// Plain renderable mesh.
    Mesh,
    /// Renderable mesh deformed by a skeleton.
    SkinnedMesh,
    /// Skeletal joint.
    Bone,
    /// Overlay inserted by the highlight controller.
    Marker,
}

impl NodeKind {
    /// Whether the node carries renderable geometry of a loaded model.
    #[must_use]
    pub fn is_mesh(self) -> bool {
        matches!(self, Self::Mesh | Self::SkinnedMesh)
    }

    /// Whether the node is a skeletal joint.
    #[must_use]
    pub fn is_bone(self) -> bool {
        matches!(self, Self::Bone)
    }
}

/// Geometry and colour of a highlight marker sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Sphere radius in model units.
    pub radius: f32,
    /// Width and height segment count of the sphere.
    pub segments: u32,
    /// Unlit RGB colour.
    pub color: [f32; 3],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.03,
            segments: 8,
            color: [1.0, 0.0, 0.0],
        }
    }
}

/// Read/write access to a scene graph.
///
/// Every method is total: a node id the graph does not know yields an empty
/// slice, `None`, or `false` instead of a panic.
pub trait SceneGraph {
    /// Children of `node` in scene order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Structural parent of `node`, if any.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Kind of `node`.
    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    /// Bones driving a skinned mesh, in skeleton order. Empty for other
    /// nodes.
    fn skeleton(&self, node: NodeId) -> &[NodeId];

    /// Display name of `node`. Empty when the asset did not name it.
    fn name(&self, node: NodeId) -> &str;

    /// Local position of `node`.
    fn position(&self, node: NodeId) -> Option<Vec3>;

    /// Overwrite the local position of `node`. Returns `false` if unknown.
    fn set_position(&mut self, node: NodeId, position: Vec3) -> bool;

    /// Give `node` its own copy of its material so later colour writes stay
    /// local. Returns `false` if the node has no material.
    fn isolate_material(&mut self, node: NodeId) -> bool;

    /// Set the diffuse colour of the node's material.
    fn set_color(&mut self, node: NodeId, color: [f32; 3]) -> bool;

    /// Set the emissive colour of the node's material.
    fn set_emissive(&mut self, node: NodeId, color: [f32; 3]) -> bool;

    /// Insert a marker sphere as a child of `parent`, drawn in the style's
    /// colour.
    fn attach_marker(
        &mut self,
        parent: NodeId,
        style: &MarkerStyle,
    ) -> Option<NodeId>;

    /// Remove `node` (and its subtree) from its parent. The removed ids may
    /// later be handed to new nodes.
    fn detach(&mut self, node: NodeId) -> bool;

    /// Depth-first pre-order walk starting at `root` (inclusive).
    fn traverse(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if self.kind(root).is_none() {
            return order;
        }
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        order
    }
}
