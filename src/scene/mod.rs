//! Scene-graph seam and an in-memory scene.
//!
//! [`SceneGraph`] is what the part manager talks to. [`Scene`] is a flat
//! arena implementation of it. Detaching a node frees its whole subtree, and
//! freed slots are handed to the next nodes added, so a detached id may come
//! back naming a different node.

mod graph;

pub use graph::{MarkerStyle, NodeId, NodeKind, SceneGraph};
use glam::Vec3;

/// Index into the scene's material table. Meshes loaded from one asset
/// often share a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Appearance of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diffuse RGB colour.
    pub color: [f32; 3],
    /// Emissive RGB colour.
    pub emissive: [f32; 3],
}

impl Material {
    /// Material with the given diffuse colour and no emission.
    #[must_use]
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            emissive: [0.0; 3],
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new([0.8, 0.8, 0.8])
    }
}

/// One node of the arena.
#[derive(Debug, Clone)]
struct SceneNode {
    kind: NodeKind,
    name: String,
    position: Vec3,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    skeleton: Vec<NodeId>,
    material: Option<MaterialId>,
    marker: Option<MarkerStyle>,
}

impl SceneNode {
    fn new(kind: NodeKind, name: &str, position: Vec3) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            position,
            parent: None,
            children: Vec::new(),
            skeleton: Vec::new(),
            material: None,
            marker: None,
        }
    }
}

/// Arena-backed scene graph.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Slots indexed by `NodeId`; `None` once detached.
    nodes: Vec<Option<SceneNode>>,
    /// Detached slots, reused last-freed first.
    free: Vec<u32>,
    /// Material table indexed by `MaterialId`. Entries are never freed.
    materials: Vec<Material>,
}

impl Scene {
    /// Create a scene holding a single root group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(SceneNode::new(
                NodeKind::Group,
                "Scene",
                Vec3::ZERO,
            ))],
            free: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// The root group created by [`Scene::new`].
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of live nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Whether only the root remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Number of node slots, live or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of entries in the material table.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Whether `node` is live.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    // -- Construction --

    /// Add a material to the table.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    /// Add a node under `parent`, reusing a freed slot if there is one. An
    /// unknown parent leaves the node detached.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: &str,
        position: Vec3,
    ) -> NodeId {
        let next = self.nodes.len() as u32;
        let id = NodeId(self.free.pop().unwrap_or(next));
        let mut node = SceneNode::new(kind, name, position);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
            node.parent = Some(parent);
        } else {
            log::warn!("node {name:?} added under unknown parent {parent}");
        }
        match self.nodes.get_mut(id.0 as usize) {
            Some(slot) => *slot = Some(node),
            None => self.nodes.push(Some(node)),
        }
        id
    }

    /// Append a structural group.
    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: &str,
        position: Vec3,
    ) -> NodeId {
        self.add_node(parent, NodeKind::Group, name, position)
    }

    /// Append a mesh using `material`.
    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &str,
        position: Vec3,
        material: MaterialId,
    ) -> NodeId {
        let id = self.add_node(parent, NodeKind::Mesh, name, position);
        if let Some(node) = self.node_mut(id) {
            node.material = Some(material);
        }
        id
    }

    /// Append a skeletal joint.
    pub fn add_bone(
        &mut self,
        parent: NodeId,
        name: &str,
        position: Vec3,
    ) -> NodeId {
        self.add_node(parent, NodeKind::Bone, name, position)
    }

    /// Append a skinned mesh driven by `bones`.
    pub fn add_skinned_mesh(
        &mut self,
        parent: NodeId,
        name: &str,
        position: Vec3,
        material: MaterialId,
        bones: &[NodeId],
    ) -> NodeId {
        let id = self.add_node(parent, NodeKind::SkinnedMesh, name, position);
        if let Some(node) = self.node_mut(id) {
            node.material = Some(material);
            node.skeleton = bones.to_vec();
        }
        id
    }

    // -- Inspection --

    /// Material handle of `node`.
    #[must_use]
    pub fn material_id(&self, node: NodeId) -> Option<MaterialId> {
        self.node(node)?.material
    }

    /// Material of `node`. Markers have none; their colour is in their
    /// [`MarkerStyle`].
    #[must_use]
    pub fn material(&self, node: NodeId) -> Option<&Material> {
        let id = self.material_id(node)?;
        self.materials.get(id.0 as usize)
    }

    /// Marker style of `node`, if it is a highlight marker.
    #[must_use]
    pub fn marker_style(&self, node: NodeId) -> Option<&MarkerStyle> {
        self.node(node)?.marker.as_ref()
    }

    /// Live children of `node` that are highlight markers.
    #[must_use]
    pub fn markers_under(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.kind(c) == Some(NodeKind::Marker))
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)?.as_mut()
    }

    fn material_mut(&mut self, node: NodeId) -> Option<&mut Material> {
        let id = self.material_id(node)?;
        self.materials.get_mut(id.0 as usize)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for Scene {
    fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.node(node).map(|n| n.kind)
    }

    fn skeleton(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.skeleton.as_slice())
            .unwrap_or_default()
    }

    fn name(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.name.as_str())
    }

    fn position(&self, node: NodeId) -> Option<Vec3> {
        self.node(node).map(|n| n.position)
    }

    fn set_position(&mut self, node: NodeId, position: Vec3) -> bool {
        self.node_mut(node).is_some_and(|n| {
            n.position = position;
            true
        })
    }

    fn isolate_material(&mut self, node: NodeId) -> bool {
        let Some(copy) = self.material(node).cloned() else {
            return false;
        };
        let id = self.add_material(copy);
        self.node_mut(node).is_some_and(|n| {
            n.material = Some(id);
            true
        })
    }

    fn set_color(&mut self, node: NodeId, color: [f32; 3]) -> bool {
        self.material_mut(node).is_some_and(|m| {
            m.color = color;
            true
        })
    }

    fn set_emissive(&mut self, node: NodeId, color: [f32; 3]) -> bool {
        self.material_mut(node).is_some_and(|m| {
            m.emissive = color;
            true
        })
    }

    fn attach_marker(
        &mut self,
        parent: NodeId,
        style: &MarkerStyle,
    ) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.add_node(parent, NodeKind::Marker, "", Vec3::ZERO);
        if let Some(node) = self.node_mut(id) {
            node.marker = Some(*style);
        }
        Some(id)
    }

    fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.node(node).map(|n| n.parent) else {
            return false;
        };
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|&c| c != node);
        }
        for id in self.traverse(node) {
            if let Some(slot) = self.nodes.get_mut(id.0 as usize) {
                *slot = None;
                self.free.push(id.0);
            }
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use glam::Vec3;

    use super::{Material, MaterialId, NodeId, Scene};

    /// Node handles of [`assembly`].
    pub(crate) struct Assembly {
        pub scene: Scene,
        pub model: NodeId,
        pub base: NodeId,
        pub arm: NodeId,
        pub bolts: NodeId,
        pub bolt: NodeId,
        pub lid: NodeId,
        pub wrist: NodeId,
        pub finger: NodeId,
        pub hand: NodeId,
        pub shared: MaterialId,
    }

    /// ```text
    /// Scene
    /// └ model (group)
    ///   ├ base (mesh)
    ///   │ ├ arm (mesh)
    ///   │ └ bolts (group)
    ///   │   └ bolt (mesh)
    ///   ├ lid (mesh)
    ///   ├ wrist (bone)
    ///   │ └ finger (bone)
    ///   └ hand (skinned mesh, skeleton = [wrist, finger])
    /// ```
    ///
    /// All meshes share one material.
    pub(crate) fn assembly() -> Assembly {
        let mut scene = Scene::new();
        let shared = scene.add_material(Material::default());
        let root = scene.root();
        let model = scene.add_group(root, "model", Vec3::ZERO);
        let base = scene.add_mesh(model, "base", Vec3::ZERO, shared);
        let arm = scene.add_mesh(base, "arm", Vec3::new(1.0, 0.0, 0.0), shared);
        let bolts = scene.add_group(base, "bolts", Vec3::ZERO);
        let bolt = scene.add_mesh(bolts, "", Vec3::new(0.0, 1.0, 0.0), shared);
        let lid = scene.add_mesh(model, "lid", Vec3::new(2.0, 0.0, 0.0), shared);
        let wrist = scene.add_bone(model, "wrist", Vec3::new(0.0, 0.0, 1.0));
        let finger = scene.add_bone(wrist, "finger", Vec3::new(0.0, 0.0, 0.5));
        let hand = scene.add_skinned_mesh(
            model,
            "hand",
            Vec3::new(0.0, 0.0, 1.0),
            shared,
            &[wrist, finger],
        );
        Assembly {
            scene,
            model,
            base,
            arm,
            bolts,
            bolt,
            lid,
            wrist,
            finger,
            hand,
            shared,
        }
    }

    /// Three sibling meshes at `(0,0,0)`, `(1,0,0)`, `(2,0,0)` under one
    /// group. Returns the scene, the group, and the meshes.
    pub(crate) fn line_of_three() -> (Scene, NodeId, [NodeId; 3]) {
        let mut scene = Scene::new();
        let material = scene.add_material(Material::default());
        let root = scene.root();
        let group = scene.add_group(root, "line", Vec3::ZERO);
        let parts = [0.0, 1.0, 2.0].map(|x| {
            scene.add_mesh(group, "segment", Vec3::new(x, 0.0, 0.0), material)
        });
        (scene, group, parts)
    }
}
