//! Display tree derived from the registry.
//!
//! The tree mirrors part-to-part parenthood only: a part hangs under another
//! part when its scene parent is that part. Structural groups are skipped,
//! so a part whose parent is a group becomes a root. All roots sit under a
//! synthetic root, which keeps callers free of "zero roots" and "many roots"
//! special cases.

use rustc_hash::FxHashMap;

use super::registry::{PartKind, Registry};
use crate::scene::{NodeId, SceneGraph};

/// Label of the synthetic root.
pub const ROOT_LABEL: &str = "Root";

/// A node of the UI-facing part hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    /// Text shown in a tree view.
    pub label: String,
    /// Backing part; `None` for the synthetic root.
    pub part: Option<NodeId>,
    /// Child nodes in discovery order.
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    fn synthetic_root(children: Vec<DisplayNode>) -> Self {
        Self {
            label: ROOT_LABEL.to_owned(),
            part: None,
            children,
        }
    }

    /// Whether this is the synthetic root.
    #[must_use]
    pub fn is_synthetic_root(&self) -> bool {
        self.part.is_none()
    }

    /// Number of descendants, not counting `self`.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&DisplayNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Find the node backed by `part` in this subtree.
    #[must_use]
    pub fn find(&self, part: NodeId) -> Option<&DisplayNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.part == Some(part) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Parts in this subtree, depth-first pre-order.
    #[must_use]
    pub fn parts(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.extend(node.part);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

// Unlinks children level by level so dropping a deep chain does not recurse.
impl Drop for DisplayNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// A part's position among its display-tree siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingSlot {
    /// Zero-based position among the siblings.
    pub index: usize,
    /// Number of siblings, including the part itself.
    pub total: usize,
}

impl SiblingSlot {
    /// Slot of an only child.
    pub const ALONE: SiblingSlot = SiblingSlot { index: 0, total: 1 };
}

/// Build the display tree over every registered part.
#[must_use]
pub fn build_display_tree(
    registry: &Registry,
    scene: &impl SceneGraph,
) -> DisplayNode {
    assemble(registry, scene, None, "Unnamed Part")
}

/// Build the display tree over registered bones only.
#[must_use]
pub fn build_bone_tree(
    registry: &Registry,
    scene: &impl SceneGraph,
) -> DisplayNode {
    assemble(registry, scene, Some(PartKind::Bone), "Unnamed Bone")
}

/// Slot of `part` among the parts sharing its display parent.
///
/// Siblings are counted over distinct parts in registry order. Returns
/// `None` if `part` is not registered.
#[must_use]
pub fn sibling_slot(
    registry: &Registry,
    scene: &impl SceneGraph,
    part: NodeId,
) -> Option<SiblingSlot> {
    if !registry.contains(part) {
        return None;
    }
    let display_parent =
        |id: NodeId| scene.parent(id).filter(|&p| registry.contains(p));
    let parent = display_parent(part);

    let mut index = None;
    let mut total = 0;
    for id in distinct_parts(registry, None) {
        if display_parent(id) == parent {
            if id == part {
                index = Some(total);
            }
            total += 1;
        }
    }
    index.map(|index| SiblingSlot { index, total })
}

/// Distinct registered ids in first-registration order, optionally of one
/// kind.
fn distinct_parts(
    registry: &Registry,
    kind: Option<PartKind>,
) -> impl Iterator<Item = NodeId> + '_ {
    registry
        .distinct()
        .filter(move |p| kind.is_none_or(|k| k == p.kind))
        .map(|p| p.id)
}

struct Slot {
    label: String,
    part: NodeId,
    children: Vec<usize>,
}

/// Two-pass build: create every node, then link each to its scene parent if
/// that parent is in the set.
fn assemble(
    registry: &Registry,
    scene: &impl SceneGraph,
    kind: Option<PartKind>,
    unnamed: &str,
) -> DisplayNode {
    let mut slots: Vec<Slot> = Vec::new();
    let mut index: FxHashMap<NodeId, usize> = FxHashMap::default();

    for id in distinct_parts(registry, kind) {
        let name = scene.name(id);
        let label = if name.is_empty() { unnamed } else { name };
        let _ = index.insert(id, slots.len());
        slots.push(Slot {
            label: label.to_owned(),
            part: id,
            children: Vec::new(),
        });
    }

    let mut roots = Vec::new();
    for i in 0..slots.len() {
        let parent = scene
            .parent(slots[i].part)
            .and_then(|p| index.get(&p).copied());
        match parent {
            Some(p) => slots[p].children.push(i),
            None => roots.push(i),
        }
    }

    log::debug!(
        "display tree: {} nodes, {} roots{}",
        slots.len(),
        roots.len(),
        if kind.is_some() { " (bones)" } else { "" }
    );

    DisplayNode::synthetic_root(materialize(slots, &roots))
}

/// Turn linked slots into owned nodes, leaves first, with no recursion.
fn materialize(mut slots: Vec<Slot>, roots: &[usize]) -> Vec<DisplayNode> {
    // Pre-order from the roots: every parent comes before its children.
    let mut order = Vec::with_capacity(slots.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(slots[i].children.iter().rev());
    }

    let mut built: Vec<Option<DisplayNode>> = Vec::new();
    built.resize_with(slots.len(), || None);
    for &i in order.iter().rev() {
        let slot = &mut slots[i];
        let children = slot
            .children
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        built[i] = Some(DisplayNode {
            label: std::mem::take(&mut slot.label),
            part: Some(slot.part),
            children,
        });
    }
    roots.iter().filter_map(|&r| built[r].take()).collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::RegistrationOptions;
    use crate::scene::fixtures::{assembly, line_of_three, Assembly};
    use crate::scene::{Material, Scene};

    fn registered() -> (Assembly, Registry) {
        let mut a = assembly();
        let registry = Registry::build(
            &mut a.scene,
            a.model,
            &RegistrationOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );
        (a, registry)
    }

    #[test]
    fn test_tree_contains_every_part_once() {
        let (a, registry) = registered();
        let tree = build_display_tree(&registry, &a.scene);

        assert!(tree.is_synthetic_root());
        assert_eq!(tree.label, ROOT_LABEL);
        assert_eq!(tree.len(), registry.len());

        let mut parts = tree.parts();
        parts.sort();
        let mut expected: Vec<_> = registry.iter().map(|p| p.id).collect();
        expected.sort();
        assert_eq!(parts, expected);
    }

    #[test]
    fn test_groups_are_skipped_and_parts_nest() {
        let (a, registry) = registered();
        let tree = build_display_tree(&registry, &a.scene);

        let roots: Vec<_> = tree.children.iter().map(|c| c.part).collect();
        // bolt sits under the `bolts` group, so it is a root; wrist and
        // finger are bones whose scene parents are model and wrist.
        assert_eq!(
            roots,
            vec![Some(a.base), Some(a.bolt), Some(a.lid), Some(a.hand), Some(a.wrist)]
        );

        let base = tree.find(a.base).unwrap();
        assert_eq!(base.label, "base");
        assert_eq!(base.children.len(), 1);
        assert_eq!(base.children[0].part, Some(a.arm));

        let wrist = tree.find(a.wrist).unwrap();
        assert_eq!(wrist.children[0].part, Some(a.finger));
    }

    #[test]
    fn test_unnamed_parts_get_placeholder_label() {
        let (a, registry) = registered();
        let tree = build_display_tree(&registry, &a.scene);
        assert_eq!(tree.find(a.bolt).unwrap().label, "Unnamed Part");
    }

    #[test]
    fn test_children_listed_before_parents_still_link() {
        // The skeleton lists the child bone first, so knee is registered
        // before its parent hip.
        let mut scene = Scene::new();
        let material = scene.add_material(Material::default());
        let root = scene.root();
        let hip = scene.add_bone(root, "hip", Vec3::ZERO);
        let knee = scene.add_bone(hip, "knee", Vec3::Y);
        let _ = scene.add_skinned_mesh(root, "leg", Vec3::ZERO, material, &[knee, hip]);
        let registry = Registry::build(
            &mut scene,
            root,
            &RegistrationOptions::default(),
            &mut StdRng::seed_from_u64(1),
        );

        let tree = build_bone_tree(&registry, &scene);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].part, Some(hip));
        assert_eq!(tree.children[0].children[0].part, Some(knee));
    }

    #[test]
    fn test_bone_tree_has_only_bones() {
        let (a, registry) = registered();
        let tree = build_bone_tree(&registry, &a.scene);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].label, "wrist");
        assert!(tree.find(a.hand).is_none());
    }

    #[test]
    fn test_empty_registry_yields_bare_root() {
        let scene = Scene::new();
        let tree = build_display_tree(&Registry::default(), &scene);
        assert!(tree.is_empty());
        assert!(tree.is_synthetic_root());
    }

    #[test]
    fn test_duplicates_collapse_to_one_node() {
        let (mut a, mut registry) = registered();
        let _ = registry.register(
            &mut a.scene,
            a.model,
            &RegistrationOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );
        let tree = build_display_tree(&registry, &a.scene);
        assert_eq!(tree.len(), registry.distinct_len());
    }

    #[test]
    fn test_deep_chain_builds_without_overflow() {
        const DEPTH: usize = 10_000;
        let mut scene = Scene::new();
        let material = scene.add_material(Material::default());
        let root = scene.root();
        let mut chain = Vec::with_capacity(DEPTH);
        let mut parent = root;
        for _ in 0..DEPTH {
            parent = scene.add_mesh(parent, "link", Vec3::X, material);
            chain.push(parent);
        }
        let registry = Registry::build(
            &mut scene,
            root,
            &RegistrationOptions::default(),
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(registry.len(), DEPTH);

        let tree = build_display_tree(&registry, &scene);
        assert_eq!(tree.len(), DEPTH);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.parts(), chain);

        let last = chain[DEPTH - 1];
        assert!(tree.find(last).is_some_and(DisplayNode::is_empty));
        assert_eq!(
            sibling_slot(&registry, &scene, last),
            Some(SiblingSlot::ALONE)
        );
    }

    #[test]
    fn test_sibling_slots() {
        let (mut scene, group, parts) = line_of_three();
        let registry = Registry::build(
            &mut scene,
            group,
            &RegistrationOptions::default(),
            &mut StdRng::seed_from_u64(5),
        );
        for (i, &p) in parts.iter().enumerate() {
            assert_eq!(
                sibling_slot(&registry, &scene, p),
                Some(SiblingSlot { index: i, total: 3 })
            );
        }
        assert_eq!(sibling_slot(&registry, &scene, group), None);
    }

    #[test]
    fn test_sibling_slot_of_nested_part() {
        let (a, registry) = registered();
        assert_eq!(
            sibling_slot(&registry, &a.scene, a.arm),
            Some(SiblingSlot::ALONE)
        );
        assert_eq!(
            sibling_slot(&registry, &a.scene, a.lid),
            Some(SiblingSlot { index: 2, total: 5 })
        );
    }
}
