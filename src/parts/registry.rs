//! Part discovery and original-position bookkeeping.

use glam::Vec3;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::options::{ColorMode, RegistrationOptions};
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::util::color::random_color;

/// Whether a part is renderable geometry or a skeletal joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Mesh or skinned mesh.
    Mesh,
    /// Bone of a skinned mesh's skeleton.
    Bone,
}

/// An explodable unit of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Scene node backing this part.
    pub id: NodeId,
    /// Mesh or bone.
    pub kind: PartKind,
    /// Scene name at registration time. May be empty.
    pub name: String,
    /// Phase offset consumed by idle-float effects.
    pub float_phase: f32,
}

/// The authoritative list of parts and their original positions.
///
/// Parts keep discovery order. Each identity gets exactly one original
/// position, captured the first time it is registered and never changed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    parts: Vec<Part>,
    original_positions: FxHashMap<NodeId, Vec3>,
    /// Index into `parts` of each identity's first entry.
    first_index: FxHashMap<NodeId, usize>,
}

impl Registry {
    /// Traverse `root` and register every part found.
    pub fn build(
        scene: &mut impl SceneGraph,
        root: NodeId,
        options: &RegistrationOptions,
        rng: &mut impl Rng,
    ) -> Self {
        let mut registry = Self::default();
        let _ = registry.register(scene, root, options, rng);
        registry
    }

    /// Traverse `root` and append every part found.
    ///
    /// Registering a model that is already registered appends its parts a
    /// second time; their original positions keep the first snapshot.
    /// Returns the number of entries appended.
    pub fn register(
        &mut self,
        scene: &mut impl SceneGraph,
        root: NodeId,
        options: &RegistrationOptions,
        rng: &mut impl Rng,
    ) -> usize {
        let found = discover(&*scene, root);
        let palette = options.palette();
        let mut color_index = 0;

        for &(id, kind) in &found {
            if kind == PartKind::Mesh {
                let _ = scene.isolate_material(id);
                let _ = scene.set_emissive(id, [0.0; 3]);
                let color = match options.color_mode {
                    ColorMode::None => None,
                    ColorMode::Palette => Some(palette.color(color_index)),
                    ColorMode::Random => Some(random_color(rng)),
                };
                if let Some(color) = color {
                    let _ = scene.set_color(id, color);
                }
                color_index += 1;
            }

            let position = scene.position(id).unwrap_or(Vec3::ZERO);
            let _ = self.original_positions.entry(id).or_insert(position);
            let _ = self.first_index.entry(id).or_insert(self.parts.len());

            self.parts.push(Part {
                id,
                kind,
                name: scene.name(id).to_owned(),
                float_phase: rng.random::<f32>() * options.float_phase_range,
            });
        }

        log::info!(
            "registered {} parts under {root} ({} meshes, {} bones)",
            found.len(),
            color_index,
            found.len() - color_index
        );
        found.len()
    }

    /// All entries in discovery order, duplicates included.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Iterate entries in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Part> {
        self.parts.iter()
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no part has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of distinct identities.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.first_index.len()
    }

    /// First entry of each identity, in discovery order.
    pub fn distinct(&self) -> impl Iterator<Item = &Part> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter(|(i, p)| self.first_index.get(&p.id) == Some(i))
            .map(|(_, p)| p)
    }

    /// First entry registered for `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Part> {
        self.first_index.get(&id).and_then(|&i| self.parts.get(i))
    }

    /// Whether `id` is a registered part.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.first_index.contains_key(&id)
    }

    /// Position captured when `id` was first registered.
    #[must_use]
    pub fn original_position(&self, id: NodeId) -> Option<Vec3> {
        self.original_positions.get(&id).copied()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Walk `root` and list parts in discovery order.
///
/// A mesh or skinned mesh is a part. A skinned mesh is followed by the
/// bones of its skeleton; a bone shared between skeletons is listed once.
fn discover(scene: &impl SceneGraph, root: NodeId) -> Vec<(NodeId, PartKind)> {
    let mut found = Vec::new();
    let mut seen_bones = FxHashSet::default();

    for node in scene.traverse(root) {
        let Some(kind) = scene.kind(node) else {
            continue;
        };
        if !kind.is_mesh() {
            log::trace!("skipping {kind:?} node {node}");
            continue;
        }
        found.push((node, PartKind::Mesh));

        if kind == NodeKind::SkinnedMesh {
            for &bone in scene.skeleton(node) {
                if scene.kind(bone).is_some_and(NodeKind::is_bone)
                    && seen_bones.insert(bone)
                {
                    found.push((bone, PartKind::Bone));
                }
            }
        }
    }
    found
}
