//! Part selection and the single highlight marker.

use crate::parts::{PartKind, Registry};
use crate::scene::{MarkerStyle, NodeId, NodeKind, SceneGraph};

/// Resolve a picked scene node to a registered mesh part.
///
/// Only exact identity matches resolve; a pick on a descendant of a part
/// does not. Bones have no surface to pick, so they never resolve here.
#[must_use]
pub fn select_part(registry: &Registry, node: NodeId) -> Option<NodeId> {
    let hit = registry
        .get(node)
        .filter(|p| p.kind == PartKind::Mesh)
        .map(|p| p.id);
    if hit.is_none() {
        log::debug!("select: {node} is not a registered mesh part");
    }
    hit
}

/// Tracks the one highlighted part and its marker node.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    style: MarkerStyle,
    current: Option<Highlight>,
}

#[derive(Debug, Clone, Copy)]
struct Highlight {
    part: NodeId,
    marker: NodeId,
}

impl Highlight {
    /// Whether the marker is still attached. Its id may have been reused
    /// by another node after an outside detach.
    fn is_live(self, scene: &impl SceneGraph) -> bool {
        scene.kind(self.marker) == Some(NodeKind::Marker)
            && scene.parent(self.marker) == Some(self.part)
    }
}

impl Highlighter {
    /// Highlighter attaching markers of the given style.
    #[must_use]
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            style,
            current: None,
        }
    }

    /// Currently highlighted part.
    #[must_use]
    pub fn highlighted(&self) -> Option<NodeId> {
        self.current.map(|h| h.part)
    }

    /// Marker node attached to the highlighted part.
    #[must_use]
    pub fn marker(&self) -> Option<NodeId> {
        self.current.map(|h| h.marker)
    }

    /// Marker style used for future highlights.
    #[must_use]
    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Replace the marker style. The current marker is left as is.
    pub fn set_style(&mut self, style: MarkerStyle) {
        self.style = style;
    }

    /// Move the highlight to `part`.
    ///
    /// `None`, unregistered parts, and the part already highlighted are
    /// ignored. Returns `true` if a marker was attached.
    pub fn highlight(
        &mut self,
        scene: &mut impl SceneGraph,
        registry: &Registry,
        part: Option<NodeId>,
    ) -> bool {
        let Some(part) = part else {
            log::debug!("highlight: no part given, keeping current highlight");
            return false;
        };
        if !registry.contains(part) {
            log::debug!("highlight: {part} is not a registered part");
            return false;
        }
        if let Some(current) = self.current {
            if current.part == part && current.is_live(scene) {
                return false;
            }
            let _ = self.unhighlight(scene, current.part);
        }

        match scene.attach_marker(part, &self.style) {
            Some(marker) => {
                log::debug!("highlight {part} (marker {marker})");
                self.current = Some(Highlight { part, marker });
                true
            }
            None => {
                log::debug!("highlight: could not attach marker to {part}");
                false
            }
        }
    }

    /// Remove the marker from `part` if it is the highlighted one.
    ///
    /// Returns `true` if the highlight was cleared.
    pub fn unhighlight(
        &mut self,
        scene: &mut impl SceneGraph,
        part: NodeId,
    ) -> bool {
        match self.current {
            Some(current) if current.part == part => {
                if !(current.is_live(scene) && scene.detach(current.marker)) {
                    log::debug!(
                        "unhighlight: marker {} of {part} already gone",
                        current.marker
                    );
                }
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Remove whatever highlight exists.
    pub fn clear(&mut self, scene: &mut impl SceneGraph) -> bool {
        match self.current {
            Some(current) => self.unhighlight(scene, current.part),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::RegistrationOptions;
    use crate::scene::fixtures::{assembly, Assembly};

    fn setup() -> (Assembly, Registry) {
        let mut a = assembly();
        let registry = Registry::build(
            &mut a.scene,
            a.model,
            &RegistrationOptions::default(),
            &mut StdRng::seed_from_u64(2),
        );
        (a, registry)
    }

    #[test]
    fn test_select_resolves_only_registered_parts() {
        let (a, registry) = setup();
        assert_eq!(select_part(&registry, a.arm), Some(a.arm));
        assert_eq!(select_part(&registry, a.hand), Some(a.hand));
        assert_eq!(select_part(&registry, a.finger), None);
        assert_eq!(select_part(&registry, a.bolts), None);
        assert_eq!(select_part(&registry, NodeId(777)), None);
    }

    #[test]
    fn test_at_most_one_marker() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();

        assert!(highlighter.highlight(&mut a.scene, &registry, Some(a.arm)));
        assert!(highlighter.highlight(&mut a.scene, &registry, Some(a.lid)));
        assert!(highlighter.highlight(&mut a.scene, &registry, Some(a.wrist)));

        assert_eq!(highlighter.highlighted(), Some(a.wrist));
        let markers: usize = registry
            .iter()
            .map(|p| a.scene.markers_under(p.id).len())
            .sum();
        assert_eq!(markers, 1);
        assert_eq!(a.scene.markers_under(a.wrist).len(), 1);
    }

    #[test]
    fn test_marker_uses_style() {
        let (mut a, registry) = setup();
        let style = MarkerStyle {
            radius: 0.1,
            ..MarkerStyle::default()
        };
        let mut highlighter = Highlighter::new(style);
        let _ = highlighter.highlight(&mut a.scene, &registry, Some(a.lid));

        let marker = highlighter.marker().unwrap();
        assert_eq!(a.scene.kind(marker), Some(NodeKind::Marker));
        assert_eq!(a.scene.parent(marker), Some(a.lid));
        assert_eq!(a.scene.marker_style(marker), Some(&style));
    }

    #[test]
    fn test_rehighlighting_same_part_keeps_single_marker() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();
        assert!(highlighter.highlight(&mut a.scene, &registry, Some(a.arm)));
        let marker = highlighter.marker();
        assert!(!highlighter.highlight(&mut a.scene, &registry, Some(a.arm)));
        assert_eq!(highlighter.marker(), marker);
        assert_eq!(a.scene.markers_under(a.arm).len(), 1);
    }

    #[test]
    fn test_none_and_unknown_parts_are_ignored() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();
        let _ = highlighter.highlight(&mut a.scene, &registry, Some(a.lid));

        assert!(!highlighter.highlight(&mut a.scene, &registry, None));
        assert!(!highlighter.highlight(&mut a.scene, &registry, Some(a.bolts)));
        assert_eq!(highlighter.highlighted(), Some(a.lid));
        assert_eq!(a.scene.markers_under(a.lid).len(), 1);
    }

    #[test]
    fn test_unhighlight_only_touches_matching_part() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();
        let _ = highlighter.highlight(&mut a.scene, &registry, Some(a.lid));

        assert!(!highlighter.unhighlight(&mut a.scene, a.arm));
        assert_eq!(highlighter.highlighted(), Some(a.lid));

        assert!(highlighter.unhighlight(&mut a.scene, a.lid));
        assert_eq!(highlighter.highlighted(), None);
        assert!(a.scene.markers_under(a.lid).is_empty());
        assert!(!highlighter.clear(&mut a.scene));
    }

    #[test]
    fn test_stale_marker_is_replaced() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();
        let _ = highlighter.highlight(&mut a.scene, &registry, Some(a.arm));
        let stale = highlighter.marker().unwrap();
        assert!(a.scene.detach(stale));

        assert!(highlighter.highlight(&mut a.scene, &registry, Some(a.arm)));
        let marker = highlighter.marker().unwrap();
        assert_eq!(a.scene.markers_under(a.arm), vec![marker]);
    }

    #[test]
    fn test_reused_marker_slot_is_not_detached() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();
        let _ = highlighter.highlight(&mut a.scene, &registry, Some(a.arm));
        let stale = highlighter.marker().unwrap();
        assert!(a.scene.detach(stale));

        // The freed slot goes to the next node added.
        let cap = a.scene.add_group(a.lid, "cap", Vec3::ZERO);
        assert_eq!(cap, stale);

        assert!(highlighter.highlight(&mut a.scene, &registry, Some(a.lid)));
        assert!(a.scene.contains(cap));
        assert_eq!(a.scene.parent(cap), Some(a.lid));
        assert!(a.scene.markers_under(a.arm).is_empty());
        assert_eq!(a.scene.markers_under(a.lid).len(), 1);
    }

    #[test]
    fn test_highlight_toggling_keeps_scene_size_flat() {
        let (mut a, registry) = setup();
        let mut highlighter = Highlighter::default();
        let _ = highlighter.highlight(&mut a.scene, &registry, Some(a.arm));
        let nodes = a.scene.len();
        let slots = a.scene.slot_count();
        let materials = a.scene.material_count();

        for i in 0..10_000 {
            let part = if i % 2 == 0 { a.lid } else { a.arm };
            assert!(highlighter.highlight(&mut a.scene, &registry, Some(part)));
        }
        assert_eq!(a.scene.len(), nodes);
        assert_eq!(a.scene.slot_count(), slots);
        assert_eq!(a.scene.material_count(), materials);

        assert!(highlighter.clear(&mut a.scene));
        assert_eq!(a.scene.len(), nodes - 1);
        assert_eq!(a.scene.slot_count(), slots);
        assert_eq!(a.scene.material_count(), materials);
    }
}
