//! Part registry and the display hierarchy built on top of it.
//!
//! A part is a mesh, a skinned mesh, or a bone of a skinned mesh's skeleton.
//! The [`Registry`] owns the ordered part list and each part's original
//! position; [`build_display_tree`] and [`build_bone_tree`] derive UI trees
//! from it on demand.

mod registry;
mod tree;

pub use registry::{Part, PartKind, Registry};
pub use tree::{
    build_bone_tree, build_display_tree, sibling_slot, DisplayNode,
    SiblingSlot, ROOT_LABEL,
};
