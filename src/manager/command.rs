//! The manager's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a pointer click, a
//! tree-view row, a slider, or a programmatic call, is represented as a
//! `PartCommand`. Consumers construct commands and pass them to
//! [`PartManager::execute`](super::PartManager::execute).

use crate::options::SplitPolicy;
use crate::scene::NodeId;

/// A discrete or parameterized operation the manager can perform.
///
/// ```ignore
/// manager.execute(PartCommand::ExplodeAll, &mut scene, &mut scheduler);
/// manager.execute(
///     PartCommand::SetSplitDistance { distance: 0.8 },
///     &mut scene,
///     &mut scheduler,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartCommand {
    // ── Selection ───────────────────────────────────────────────────
    /// Resolve a picked node and highlight it if it is a mesh part.
    Select {
        /// Node hit by the pointer.
        node: NodeId,
    },

    /// Move the highlight marker. `None` leaves the highlight as is.
    Highlight {
        /// Part to highlight.
        part: Option<NodeId>,
    },

    /// Remove the highlight marker.
    ClearHighlight,

    // ── Motion ──────────────────────────────────────────────────────
    /// Pull one part away using the current split policy.
    Explode {
        /// Part to move.
        part: NodeId,
    },

    /// Burst every part outward.
    ExplodeAll,

    /// Return one part to its original position.
    Reset {
        /// Part to move.
        part: NodeId,
    },

    /// Return every part to its original position.
    ResetAll,

    // ── Parameters ──────────────────────────────────────────────────
    /// Change the split distance used by single-part explodes.
    SetSplitDistance {
        /// Requested distance, clamped by the manager.
        distance: f32,
    },

    /// Change how single-part explodes pick their target.
    SetSplitPolicy {
        /// New policy.
        policy: SplitPolicy,
    },
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Result of a part lookup.
    Selected(Option<NodeId>),
    /// Number of tweens submitted to the scheduler.
    Submitted(usize),
    /// State changed without submitting motion.
    Updated,
}
