//! The part manager: registry, highlight, and explode state behind one
//! explicitly constructed owner.
//!
//! The manager does not own the scene or the scheduler. Callers pass them to
//! each operation, so the same manager works against any [`SceneGraph`] and
//! any [`Scheduler`]. Motion only happens when the caller advances the
//! scheduler.

mod command;

pub use command::{CommandOutcome, PartCommand};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::Scheduler;
use crate::explode::ExplodeController;
use crate::options::{Options, SplitPolicy};
use crate::parts::{
    build_bone_tree, build_display_tree, DisplayNode, Registry, SiblingSlot,
};
use crate::scene::{NodeId, SceneGraph};
use crate::selection::{select_part, Highlighter};

/// Owner of all part state for one scene.
#[derive(Debug, Clone)]
pub struct PartManager {
    registry: Registry,
    highlighter: Highlighter,
    explode: ExplodeController,
    options: Options,
    rng: StdRng,
}

impl PartManager {
    /// Register every part under `root`, seeding randomness from the OS.
    pub fn new(
        scene: &mut impl SceneGraph,
        root: NodeId,
        options: Options,
    ) -> Self {
        Self::with_rng(scene, root, options, StdRng::from_os_rng())
    }

    /// Register every part under `root` using `rng` for colours, float
    /// phases, and burst directions.
    pub fn with_rng(
        scene: &mut impl SceneGraph,
        root: NodeId,
        options: Options,
        mut rng: StdRng,
    ) -> Self {
        let registry =
            Registry::build(scene, root, &options.registration, &mut rng);
        let explode_rng = StdRng::from_rng(&mut rng);
        Self {
            registry,
            highlighter: Highlighter::new(options.highlight.marker_style()),
            explode: ExplodeController::new(options.explode.clone(), explode_rng),
            options,
            rng,
        }
    }

    /// Append another traversal. Returns the number of entries appended.
    pub fn register(&mut self, scene: &mut impl SceneGraph, root: NodeId) -> usize {
        self.registry.register(
            scene,
            root,
            &self.options.registration,
            &mut self.rng,
        )
    }

    /// The part registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Options the manager was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Tree of every part under a synthetic root.
    #[must_use]
    pub fn display_tree(&self, scene: &impl SceneGraph) -> DisplayNode {
        build_display_tree(&self.registry, scene)
    }

    /// Tree of bones under a synthetic root.
    #[must_use]
    pub fn bone_tree(&self, scene: &impl SceneGraph) -> DisplayNode {
        build_bone_tree(&self.registry, scene)
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Resolve a picked node to a registered mesh part. See
    /// [`select_part`].
    #[must_use]
    pub fn select_part(&self, node: NodeId) -> Option<NodeId> {
        select_part(&self.registry, node)
    }

    /// Move the highlight to `part`. See [`Highlighter::highlight`].
    pub fn highlight(
        &mut self,
        scene: &mut impl SceneGraph,
        part: Option<NodeId>,
    ) -> bool {
        self.highlighter.highlight(scene, &self.registry, part)
    }

    /// Remove the highlight from `part` if it has it.
    pub fn unhighlight(&mut self, scene: &mut impl SceneGraph, part: NodeId) -> bool {
        self.highlighter.unhighlight(scene, part)
    }

    /// Remove whatever highlight exists.
    pub fn clear_highlight(&mut self, scene: &mut impl SceneGraph) -> bool {
        self.highlighter.clear(scene)
    }

    /// Currently highlighted part.
    #[must_use]
    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlighter.highlighted()
    }

    // ── Motion ──────────────────────────────────────────────────────

    /// Explode `part` into an explicit ring slot. See
    /// [`ExplodeController::explode_one`].
    pub fn explode_one(
        &self,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        part: NodeId,
        slot: Option<SiblingSlot>,
    ) -> Option<Vec3> {
        self.explode
            .explode_one(&self.registry, scene, scheduler, part, slot)
    }

    /// Explode `part` into its sibling slot.
    pub fn explode_part(
        &self,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        part: NodeId,
    ) -> Option<Vec3> {
        self.explode.explode_part(&self.registry, scene, scheduler, part)
    }

    /// Resolve `node` and explode the mesh part it names.
    pub fn select_and_explode(
        &self,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        node: NodeId,
    ) -> Option<NodeId> {
        let part = self.select_part(node)?;
        let _ = self.explode_part(scene, scheduler, part);
        Some(part)
    }

    /// Burst every part outward.
    pub fn explode_all(
        &mut self,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
    ) -> usize {
        self.explode.explode_all(&self.registry, scene, scheduler)
    }

    /// Send `part` back to its original position.
    pub fn reset_one(
        &self,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        part: NodeId,
    ) -> bool {
        self.explode.reset_one(&self.registry, scene, scheduler, part)
    }

    /// Send every part back to its original position.
    pub fn reset_all(
        &self,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
    ) -> usize {
        self.explode.reset_all(&self.registry, scene, scheduler)
    }

    // ── Parameters ──────────────────────────────────────────────────

    /// Current split distance.
    #[must_use]
    pub fn split_distance(&self) -> f32 {
        self.explode.split_distance()
    }

    /// Set the split distance. Returns the clamped value in effect.
    pub fn set_split_distance(&mut self, distance: f32) -> f32 {
        self.explode.set_split_distance(distance)
    }

    /// Current single-part policy.
    #[must_use]
    pub fn split_policy(&self) -> SplitPolicy {
        self.explode.split_policy()
    }

    /// Change the single-part policy.
    pub fn set_split_policy(&mut self, policy: SplitPolicy) {
        self.explode.set_split_policy(policy);
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Perform `command`.
    pub fn execute(
        &mut self,
        command: PartCommand,
        scene: &mut impl SceneGraph,
        scheduler: &mut impl Scheduler,
    ) -> CommandOutcome {
        log::trace!("execute {command:?}");
        match command {
            PartCommand::Select { node } => {
                let part = self.select_part(node);
                let _ = self.highlight(scene, part);
                CommandOutcome::Selected(part)
            }
            PartCommand::Highlight { part } => {
                let _ = self.highlight(scene, part);
                CommandOutcome::Updated
            }
            PartCommand::ClearHighlight => {
                let _ = self.clear_highlight(scene);
                CommandOutcome::Updated
            }
            PartCommand::Explode { part } => CommandOutcome::Submitted(
                usize::from(self.explode_part(&*scene, scheduler, part).is_some()),
            ),
            PartCommand::ExplodeAll => {
                CommandOutcome::Submitted(self.explode_all(&*scene, scheduler))
            }
            PartCommand::Reset { part } => CommandOutcome::Submitted(usize::from(
                self.reset_one(&*scene, scheduler, part),
            )),
            PartCommand::ResetAll => {
                CommandOutcome::Submitted(self.reset_all(&*scene, scheduler))
            }
            PartCommand::SetSplitDistance { distance } => {
                let _ = self.set_split_distance(distance);
                CommandOutcome::Updated
            }
            PartCommand::SetSplitPolicy { policy } => {
                self.set_split_policy(policy);
                CommandOutcome::Updated
            }
        }
    }
}
