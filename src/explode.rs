//! Explode and reset motion.
//!
//! The controller turns part-level requests into position tweens and hands
//! them to a [`Scheduler`]. It never writes positions itself: every target
//! is reached through the scheduler on later frames.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use crate::animation::{Scheduler, Tween};
use crate::options::{ConflictPolicy, ExplodeOptions, SplitPolicy};
use crate::parts::{sibling_slot, Registry, SiblingSlot};
use crate::scene::{NodeId, SceneGraph};

/// Explode state: split distance, policies, and the burst RNG.
#[derive(Debug, Clone)]
pub struct ExplodeController {
    options: ExplodeOptions,
    split_distance: f32,
    rng: StdRng,
}

impl ExplodeController {
    /// Controller starting from `options.split_distance`.
    #[must_use]
    pub fn new(options: ExplodeOptions, rng: StdRng) -> Self {
        let split_distance = options
            .clamp_split_distance(options.split_distance)
            .unwrap_or(0.0);
        Self {
            options,
            split_distance,
            rng,
        }
    }

    /// Current split distance.
    #[must_use]
    pub fn split_distance(&self) -> f32 {
        self.split_distance
    }

    /// Set the split distance used by the next single-part explode.
    ///
    /// The value is clamped to `[0, max_split_distance]`; non-finite values
    /// are ignored. Returns the distance now in effect.
    pub fn set_split_distance(&mut self, distance: f32) -> f32 {
        match self.options.clamp_split_distance(distance) {
            Some(d) => self.split_distance = d,
            None => log::debug!("ignoring non-finite split distance {distance}"),
        }
        self.split_distance
    }

    /// Single-part target policy.
    #[must_use]
    pub fn split_policy(&self) -> SplitPolicy {
        self.options.split_policy
    }

    /// Change the single-part target policy.
    pub fn set_split_policy(&mut self, policy: SplitPolicy) {
        self.options.split_policy = policy;
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &ExplodeOptions {
        &self.options
    }

    /// Move one part away from the assembly.
    ///
    /// `slot` places the part on the radial ring; without one the part is
    /// treated as an only child. Returns the submitted target, or `None` if
    /// the part is unknown.
    pub fn explode_one(
        &self,
        registry: &Registry,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        part: NodeId,
        slot: Option<SiblingSlot>,
    ) -> Option<Vec3> {
        if !registry.contains(part) {
            log::debug!("explode: {part} is not a registered part");
            return None;
        }
        let current = scene.position(part)?;
        let d = self.split_distance;

        let (target, motion) = match self.options.split_policy {
            SplitPolicy::Diagonal => {
                (current + Vec3::new(d, d, 0.0), &self.options.diagonal_motion)
            }
            SplitPolicy::Radial => {
                let original = registry.original_position(part)?;
                let slot = slot.unwrap_or(SiblingSlot::ALONE);
                let offset = radial_direction(slot, self.options.radial_elevation)
                    * d
                    * self.options.radial_scale;
                (original + offset, &self.options.radial_motion)
            }
        };

        log::debug!(
            "explode {part} ({:?}): {current} -> {target}",
            self.options.split_policy
        );
        self.submit(scheduler, motion.tween(part, current, target));
        Some(target)
    }

    /// [`explode_one`](Self::explode_one) with the part's slot among its
    /// display-tree siblings.
    pub fn explode_part(
        &self,
        registry: &Registry,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        part: NodeId,
    ) -> Option<Vec3> {
        let slot = sibling_slot(registry, scene, part);
        self.explode_one(registry, scene, scheduler, part, slot)
    }

    /// Burst every registry entry outward in a random direction.
    ///
    /// Returns the number of tweens submitted.
    pub fn explode_all(
        &mut self,
        registry: &Registry,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
    ) -> usize {
        let mut submitted = 0;
        for part in registry {
            let Some(current) = scene.position(part.id) else {
                log::debug!("explode all: {} has no position", part.id);
                continue;
            };
            let offset =
                random_direction(&mut self.rng) * self.options.burst_magnitude;
            let tween =
                self.options
                    .burst_motion
                    .tween(part.id, current, current + offset);
            self.submit(scheduler, tween);
            submitted += 1;
        }
        log::info!("explode all: {submitted} parts");
        submitted
    }

    /// Move one part back to its original position.
    ///
    /// Returns `false` if the part has no snapshot.
    pub fn reset_one(
        &self,
        registry: &Registry,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
        part: NodeId,
    ) -> bool {
        let Some(original) = registry.original_position(part) else {
            log::debug!("reset: no original position for {part}");
            return false;
        };
        let Some(current) = scene.position(part) else {
            log::debug!("reset: {part} has no position");
            return false;
        };
        self.submit(
            scheduler,
            self.options.reset_motion.tween(part, current, original),
        );
        true
    }

    /// Reset every registry entry. Returns the number of tweens submitted.
    pub fn reset_all(
        &self,
        registry: &Registry,
        scene: &impl SceneGraph,
        scheduler: &mut impl Scheduler,
    ) -> usize {
        let submitted = registry
            .iter()
            .filter(|part| self.reset_one(registry, scene, scheduler, part.id))
            .count();
        log::info!("reset all: {submitted} parts");
        submitted
    }

    fn submit(&self, scheduler: &mut impl Scheduler, tween: Tween) {
        if self.options.conflict_policy == ConflictPolicy::CancelInFlight {
            let cancelled = scheduler.cancel_target(tween.target);
            if cancelled > 0 {
                log::trace!("cancelled {cancelled} tweens on {}", tween.target);
            }
        }
        let _ = scheduler.submit(tween);
    }
}

/// Unit direction of `slot` on a ring tilted up by `elevation`.
fn radial_direction(slot: SiblingSlot, elevation: f32) -> Vec3 {
    let angle = TAU * slot.index as f32 / slot.total.max(1) as f32;
    Vec3::new(angle.cos(), elevation, angle.sin())
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

/// Normalised vector of three uniform `[0, 1)` samples.
fn random_direction(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(rng.random(), rng.random(), rng.random())
        .try_normalize()
        .unwrap_or(Vec3::Y)
}
