use std::time::Duration;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::Tween;
use crate::scene::NodeId;
use crate::util::easing::EasingFunction;

/// How a single-part explode picks its target.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Fixed `(d, d, 0)` offset added to the current position. Repeated
    /// clicks keep walking the part away.
    Diagonal,
    /// Offset around a ring from the original position, by sibling slot.
    /// Repeated clicks land on the same spot.
    #[default]
    Radial,
}

/// What happens to in-flight tweens on a part when a new one is submitted.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Leave them running; the newest submission wins each frame's write.
    LastWriteWins,
    /// Cancel them first so only the new tween drives the part.
    #[default]
    CancelInFlight,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
/// Duration and curve of one kind of motion.
pub struct MotionOptions {
    /// Duration in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub duration_ms: u64,
    /// Easing curve.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl MotionOptions {
    /// Motion lasting `duration_ms` with the given curve.
    #[must_use]
    pub const fn new(duration_ms: u64, easing: EasingFunction) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Duration as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Tween moving `target` from `from` to `to` with this motion.
    #[must_use]
    pub fn tween(&self, target: NodeId, from: Vec3, to: Vec3) -> Tween {
        Tween::new(target, from, to)
            .over(self.duration())
            .with_easing(self.easing)
    }
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self::new(500, EasingFunction::Linear)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Explode", inline)]
#[serde(default)]
/// Explode and reset parameters.
pub struct ExplodeOptions {
    /// Initial split distance for single-part explodes.
    #[schemars(title = "Split Distance", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub split_distance: f32,
    /// Upper bound applied when the split distance is changed at runtime.
    #[schemars(skip)]
    pub max_split_distance: f32,
    /// Single-part target policy.
    #[schemars(title = "Split Mode")]
    pub split_policy: SplitPolicy,
    /// Radial explode radius per unit of split distance.
    #[schemars(title = "Radial Scale", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub radial_scale: f32,
    /// Vertical component of the radial direction before normalising.
    #[schemars(skip)]
    pub radial_elevation: f32,
    /// Offset length used by explode-all.
    #[schemars(title = "Burst Distance", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub burst_magnitude: f32,
    /// Motion of a diagonal single-part explode.
    #[schemars(skip)]
    pub diagonal_motion: MotionOptions,
    /// Motion of a radial single-part explode.
    #[schemars(skip)]
    pub radial_motion: MotionOptions,
    /// Motion of explode-all.
    #[schemars(skip)]
    pub burst_motion: MotionOptions,
    /// Motion back to the original position.
    #[schemars(skip)]
    pub reset_motion: MotionOptions,
    /// Handling of overlapping tweens on one part.
    #[schemars(title = "Overlapping Animations")]
    pub conflict_policy: ConflictPolicy,
}

impl ExplodeOptions {
    /// Clamp `distance` into `[0, max_split_distance]`. Non-finite input
    /// yields `None`.
    #[must_use]
    pub fn clamp_split_distance(&self, distance: f32) -> Option<f32> {
        distance
            .is_finite()
            .then(|| distance.clamp(0.0, self.max_split_distance.max(0.0)))
    }
}

impl Default for ExplodeOptions {
    fn default() -> Self {
        Self {
            split_distance: 0.3,
            max_split_distance: 5.0,
            split_policy: SplitPolicy::Radial,
            radial_scale: 5.0,
            radial_elevation: 0.5,
            burst_magnitude: 0.5,
            diagonal_motion: MotionOptions::new(500, EasingFunction::Linear),
            radial_motion: MotionOptions::new(
                1200,
                EasingFunction::ExponentialOut,
            ),
            burst_motion: MotionOptions::new(1000, EasingFunction::ElasticOut),
            reset_motion: MotionOptions::new(
                500,
                EasingFunction::QuadraticOut,
            ),
            conflict_policy: ConflictPolicy::CancelInFlight,
        }
    }
}
