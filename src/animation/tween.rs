//! A single position tween.

use std::time::Duration;

use glam::Vec3;

use crate::scene::NodeId;
use crate::util::easing::EasingFunction;

/// Linear interpolation between two Vec3 positions.
#[inline]
pub fn lerp_vec3(t: f32, start: Vec3, end: Vec3) -> Vec3 {
    start + (end - start) * t
}

/// Request to move one node's position from `from` to `to`.
///
/// Consumers construct tweens with [`Tween::new`] and refine them with the
/// builder methods:
///
/// ```
/// # use std::time::Duration;
/// # use glam::Vec3;
/// # use splay::animation::Tween;
/// # use splay::scene::NodeId;
/// # use splay::util::easing::EasingFunction;
/// let tween = Tween::new(NodeId(3), Vec3::ZERO, Vec3::X)
///     .over(Duration::from_millis(500))
///     .with_easing(EasingFunction::QuadraticOut);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Node whose position is written.
    pub target: NodeId,
    /// Start value.
    pub from: Vec3,
    /// End value.
    pub to: Vec3,
    /// Length of one leg.
    pub duration: Duration,
    /// Curve applied within each leg.
    pub easing: EasingFunction,
    /// Extra legs after the first.
    pub repeat: u32,
    /// Whether odd legs run from `to` back to `from`.
    pub yoyo: bool,
}

impl Tween {
    /// Linear, single-leg tween with zero duration.
    #[must_use]
    pub fn new(target: NodeId, from: Vec3, to: Vec3) -> Self {
        Self {
            target,
            from,
            to,
            duration: Duration::ZERO,
            easing: EasingFunction::Linear,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Set the leg duration.
    #[must_use]
    pub fn over(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Run `times` extra legs.
    #[must_use]
    pub fn repeating(mut self, times: u32) -> Self {
        self.repeat = times;
        self
    }

    /// Alternate direction on every leg.
    #[must_use]
    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Total running time across all legs.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.duration.saturating_mul(self.repeat.saturating_add(1))
    }

    /// Value written once the tween has finished.
    #[must_use]
    pub fn final_value(&self) -> Vec3 {
        if self.yoyo && self.repeat % 2 == 1 {
            self.from
        } else {
            self.to
        }
    }

    /// Sample the tween `elapsed` after it started.
    ///
    /// Returns the position and whether the tween has finished. A finished
    /// tween always yields exactly [`final_value`](Self::final_value).
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> (Vec3, bool) {
        if self.duration.is_zero() || elapsed >= self.total_duration() {
            return (self.final_value(), true);
        }

        let legs = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let leg = legs.floor();
        let local = (legs - leg) as f32;
        let reversed = self.yoyo && (leg as u64) % 2 == 1;
        let t = if reversed { 1.0 - local } else { local };

        (lerp_vec3(self.easing.evaluate(t), self.from, self.to), false)
    }
}
