//! Frame-driven tween scheduler.

use std::time::Duration;

use crate::scene::{NodeId, SceneGraph};

use super::tween::Tween;

/// Handle of a submitted tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// Accepts tween submissions.
///
/// Submitting only enqueues; positions move when the owner of the scheduler
/// advances it. Tweens have no completion callbacks.
pub trait Scheduler {
    /// Enqueue `tween`, starting now.
    fn submit(&mut self, tween: Tween) -> TweenId;

    /// Drop every in-flight tween writing `target`. The node keeps whatever
    /// position it last received. Returns how many were dropped.
    fn cancel_target(&mut self, target: NodeId) -> usize;

    /// Number of in-flight tweens writing `target`.
    fn active_on(&self, target: NodeId) -> usize;
}

#[derive(Debug, Clone)]
struct ActiveTween {
    id: TweenId,
    tween: Tween,
    started_at: Duration,
}

/// In-process scheduler advanced by the render loop.
///
/// Every [`update`](Self::update) writes each active tween in submission
/// order, so when two tweens target the same node the later submission wins
/// the frame. Finished tweens write their exact end value once and are then
/// dropped.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    /// Simulated clock: total time advanced so far.
    now: Duration,
    next_id: u64,
    active: Vec<ActiveTween>,
}

impl TweenScheduler {
    /// Empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time advanced so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now
    }

    /// Number of in-flight tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// In-flight tweens in submission order.
    pub fn pending(&self) -> impl Iterator<Item = (TweenId, &Tween)> + '_ {
        self.active.iter().map(|a| (a.id, &a.tween))
    }

    /// Advance the clock by `dt` and write every active tween into `scene`.
    ///
    /// Returns the number of position writes made.
    pub fn update(&mut self, dt: Duration, scene: &mut impl SceneGraph) -> usize {
        self.now += dt;
        let now = self.now;
        let mut writes = 0;

        self.active.retain(|active| {
            let elapsed = now.saturating_sub(active.started_at);
            let (position, done) = active.tween.sample(elapsed);
            if scene.set_position(active.tween.target, position) {
                writes += 1;
            } else {
                log::trace!(
                    "tween {:?} targets missing node {}",
                    active.id,
                    active.tween.target
                );
            }
            !done
        });

        writes
    }

    /// Advance in `step` increments until idle or `max_steps` is reached.
    ///
    /// Returns `true` if the scheduler went idle.
    pub fn settle(
        &mut self,
        scene: &mut impl SceneGraph,
        step: Duration,
        max_steps: usize,
    ) -> bool {
        for _ in 0..max_steps {
            if self.is_idle() {
                return true;
            }
            let _ = self.update(step, scene);
        }
        self.is_idle()
    }

    /// Drop every in-flight tween.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl Scheduler for TweenScheduler {
    fn submit(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        log::trace!(
            "submit {id:?}: {} {} -> {} over {:?}",
            tween.target,
            tween.from,
            tween.to,
            tween.duration
        );
        self.active.push(ActiveTween {
            id,
            tween,
            started_at: self.now,
        });
        id
    }

    fn cancel_target(&mut self, target: NodeId) -> usize {
        let before = self.active.len();
        self.active.retain(|a| a.tween.target != target);
        before - self.active.len()
    }

    fn active_on(&self, target: NodeId) -> usize {
        self.active
            .iter()
            .filter(|a| a.tween.target == target)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::fixtures::line_of_three;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_update_moves_and_finishes() {
        let (mut scene, _, [a, _, _]) = line_of_three();
        let mut scheduler = TweenScheduler::new();
        let _ = scheduler
            .submit(Tween::new(a, Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0)).over(ms(100)));

        assert_eq!(scheduler.update(ms(50), &mut scene), 1);
        let mid = scene.position(a).unwrap();
        assert!((mid.y - 2.0).abs() < 1e-4);
        assert_eq!(scheduler.len(), 1);

        assert_eq!(scheduler.update(ms(50), &mut scene), 1);
        assert_eq!(scene.position(a), Some(Vec3::new(0.0, 4.0, 0.0)));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_nothing_moves_until_update() {
        let (mut scene, _, [a, _, _]) = line_of_three();
        let mut scheduler = TweenScheduler::new();
        let _ = scheduler.submit(Tween::new(a, Vec3::ZERO, Vec3::ONE).over(ms(10)));
        assert_eq!(scene.position(a), Some(Vec3::ZERO));
        assert!(scheduler.settle(&mut scene, ms(5), 10));
        assert_eq!(scene.position(a), Some(Vec3::ONE));
    }

    #[test]
    fn test_tween_starts_at_submission_time() {
        let (mut scene, _, [a, _, _]) = line_of_three();
        let mut scheduler = TweenScheduler::new();
        let _ = scheduler.update(ms(1000), &mut scene);

        let _ = scheduler.submit(Tween::new(a, Vec3::ZERO, Vec3::X).over(ms(100)));
        let _ = scheduler.update(ms(50), &mut scene);
        let x = scene.position(a).unwrap().x;
        assert!((x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_last_submitted_tween_wins_shared_target() {
        let (mut scene, _, [a, _, _]) = line_of_three();
        let mut scheduler = TweenScheduler::new();
        let _ = scheduler.submit(Tween::new(a, Vec3::ZERO, Vec3::X).over(ms(100)));
        let _ = scheduler.submit(Tween::new(a, Vec3::ZERO, Vec3::Y).over(ms(200)));

        assert_eq!(scheduler.update(ms(100), &mut scene), 2);
        // First tween finished this frame but the second wrote after it.
        let pos = scene.position(a).unwrap();
        assert!((pos - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-4);
        assert_eq!(scheduler.active_on(a), 1);
    }

    #[test]
    fn test_cancel_target_keeps_position() {
        let (mut scene, _, [a, b, _]) = line_of_three();
        let mut scheduler = TweenScheduler::new();
        let _ = scheduler.submit(Tween::new(a, Vec3::ZERO, Vec3::X).over(ms(100)));
        let _ = scheduler.submit(Tween::new(a, Vec3::ZERO, Vec3::Y).over(ms(100)));
        let _ = scheduler.submit(Tween::new(b, Vec3::X, Vec3::Z).over(ms(100)));
        let _ = scheduler.update(ms(50), &mut scene);
        let frozen = scene.position(a).unwrap();

        assert_eq!(scheduler.cancel_target(a), 2);
        assert_eq!(scheduler.active_on(a), 0);
        assert_eq!(scheduler.active_on(b), 1);

        let _ = scheduler.update(ms(100), &mut scene);
        assert_eq!(scene.position(a), Some(frozen));
        assert_eq!(scene.position(b), Some(Vec3::Z));
    }

    #[test]
    fn test_missing_target_is_dropped_without_writes() {
        let (mut scene, _, _) = line_of_three();
        let mut scheduler = TweenScheduler::new();
        let _ = scheduler.submit(Tween::new(NodeId(999), Vec3::ZERO, Vec3::X));
        assert_eq!(scheduler.update(ms(1), &mut scene), 0);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_ids_increase() {
        let mut scheduler = TweenScheduler::new();
        let a = scheduler.submit(Tween::new(NodeId(0), Vec3::ZERO, Vec3::X));
        let b = scheduler.submit(Tween::new(NodeId(0), Vec3::ZERO, Vec3::X));
        assert!(b > a);
        assert_eq!(scheduler.pending().count(), 2);
    }
}
