//! Time-based position animation.
//!
//! Explode and reset operations never move parts themselves: they describe a
//! [`Tween`] and hand it to a [`Scheduler`]. [`TweenScheduler`] is the
//! in-process implementation, advanced once per frame by the render loop.

mod scheduler;
mod tween;

pub use scheduler::{Scheduler, TweenId, TweenScheduler};
pub use tween::{lerp_vec3, Tween};
