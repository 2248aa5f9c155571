//! Shared utilities for the part manager.
//!
//! Helpers for easing curves, per-part colours, and frame timing.

pub mod color;
pub mod easing;
pub mod frame_timing;
