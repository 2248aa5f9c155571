//! Easing functions for animation interpolation.
//!
//! Provides the easing curves used by explode and reset tweens. All functions
//! are designed for <100ns evaluation time.

use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Exponential ease-out: `1 - 2^(-10t)`, snapped to 1 at the end.
    ExponentialOut,
    /// Elastic ease-out. Overshoots past 1 and rings back before settling.
    ElasticOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing function: CubicHermite with c1=0.33, c2=1.0 for natural ease-out feel.
    pub const DEFAULT: EasingFunction = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Every curve maps 0 to 0 and 1 to 1;
    /// [`ElasticOut`](Self::ElasticOut) leaves [0.0, 1.0] in between.
    ///
    /// Target performance: <100ns
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        // Clamp input to [0, 1]
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::SqrtOut => t.sqrt(),
            EasingFunction::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            EasingFunction::ElasticOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t - 0.1) * 5.0 * PI).sin() + 1.0
                }
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                // f(t) = c0(1-t)³ + c1·3t(1-t)² + c2·3(1-t)t² + c3·t³
                // where c0=0.0, c3=1.0
                // Simplified: c1·3t(1-t)² + c2·3(1-t)t² + t³
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_hermite_endpoints() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;

        // Test negative input clamps to 0
        assert_eq!(linear.evaluate(-0.5), 0.0);

        // Test input > 1 clamps to 1
        assert_eq!(linear.evaluate(1.5), 1.0);

        let elastic = EasingFunction::ElasticOut;
        assert_eq!(elastic.evaluate(-0.5), 0.0);
        assert_eq!(elastic.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.0), 0.0);
        assert_eq!(quad_out.evaluate(0.5), 0.75); // 1 - (1-0.5)² = 0.75
        assert_eq!(quad_out.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_exponential_out() {
        let expo = EasingFunction::ExponentialOut;
        assert_eq!(expo.evaluate(0.0), 0.0);
        assert!((expo.evaluate(0.1) - 0.5).abs() < 1e-6); // 1 - 2^-1
        assert_eq!(expo.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_elastic_out_overshoots_and_lands() {
        let elastic = EasingFunction::ElasticOut;
        assert_eq!(elastic.evaluate(0.0), 0.0);
        assert_eq!(elastic.evaluate(1.0), 1.0);

        // Peak of the first ring sits at t = 0.2
        let peak = elastic.evaluate(0.2);
        assert!(peak > 1.0, "elastic should overshoot, got {peak}");

        let max = (1..100)
            .map(|i| elastic.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(max < 1.3);
    }

    #[test]
    fn test_every_curve_hits_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::QuadraticIn,
            EasingFunction::QuadraticOut,
            EasingFunction::SqrtOut,
            EasingFunction::ExponentialOut,
            EasingFunction::ElasticOut,
            EasingFunction::DEFAULT,
        ] {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_default_is_cubic_hermite() {
        let default_easing = EasingFunction::default();
        assert_eq!(default_easing, EasingFunction::DEFAULT);
        assert_eq!(
            default_easing,
            EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 }
        );
    }

    #[test]
    fn test_unit_variants_parse_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingFunction,
        }
        let w: Wrapper = toml::from_str("easing = \"elastic_out\"").unwrap();
        assert_eq!(w.easing, EasingFunction::ElasticOut);
    }
}
