//! Configuration for a propagation pass.

use crate::error::{EchoTraceError, Result};
use std::fmt;
use std::sync::Arc;

/// An injected response curve: a monotonic mapping on `[0, 1] -> [0, 1]`.
///
/// The propagation core only depends on the evaluation contract, not the
/// curve's shape; hosts supply whatever falloff/damping/obstruction response
/// they have authored. Inputs are clamped to `[0, 1]` before evaluation.
#[derive(Clone)]
pub struct ResponseCurve(Arc<dyn Fn(f32) -> f32 + Send + Sync>);

impl ResponseCurve {
    pub fn from_fn(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// The identity mapping.
    pub fn linear() -> Self {
        Self::from_fn(|t| t)
    }

    /// Smooth ease-in/ease-out (`3t² - 2t³`).
    pub fn smoothstep() -> Self {
        Self::from_fn(|t| t * t * (3.0 - 2.0 * t))
    }

    pub fn eval(&self, t: f32) -> f32 {
        (self.0)(t.clamp(0.0, 1.0))
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl fmt::Debug for ResponseCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseCurve")
    }
}

/// Tuning parameters for a propagation pass.
#[derive(Debug, Clone)]
pub struct PropagationConfig {
    /// Number of golden-angle sensing rays seeded per pass (in addition to
    /// the single listener-forward ray).
    pub num_sensing_rays: usize,
    /// Maximum specular bounces per traced ray.
    pub bounce_depth: u32,
    /// Occlusion depth (world units of solid material) at which a sound is
    /// considered fully obstructed; normalization ceiling for the
    /// obstruction factor.
    pub max_obstruction: f32,
    /// Maximum length of any single bounce segment.
    pub max_ray_distance: f32,
    /// Radius for occlusion casts. `<= 0` uses thin rays; `> 0` uses
    /// volumetric (sphere-swept) casts, softening detection against thin
    /// geometry edges.
    pub cast_radius: f32,
    /// Offset applied along the surface normal before casting visibility
    /// rays from a bounce vertex, preventing self-intersection with the
    /// surface just hit.
    pub surface_offset: f32,
    /// Distance falloff response for volume.
    pub falloff_curve: ResponseCurve,
    /// Distance damping response for the low-pass cutoff.
    pub damping_curve: ResponseCurve,
    /// Obstruction response applied to the normalized occlusion factor.
    pub obstruction_curve: ResponseCurve,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            num_sensing_rays: 100,
            bounce_depth: 8,
            max_obstruction: 10.0,
            max_ray_distance: 1000.0,
            cast_radius: 0.0,
            surface_offset: 0.1,
            falloff_curve: ResponseCurve::linear(),
            damping_curve: ResponseCurve::linear(),
            obstruction_curve: ResponseCurve::linear(),
        }
    }
}

impl PropagationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_sensing_rays(mut self, count: usize) -> Self {
        self.num_sensing_rays = count;
        self
    }

    pub fn bounce_depth(mut self, depth: u32) -> Self {
        self.bounce_depth = depth;
        self
    }

    pub fn max_obstruction(mut self, depth: f32) -> Self {
        self.max_obstruction = depth;
        self
    }

    pub fn max_ray_distance(mut self, distance: f32) -> Self {
        self.max_ray_distance = distance;
        self
    }

    pub fn cast_radius(mut self, radius: f32) -> Self {
        self.cast_radius = radius;
        self
    }

    pub fn surface_offset(mut self, offset: f32) -> Self {
        self.surface_offset = offset;
        self
    }

    pub fn falloff_curve(mut self, curve: ResponseCurve) -> Self {
        self.falloff_curve = curve;
        self
    }

    pub fn damping_curve(mut self, curve: ResponseCurve) -> Self {
        self.damping_curve = curve;
        self
    }

    pub fn obstruction_curve(mut self, curve: ResponseCurve) -> Self {
        self.obstruction_curve = curve;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_sensing_rays == 0 {
            return Err(EchoTraceError::Configuration(
                "num_sensing_rays must be at least 1".into(),
            ));
        }
        if self.max_obstruction <= 0.0 {
            return Err(EchoTraceError::Configuration(
                "max_obstruction must be positive".into(),
            ));
        }
        if self.max_ray_distance <= 0.0 {
            return Err(EchoTraceError::Configuration(
                "max_ray_distance must be positive".into(),
            ));
        }
        if self.surface_offset < 0.0 {
            return Err(EchoTraceError::Configuration(
                "surface_offset must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PropagationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(PropagationConfig::new()
            .num_sensing_rays(0)
            .validate()
            .is_err());
        assert!(PropagationConfig::new()
            .max_obstruction(0.0)
            .validate()
            .is_err());
        assert!(PropagationConfig::new()
            .max_ray_distance(-1.0)
            .validate()
            .is_err());
        assert!(PropagationConfig::new()
            .surface_offset(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_response_curve_clamps_input() {
        let curve = ResponseCurve::linear();
        assert_eq!(curve.eval(-0.5), 0.0);
        assert_eq!(curve.eval(1.5), 1.0);
        assert_eq!(curve.eval(0.25), 0.25);
    }

    #[test]
    fn test_smoothstep_endpoints() {
        let curve = ResponseCurve::smoothstep();
        assert_eq!(curve.eval(0.0), 0.0);
        assert_eq!(curve.eval(1.0), 1.0);
        assert_eq!(curve.eval(0.5), 0.5);
    }
}
