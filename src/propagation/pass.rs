//! Full propagation pass: sensing rays, bounce traces, aggregation,
//! occlusion measurement, and parameter mapping.

use crate::config::PropagationConfig;
use crate::emitter::{Emitter, EmitterId};
use crate::math::{Pose, Vec3};
use crate::propagation::bounce::trace_bounces;
use crate::propagation::occlusion::measure_penetration;
use crate::propagation::sensing::sensing_directions;
use crate::scene::RayTracer;
use crate::spatial::params::{map_parameters, AudioParams};

/// Per-emitter outcome of a propagation pass, recomputed every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationResult {
    /// World units of solid material along the listener-to-emitter segment.
    pub occlusion_depth: f32,
    /// Where the emitter is perceived to be: its true position when directly
    /// visible (or when nothing heard it), else the centroid of this pass's
    /// heard points.
    pub virtual_position: Vec3,
    /// Whether a straight ray from the listener reaches the emitter
    /// unobstructed.
    pub directly_visible: bool,
}

/// One emitter's propagation result plus the mapped audio parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    pub emitter: EmitterId,
    pub result: PropagationResult,
    pub params: AudioParams,
}

/// Runs one complete propagation pass.
///
/// Clears every emitter's heard points, seeds one listener-forward bounce
/// trace plus `num_sensing_rays` golden-angle traces, aggregates heard
/// points into virtual positions, measures direct-path penetration, and maps
/// the perceptual parameters. Mutates each emitter's `heard_points` and
/// `virtual_position`; everything else about the scene is read-only.
///
/// Infallible: degenerate rays and empty heard sets fall back to safe
/// defaults rather than failing the pass. Deterministic for fixed inputs.
pub fn run_pass(
    tracer: &dyn RayTracer,
    listener: &Pose,
    emitters: &mut [Emitter],
    config: &PropagationConfig,
) -> Vec<PassReport> {
    for emitter in emitters.iter_mut() {
        emitter.clear_heard_points();
    }

    trace_bounces(
        tracer,
        listener.position,
        listener.forward(),
        config.bounce_depth,
        emitters,
        config,
    );
    for direction in sensing_directions(config.num_sensing_rays) {
        trace_bounces(
            tracer,
            listener.position,
            direction,
            config.bounce_depth,
            emitters,
            config,
        );
    }

    let mut reports = Vec::with_capacity(emitters.len());
    for emitter in emitters.iter_mut() {
        let directly_visible = is_directly_visible(tracer, listener.position, emitter.position());
        let virtual_position = virtual_position_for(emitter, directly_visible);
        emitter.set_virtual_position(virtual_position);

        let occlusion_depth = measure_penetration(
            tracer,
            listener.position,
            emitter.position(),
            config.cast_radius,
        );

        let result = PropagationResult {
            occlusion_depth,
            virtual_position,
            directly_visible,
        };
        let params = map_parameters(listener, emitter, &result, config);
        reports.push(PassReport {
            emitter: emitter.id(),
            result,
            params,
        });
    }

    log::debug!(
        "propagation pass: {} emitters, {} sensing rays, {} bounces",
        reports.len(),
        config.num_sensing_rays,
        config.bounce_depth,
    );

    reports
}

/// Whether a straight ray from `listener` to `target` is unobstructed.
///
/// A degenerate segment (listener standing on the emitter) counts as
/// visible rather than erroring.
pub fn is_directly_visible(tracer: &dyn RayTracer, listener: Vec3, target: Vec3) -> bool {
    let delta = target - listener;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return true;
    }
    tracer.cast_ray(listener, delta / distance, distance).is_none()
}

/// Aggregation policy: the emitter's true position when it is directly
/// visible or nothing heard it this pass, otherwise the centroid of its
/// heard points. The empty-set fallback is a precondition check, never a
/// division by zero.
pub fn virtual_position_for(emitter: &Emitter, directly_visible: bool) -> Vec3 {
    let points = emitter.heard_points();
    if directly_visible || points.is_empty() {
        return emitter.position();
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}
