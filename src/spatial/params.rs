//! Mapping from propagation results to perceptual audio parameters.
//!
//! Everything here is a pure function of the pass outputs: volume from
//! distance falloff and obstruction, stereo pan from the horizontal bearing
//! to the virtual position, and a low-pass cutoff that dulls distant or
//! obstructed sounds. The audio output pipeline consumes these numbers;
//! no rendering happens in this crate.

use crate::config::PropagationConfig;
use crate::emitter::Emitter;
use crate::math::{inverse_lerp, lerp, project_on_plane, Pose, Vec3};
use crate::propagation::pass::PropagationResult;

/// Cutoff range handed to the audio pipeline, in Hz.
const MIN_CUTOFF_HZ: f32 = 10.0;
const MAX_CUTOFF_HZ: f32 = 22_000.0;

/// Pan never hard-pans fully to one ear.
const PAN_LIMIT: f32 = 0.8;

/// Parameters handed to the audio output pipeline for one emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioParams {
    /// Volume in `[0, base_volume]`.
    pub volume: f32,
    /// Stereo pan in `[-0.8, 0.8]`; positive is to the listener's right.
    pub pan: f32,
    /// Low-pass cutoff in `[10, 22000]` Hz.
    pub low_pass_cutoff: f32,
}

/// Maps one emitter's propagation result to its audio parameters.
///
/// Pure and deterministic. Distance falloff and obstruction use the
/// emitter's true position; the pan bearing uses the virtual position, so an
/// occluded sound appears to come from where its reflections reach the
/// listener.
pub fn map_parameters(
    listener: &Pose,
    emitter: &Emitter,
    result: &PropagationResult,
    config: &PropagationConfig,
) -> AudioParams {
    let distance = listener.position.distance(emitter.position());
    let remapped_dist = inverse_lerp(1.0, emitter.max_distance(), distance.max(1.0));

    let obstruction = config.obstruction_curve.eval(inverse_lerp(
        config.max_obstruction,
        0.0,
        result.occlusion_depth,
    ));

    let volume = emitter.base_volume() * config.falloff_curve.eval(remapped_dist) * obstruction;

    let low_pass_cutoff = (lerp(
        MIN_CUTOFF_HZ,
        MAX_CUTOFF_HZ,
        config.damping_curve.eval(remapped_dist),
    ) * obstruction
        / 2.0)
        .clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);

    let pan = stereo_pan(listener.forward(), listener.position, result.virtual_position);

    AudioParams {
        volume,
        pan,
        low_pass_cutoff,
    }
}

/// Sine of the signed horizontal bearing from the listener's forward
/// direction to `target`, clamped to `[-0.8, 0.8]`.
///
/// Both vectors are flattened onto the horizontal plane before comparison.
/// Degenerate flat vectors (target straight above or below, or a vertical
/// forward) pan to center.
pub fn stereo_pan(forward: Vec3, listener_position: Vec3, target: Vec3) -> f32 {
    let flat_forward = project_on_plane(forward, Vec3::Y);
    let flat_target = project_on_plane(target - listener_position, Vec3::Y);
    if flat_forward.length_squared() <= f32::EPSILON
        || flat_target.length_squared() <= f32::EPSILON
    {
        return 0.0;
    }

    let f = flat_forward.normalize();
    let t = flat_target.normalize();
    // dot with the right basis vector = sin of the signed bearing about +Y.
    let right = f.cross(Vec3::Y);
    t.dot(right).clamp(-PAN_LIMIT, PAN_LIMIT)
}
