//! # EchoTrace
//!
//! Geometric ray-traced audio propagation for 3D scenes. Instead of plain
//! distance attenuation, EchoTrace measures how much geometry occludes each
//! emitter, derives a virtual perceived position for emitters that are only
//! audible indirectly (via specular bounces), and maps both into perceptual
//! parameters — volume, stereo pan, and a low-pass cutoff — for the host's
//! audio pipeline to render.
//!
//! ## Quick start
//!
//! ```no_run
//! use echotrace::*;
//! use std::sync::Arc;
//!
//! // Scene geometry behind the RayTracer trait; AabbScene is the bundled
//! // box backend, or adapt your engine's collision queries.
//! let mut scene = AabbScene::empty();
//! scene.add_box(Aabb::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0)));
//!
//! let mut world = EchoTraceWorld::new(PropagationConfig::default(), Arc::new(scene))?;
//!
//! // Register emitters and keep their positions in sync with your transforms.
//! let source = world.add_emitter(
//!     EmitterDesc::at(Vec3::new(10.0, 0.0, 0.0)).base_volume(0.8),
//! );
//!
//! // Each frame: update the listener pose, run a pass, feed the results to
//! // your audio pipeline.
//! world.set_listener_pose(Pose::from_position(Vec3::ZERO));
//! for report in world.run_pass() {
//!     println!(
//!         "{}: volume {:.2}, pan {:.2}, cutoff {:.0} Hz",
//!         report.emitter, report.params.volume, report.params.pan,
//!         report.params.low_pass_cutoff,
//!     );
//! }
//! # Ok::<(), EchoTraceError>(())
//! ```
//!
//! ## Key components
//!
//! - **[`EchoTraceWorld`]**: emitter registry, listener pose, and the
//!   per-frame pass entry point
//! - **[`RayTracer`]**: trait adapting your collision backend's ray queries
//! - **[`PropagationConfig`]**: sensing-ray count, bounce depth, obstruction
//!   ceiling, and the injected response curves
//! - **[`PassReport`]**: per-emitter occlusion depth, virtual position, and
//!   mapped [`AudioParams`]
//!
//! ## How a pass works
//!
//! 1. A golden-angle direction set seeds bounce traces in every direction
//!    around the listener (plus one straight ahead).
//! 2. Each trace reflects specularly through the scene for a bounded number
//!    of bounces; every bounce vertex with a clear line of sight to an
//!    emitter records a heard point for it.
//! 3. Emitters that are directly visible keep their true position; hidden
//!    ones are perceived at the centroid of their heard points.
//! 4. A bidirectional cast along the direct path measures how much solid
//!    material the sound passes through, and the perceptual mapper turns
//!    distance, obstruction, and bearing into volume, pan, and cutoff.
//!
//! This is a plausibility model, not acoustics: no diffraction, interference,
//! or reverberation is simulated.

pub mod config;
pub mod emitter;
pub mod error;
pub mod math;
pub mod propagation;
pub mod scene;
pub mod spatial;
pub mod world;

pub use config::{PropagationConfig, ResponseCurve};
pub use emitter::{Emitter, EmitterDesc, EmitterId};
pub use error::EchoTraceError;
pub use math::{Pose, Quat, Vec3};
pub use propagation::{PassReport, PropagationResult};
pub use scene::{Aabb, AabbScene, RayHit, RayTracer};
pub use spatial::AudioParams;
pub use world::EchoTraceWorld;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::inverse_lerp;
    use std::sync::Arc;

    /// Single emitter dead ahead with nothing in the way: visible, full
    /// falloff formula, centered pan.
    #[test]
    fn test_end_to_end_unobstructed_emitter() {
        let mut world = EchoTraceWorld::new(
            PropagationConfig::default(),
            Arc::new(AabbScene::empty()),
        )
        .unwrap();

        let base_volume = 0.75;
        let desc = EmitterDesc::at(Vec3::new(10.0, 0.0, 0.0)).base_volume(base_volume);
        let max_distance = desc.max_distance;
        world.add_emitter(desc);

        let mut pose = Pose::from_position(Vec3::ZERO);
        pose.look_at(Vec3::new(10.0, 0.0, 0.0));
        world.set_listener_pose(pose);

        let reports = world.run_pass();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];

        assert!(report.result.directly_visible);
        assert_eq!(report.result.occlusion_depth, 0.0);
        assert_eq!(report.result.virtual_position, Vec3::new(10.0, 0.0, 0.0));

        // Default curves are linear, so the falloff evaluates to the
        // remapped distance itself.
        let expected_volume = base_volume * inverse_lerp(1.0, max_distance, 10.0);
        assert!((report.params.volume - expected_volume).abs() < 1e-6);
        assert!(report.params.pan.abs() < 1e-5);
        assert!((10.0..=22_000.0).contains(&report.params.low_pass_cutoff));
    }

    /// An emitter boxed in on all sides is inaudible: occluded, unheard by
    /// any bounce, and perceived at its true position.
    #[test]
    fn test_end_to_end_sealed_emitter() {
        let emitter_position = Vec3::new(10.0, 0.0, 0.0);
        let scene = AabbScene::with_boxes(vec![
            // Six slabs sealing the emitter in a hollow box.
            Aabb::new(Vec3::new(8.0, -2.0, -2.0), Vec3::new(8.5, 2.0, 2.0)),
            Aabb::new(Vec3::new(11.5, -2.0, -2.0), Vec3::new(12.0, 2.0, 2.0)),
            Aabb::new(Vec3::new(8.0, -2.0, -2.0), Vec3::new(12.0, 2.0, -1.5)),
            Aabb::new(Vec3::new(8.0, -2.0, 1.5), Vec3::new(12.0, 2.0, 2.0)),
            Aabb::new(Vec3::new(8.0, -2.0, -2.0), Vec3::new(12.0, -1.5, 2.0)),
            Aabb::new(Vec3::new(8.0, 1.5, -2.0), Vec3::new(12.0, 2.0, 2.0)),
        ]);
        let mut world =
            EchoTraceWorld::new(PropagationConfig::default(), Arc::new(scene)).unwrap();
        world.add_emitter(EmitterDesc::at(emitter_position));
        world.set_listener_pose(Pose::from_position(Vec3::ZERO));

        let reports = world.run_pass();
        let report = &reports[0];

        assert!(!report.result.directly_visible);
        assert!(report.result.occlusion_depth > 0.0);
        assert!(world.emitters()[0].heard_points().is_empty());
        // Nothing heard it, so the virtual position falls back to the truth.
        assert_eq!(report.result.virtual_position, emitter_position);
    }

    /// Two consecutive passes over an occluding scene agree exactly.
    #[test]
    fn test_end_to_end_determinism() {
        let scene = AabbScene::with_boxes(vec![
            Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0)),
            Aabb::new(Vec3::new(-30.0, -3.0, -30.0), Vec3::new(30.0, -2.0, 30.0)),
        ]);
        let mut world =
            EchoTraceWorld::new(PropagationConfig::default(), Arc::new(scene)).unwrap();
        world.add_emitter(EmitterDesc::at(Vec3::new(10.0, 0.0, 0.0)));
        let mut pose = Pose::from_position(Vec3::ZERO);
        pose.look_at(Vec3::new(10.0, 0.0, 0.0));
        world.set_listener_pose(pose);

        let first = world.run_pass();
        let second = world.run_pass();
        assert_eq!(first, second);
    }
}
