//! Specular bounce tracing.
//!
//! A traced ray reflects through the scene for a bounded number of bounces.
//! At every bounce vertex, each emitter with an unobstructed line of sight
//! to that vertex records it as a heard point; the aggregation step later
//! reduces those points to a virtual position. This models sound reaching
//! the listener via line of sight from a bounce vertex, a cheap proxy for
//! indirect audibility rather than acoustic energy transfer.

use crate::config::PropagationConfig;
use crate::emitter::Emitter;
use crate::math::{reflect, Vec3};
use crate::scene::RayTracer;

/// Follows a specular reflection path from `origin` along `direction`,
/// recording bounce vertices into every emitter that is visible from them.
///
/// Runs as an explicit loop over (origin, direction, remaining bounces), so
/// the bounce budget bounds cost deterministically regardless of geometry;
/// degenerate parallel-wall scenes cannot recurse past it. `bounces == 0`
/// performs no casts at all. A miss terminates the path early.
pub fn trace_bounces(
    tracer: &dyn RayTracer,
    origin: Vec3,
    direction: Vec3,
    bounces: u32,
    emitters: &mut [Emitter],
    config: &PropagationConfig,
) {
    let mut origin = origin;
    let mut direction = direction;
    let mut remaining = bounces;

    while remaining > 0 {
        let Some(hit) = tracer.cast_ray(origin, direction, config.max_ray_distance) else {
            return;
        };
        remaining -= 1;

        // Pull the visibility-test origin slightly off the surface so the
        // rays toward emitters don't clip the wall just hit.
        let probe_origin = hit.point + config.surface_offset * hit.normal;

        for emitter in emitters.iter_mut() {
            let to_emitter = emitter.position() - probe_origin;
            let distance = to_emitter.length();
            if distance <= f32::EPSILON {
                // Emitter sits on the bounce vertex itself; trivially heard.
                emitter.record_heard_point(hit.point);
                continue;
            }
            let toward = to_emitter / distance;
            if tracer.cast_ray(probe_origin, toward, distance).is_none() {
                emitter.record_heard_point(hit.point);
            }
        }

        direction = reflect(direction, hit.normal);
        origin = hit.point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitterDesc, EmitterId};
    use crate::scene::{Aabb, AabbScene, RayHit};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTracer {
        inner: AabbScene,
        casts: AtomicUsize,
    }

    impl CountingTracer {
        fn over(inner: AabbScene) -> Self {
            Self {
                inner,
                casts: AtomicUsize::new(0),
            }
        }

        fn cast_count(&self) -> usize {
            self.casts.load(Ordering::Relaxed)
        }
    }

    impl RayTracer for CountingTracer {
        fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
            self.casts.fetch_add(1, Ordering::Relaxed);
            self.inner.cast_ray(origin, direction, max_distance)
        }

        fn cast_ray_multi(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            hits: &mut [RayHit],
        ) -> usize {
            self.casts.fetch_add(1, Ordering::Relaxed);
            self.inner.cast_ray_multi(origin, direction, max_distance, hits)
        }
    }

    fn emitter_at(position: Vec3) -> Emitter {
        Emitter::new(EmitterId(0), EmitterDesc::at(position))
    }

    #[test]
    fn test_zero_bounces_casts_nothing() {
        let tracer = CountingTracer::over(AabbScene::with_boxes(vec![Aabb::from_center_size(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::splat(2.0),
        )]));
        let mut emitters = vec![emitter_at(Vec3::new(0.0, 5.0, 0.0))];
        trace_bounces(
            &tracer,
            Vec3::ZERO,
            Vec3::X,
            0,
            &mut emitters,
            &PropagationConfig::default(),
        );
        assert_eq!(tracer.cast_count(), 0);
        assert!(emitters[0].heard_points().is_empty());
    }

    #[test]
    fn test_miss_terminates_early() {
        let tracer = CountingTracer::over(AabbScene::empty());
        let mut emitters = vec![emitter_at(Vec3::new(0.0, 5.0, 0.0))];
        trace_bounces(
            &tracer,
            Vec3::ZERO,
            Vec3::X,
            8,
            &mut emitters,
            &PropagationConfig::default(),
        );
        // One cast to discover the miss, then the path ends.
        assert_eq!(tracer.cast_count(), 1);
        assert!(emitters[0].heard_points().is_empty());
    }

    #[test]
    fn test_bounce_vertex_records_visible_emitter() {
        // A wall at x = 10; the emitter sits off to the side with a clear
        // line to the bounce vertex.
        let scene = AabbScene::with_boxes(vec![Aabb::new(
            Vec3::new(10.0, -10.0, -10.0),
            Vec3::new(11.0, 10.0, 10.0),
        )]);
        let mut emitters = vec![emitter_at(Vec3::new(5.0, 3.0, 0.0))];
        trace_bounces(
            &scene,
            Vec3::ZERO,
            Vec3::X,
            1,
            &mut emitters,
            &PropagationConfig::default(),
        );
        let points = emitters[0].heard_points();
        assert_eq!(points.len(), 1);
        assert!((points[0] - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_obstructed_emitter_not_recorded() {
        // Same wall, but the emitter hides behind a second wall relative to
        // the bounce vertex.
        let scene = AabbScene::with_boxes(vec![
            Aabb::new(Vec3::new(10.0, -10.0, -10.0), Vec3::new(11.0, 10.0, 10.0)),
            Aabb::new(Vec3::new(4.0, -10.0, -10.0), Vec3::new(5.0, 10.0, 10.0)),
        ]);
        let mut emitters = vec![emitter_at(Vec3::new(0.0, 0.0, 0.1))];
        trace_bounces(
            &scene,
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::X,
            1,
            &mut emitters,
            &PropagationConfig::default(),
        );
        assert!(emitters[0].heard_points().is_empty());
    }

    #[test]
    fn test_bounce_budget_bounds_casts_between_parallel_walls() {
        // Two facing walls form an infinite reflection corridor; the budget
        // must still terminate the trace.
        let scene = AabbScene::with_boxes(vec![
            Aabb::new(Vec3::new(10.0, -10.0, -10.0), Vec3::new(11.0, 10.0, 10.0)),
            Aabb::new(Vec3::new(-11.0, -10.0, -10.0), Vec3::new(-10.0, 10.0, 10.0)),
        ]);
        let tracer = CountingTracer::over(scene);
        let mut emitters: Vec<Emitter> = Vec::new();
        let bounces = 8;
        trace_bounces(
            &tracer,
            Vec3::ZERO,
            Vec3::X,
            bounces,
            &mut emitters,
            &PropagationConfig::default(),
        );
        // No emitters, so every cast is a bounce segment.
        assert_eq!(tracer.cast_count(), bounces as usize);
    }

    #[test]
    fn test_points_accumulate_without_deduplication() {
        // Corridor again, emitter in the middle: every bounce vertex sees it.
        let scene = AabbScene::with_boxes(vec![
            Aabb::new(Vec3::new(10.0, -10.0, -10.0), Vec3::new(11.0, 10.0, 10.0)),
            Aabb::new(Vec3::new(-11.0, -10.0, -10.0), Vec3::new(-10.0, 10.0, 10.0)),
        ]);
        let mut emitters = vec![emitter_at(Vec3::new(0.0, 3.0, 0.0))];
        trace_bounces(
            &scene,
            Vec3::ZERO,
            Vec3::X,
            4,
            &mut emitters,
            &PropagationConfig::default(),
        );
        assert_eq!(emitters[0].heard_points().len(), 4);
    }
}
