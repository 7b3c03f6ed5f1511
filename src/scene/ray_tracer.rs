//! Ray intersection interface for the propagation core.
//!
//! This module provides the seam between EchoTrace and the host's collision
//! backend. Implement [`RayTracer`] over your existing physics or BVH code;
//! the propagation pass only ever asks for nearest-hit and ordered
//! multi-hit queries against static geometry.

use crate::math::Vec3;

/// Result of a ray intersection test.
///
/// A defaulted `RayHit` is degenerate (zero normal); the penetration probe
/// uses that to mark empty buffer slots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayHit {
    /// World-space hit point.
    pub point: Vec3,

    /// Surface normal at the hit point, normalized, pointing away from the
    /// surface.
    pub normal: Vec3,

    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

impl RayHit {
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal,
            distance,
        }
    }

    /// True when this hit carries real intersection data.
    pub fn is_surface(&self) -> bool {
        self.normal != Vec3::ZERO
    }
}

/// Trait for providing ray intersection queries to the propagation core.
///
/// Implement this to integrate an existing ray tracing system (game engine
/// physics, Embree, a BVH) with EchoTrace.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: the scene geometry is read-only
/// during a pass and may be shared by worlds running passes on independent
/// threads.
///
/// # Performance
///
/// A single pass issues on the order of `rays × bounces × (emitters + 1)`
/// casts. Back the implementation with an acceleration structure for
/// non-trivial scenes.
pub trait RayTracer: Send + Sync {
    /// Returns the nearest intersection along the ray, or `None` if nothing
    /// is hit within `max_distance`.
    ///
    /// `direction` should be normalized; implementations may return `None`
    /// for degenerate directions.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Fills `hits` with intersections along the ray, nearest first, and
    /// returns how many slots were written.
    ///
    /// Non-allocating: at most `hits.len()` intersections are reported and
    /// any further ones are silently dropped.
    fn cast_ray_multi(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        hits: &mut [RayHit],
    ) -> usize;

    /// Volumetric (sphere-swept) variant of [`cast_ray`](Self::cast_ray).
    ///
    /// Backends without a volumetric query fall back to a thin ray.
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        let _ = radius;
        self.cast_ray(origin, direction, max_distance)
    }

    /// Volumetric variant of [`cast_ray_multi`](Self::cast_ray_multi).
    fn cast_sphere_multi(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        hits: &mut [RayHit],
    ) -> usize {
        let _ = radius;
        self.cast_ray_multi(origin, direction, max_distance, hits)
    }
}
