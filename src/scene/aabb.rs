//! Axis-aligned box scene: a small, deterministic [`RayTracer`] backend.
//!
//! Real integrations adapt their engine's collision queries; this backend
//! exists so the library is usable and testable without one. Boxes report
//! their entry face only, matching the one-sided behavior of typical physics
//! raycasts (a ray starting inside a box does not hit it).

use crate::math::Vec3;
use crate::scene::ray_tracer::{RayHit, RayTracer};

/// Axis-aligned box spanning `min..=max` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    fn inflate(&self, radius: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(radius),
            max: self.max + Vec3::splat(radius),
        }
    }

    /// Slab test returning the entry-face hit, if any, within `max_distance`.
    fn entry_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let o = origin.to_array();
        let d = direction.to_array();
        let mn = self.min.to_array();
        let mx = self.max.to_array();

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = None;

        for i in 0..3 {
            if d[i].abs() < 1e-9 {
                // Parallel to this slab: the origin must lie within it.
                if o[i] < mn[i] || o[i] > mx[i] {
                    return None;
                }
                continue;
            }
            let mut t0 = (mn[i] - o[i]) / d[i];
            let mut t1 = (mx[i] - o[i]) / d[i];
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_axis = Some(i);
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        let axis = enter_axis?;
        // t_enter <= 0 means the origin is inside the box or past it.
        if t_enter <= 0.0 || t_enter > max_distance {
            return None;
        }

        let mut normal = [0.0f32; 3];
        normal[axis] = -d[axis].signum();
        Some(RayHit::new(
            origin + direction * t_enter,
            Vec3::from_array(normal),
            t_enter,
        ))
    }
}

/// A scene made of axis-aligned boxes.
#[derive(Debug, Clone, Default)]
pub struct AabbScene {
    boxes: Vec<Aabb>,
}

impl AabbScene {
    /// An empty scene: every cast misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_boxes(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    pub fn add_box(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    fn nearest(&self, origin: Vec3, direction: Vec3, max_distance: f32, radius: f32) -> Option<RayHit> {
        self.boxes
            .iter()
            .filter_map(|b| {
                if radius > 0.0 {
                    b.inflate(radius).entry_hit(origin, direction, max_distance)
                } else {
                    b.entry_hit(origin, direction, max_distance)
                }
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn collect(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        radius: f32,
        hits: &mut [RayHit],
    ) -> usize {
        let mut found: Vec<RayHit> = self
            .boxes
            .iter()
            .filter_map(|b| {
                if radius > 0.0 {
                    b.inflate(radius).entry_hit(origin, direction, max_distance)
                } else {
                    b.entry_hit(origin, direction, max_distance)
                }
            })
            .collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let count = found.len().min(hits.len());
        hits[..count].copy_from_slice(&found[..count]);
        count
    }
}

impl RayTracer for AabbScene {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.nearest(origin, direction, max_distance, 0.0)
    }

    fn cast_ray_multi(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        hits: &mut [RayHit],
    ) -> usize {
        self.collect(origin, direction, max_distance, 0.0, hits)
    }

    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        self.nearest(origin, direction, max_distance, radius)
    }

    fn cast_sphere_multi(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        hits: &mut [RayHit],
    ) -> usize {
        self.collect(origin, direction, max_distance, radius, hits)
    }
}
