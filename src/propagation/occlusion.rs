//! Bidirectional penetration measurement.
//!
//! How much solid material does a straight segment pass through? Casting
//! forward from one end finds the entry face of each obstructing body;
//! casting backward from the other end finds the exit faces. Summing the
//! entry-to-exit span per body gives the total penetration depth, which the
//! parameter mapper turns into an obstruction factor.

use crate::math::Vec3;
use crate::scene::{RayHit, RayTracer};

/// Fixed capacity of the entry/exit hit buffers. Segments obstructed by
/// more bodies than this are silently truncated to the nearest eight, a
/// documented approximation.
pub const MAX_SEGMENT_HITS: usize = 8;

/// Casts the segment from both ends and fills `entries`/`exits`.
///
/// Exit distances are remapped to `length - reported` so both lists share
/// the forward coordinate sense, then ordered ascending so index `i` in both
/// lists refers to the i-th obstructing body along the segment. `radius > 0`
/// selects volumetric casts. Returns the (entry, exit) hit counts.
pub fn bidirectional_cast(
    tracer: &dyn RayTracer,
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    length: f32,
    entries: &mut [RayHit; MAX_SEGMENT_HITS],
    exits: &mut [RayHit; MAX_SEGMENT_HITS],
) -> (usize, usize) {
    let far_end = origin + direction * length;

    let (entry_count, exit_count) = if radius <= 0.0 {
        (
            tracer.cast_ray_multi(origin, direction, length, entries),
            tracer.cast_ray_multi(far_end, -direction, length, exits),
        )
    } else {
        (
            tracer.cast_sphere_multi(origin, radius, direction, length, entries),
            tracer.cast_sphere_multi(far_end, radius, -direction, length, exits),
        )
    };

    for exit in exits[..exit_count].iter_mut() {
        exit.distance = length - exit.distance;
    }
    // Backward casting reports the farthest body first; reorder so exits
    // line up with their entries by index.
    exits[..exit_count].sort_by(|a, b| a.distance.total_cmp(&b.distance));

    (entry_count, exit_count)
}

/// Measures how much solid material the segment `from -> to` passes
/// through, in world units.
///
/// Returns 0.0 for a clear path, a degenerate segment, or when either
/// directional cast reports nothing (a fully blocked path with no measurable
/// exit measures the same as a clear one; callers needing the distinction
/// have the direct-visibility flag).
pub fn measure_penetration(tracer: &dyn RayTracer, from: Vec3, to: Vec3, radius: f32) -> f32 {
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return 0.0;
    }
    let direction = delta / length;

    let mut entries = [RayHit::default(); MAX_SEGMENT_HITS];
    let mut exits = [RayHit::default(); MAX_SEGMENT_HITS];
    let (entry_count, exit_count) =
        bidirectional_cast(tracer, from, radius, direction, length, &mut entries, &mut exits);

    let mut depth = 0.0;
    for i in 0..entry_count.min(exit_count) {
        if exits[i].is_surface() {
            depth += entries[i].point.distance(exits[i].point);
        }
    }
    depth
}

/// The entry/exit hit pairs behind [`measure_penetration`], for hosts that
/// want the individual obstruction spans.
pub fn penetration_pairs(
    tracer: &dyn RayTracer,
    from: Vec3,
    to: Vec3,
    radius: f32,
) -> Vec<(RayHit, RayHit)> {
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return Vec::new();
    }
    let direction = delta / length;

    let mut entries = [RayHit::default(); MAX_SEGMENT_HITS];
    let mut exits = [RayHit::default(); MAX_SEGMENT_HITS];
    let (entry_count, exit_count) =
        bidirectional_cast(tracer, from, radius, direction, length, &mut entries, &mut exits);

    (0..entry_count.min(exit_count))
        .filter(|&i| exits[i].is_surface())
        .map(|i| (entries[i], exits[i]))
        .collect()
}
