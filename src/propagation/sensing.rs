//! Sensing-ray direction generation.

use crate::math::Vec3;

/// Generates `count` unit vectors covering the sphere via the golden-angle
/// (Fibonacci) spiral.
///
/// Deterministic and stateless: the same `count` always yields the same
/// sequence. Coverage is near-uniform with no clustering at the poles,
/// independent of scene content.
pub fn sensing_directions(count: usize) -> Vec<Vec3> {
    // Golden angle in radians.
    let phi = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());

    // The y-step divides by count - 1; a single ray degenerates to the pole.
    let denom = (count.saturating_sub(1)).max(1) as f32;

    (0..count)
        .map(|i| {
            let y = 1.0 - (i as f32 / denom) * 2.0;
            let radius = (1.0 - y * y).max(0.0).sqrt();
            let theta = phi * i as f32;
            Vec3::new(theta.cos() * radius, y, theta.sin() * radius)
        })
        .collect()
}
