//! Scene geometry interface for propagation.
//!
//! The propagation core never owns geometry; it issues intersection queries
//! through the [`RayTracer`] trait and treats whatever backs it (engine
//! physics, a BVH, the bundled [`AabbScene`]) as read-only for the duration
//! of a pass.
//!
//! # Workflow
//!
//! 1. Implement [`RayTracer`] over your collision backend (or build an
//!    [`AabbScene`] for simple box geometry).
//! 2. Hand it to [`EchoTraceWorld::new`](crate::world::EchoTraceWorld::new).
//! 3. Each `run_pass` issues nearest-hit casts for bounces and visibility
//!    and ordered multi-hit casts for penetration measurement.

pub mod aabb;
pub mod ray_tracer;

pub use aabb::{Aabb, AabbScene};
pub use ray_tracer::{RayHit, RayTracer};
