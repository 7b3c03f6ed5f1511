//! The propagation core: sensing-ray generation, specular bounce tracing,
//! penetration measurement, and per-pass aggregation.

pub mod bounce;
pub mod occlusion;
pub mod pass;
pub mod sensing;

pub use bounce::trace_bounces;
pub use occlusion::{
    bidirectional_cast, measure_penetration, penetration_pairs, MAX_SEGMENT_HITS,
};
pub use pass::{is_directly_visible, run_pass, virtual_position_for, PassReport, PropagationResult};
pub use sensing::sensing_directions;
