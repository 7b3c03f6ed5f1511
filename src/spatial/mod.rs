// Perceptual parameter mapping for the audio output pipeline.

pub mod params;

pub use params::{map_parameters, stereo_pan, AudioParams};
