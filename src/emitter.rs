//! Sound emitters and their per-pass audibility state.

use crate::math::Vec3;

/// Lightweight, type-safe handle for emitters.
///
/// Returned when adding an emitter to the world. Identity is stable across
/// passes; ids are never reused within one world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmitterId(pub(crate) u64);

impl std::fmt::Display for EmitterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmitterId({})", self.0)
    }
}

/// Static description of a sound emitter.
///
/// World position is owned by the host's transform system; update it through
/// [`Emitter::set_position`] before each pass if the emitter moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterDesc {
    pub position: Vec3,
    /// Volume ceiling; final volume lands in `[0, base_volume]`.
    pub base_volume: f32,
    /// Distance at which falloff begins.
    pub min_distance: f32,
    /// Distance at which the sound has fully faded.
    pub max_distance: f32,
    /// Whether the host loops the clip. Carried for the host's benefit;
    /// propagation does not read it.
    pub looped: bool,
}

impl Default for EmitterDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            base_volume: 1.0,
            min_distance: 1.0,
            max_distance: 500.0,
            looped: false,
        }
    }
}

impl EmitterDesc {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn base_volume(mut self, volume: f32) -> Self {
        self.base_volume = volume;
        self
    }

    pub fn min_distance(mut self, distance: f32) -> Self {
        self.min_distance = distance;
        self
    }

    pub fn max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }
}

/// A registered emitter plus its per-pass audibility state.
///
/// `heard_points` is cleared at the start of every propagation pass and
/// repopulated during it; each point it holds was verified unobstructed from
/// that point to the emitter within the current pass. `virtual_position`
/// equals the true position when the emitter is directly visible or nothing
/// heard it, otherwise the centroid of `heard_points`.
#[derive(Debug, Clone)]
pub struct Emitter {
    id: EmitterId,
    desc: EmitterDesc,
    heard_points: Vec<Vec3>,
    virtual_position: Vec3,
}

impl Emitter {
    pub fn new(id: EmitterId, desc: EmitterDesc) -> Self {
        Self {
            id,
            desc,
            heard_points: Vec::new(),
            virtual_position: desc.position,
        }
    }

    pub fn id(&self) -> EmitterId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.desc.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.desc.position = position;
    }

    pub fn base_volume(&self) -> f32 {
        self.desc.base_volume
    }

    pub fn min_distance(&self) -> f32 {
        self.desc.min_distance
    }

    pub fn max_distance(&self) -> f32 {
        self.desc.max_distance
    }

    pub fn looped(&self) -> bool {
        self.desc.looped
    }

    pub fn desc(&self) -> &EmitterDesc {
        &self.desc
    }

    /// Points from which this emitter was heard during the current pass.
    pub fn heard_points(&self) -> &[Vec3] {
        &self.heard_points
    }

    /// Perceived position derived from the last pass.
    pub fn virtual_position(&self) -> Vec3 {
        self.virtual_position
    }

    pub fn clear_heard_points(&mut self) {
        self.heard_points.clear();
    }

    pub(crate) fn record_heard_point(&mut self, point: Vec3) {
        self.heard_points.push(point);
    }

    pub(crate) fn set_virtual_position(&mut self, position: Vec3) {
        self.virtual_position = position;
    }
}
