//! World: emitter registry, listener pose, and the pass entry point.

use crate::config::PropagationConfig;
use crate::emitter::{Emitter, EmitterDesc, EmitterId};
use crate::error::{EchoTraceError, Result};
use crate::math::Pose;
use crate::propagation::pass::{run_pass, PassReport};
use crate::scene::RayTracer;
use std::sync::Arc;

/// Main object for ray-traced audio propagation.
///
/// `EchoTraceWorld` owns the emitter registry and the listener pose, and
/// borrows the scene geometry through a shared [`RayTracer`]. The host
/// updates emitter positions and the listener pose as its transforms move,
/// then calls [`run_pass`](Self::run_pass) at whatever cadence it chooses;
/// there is no implicit scheduling.
///
/// # Concurrency
///
/// A pass is synchronous and single-threaded. The scene tracer is read-only
/// and may back several worlds at once (one per listener); each world owns
/// its emitters' heard-point buffers, so independent worlds can run passes
/// on separate threads without locking.
pub struct EchoTraceWorld {
    config: PropagationConfig,
    tracer: Arc<dyn RayTracer>,
    emitters: Vec<Emitter>,
    next_emitter_id: u64,
    listener: Pose,
    last_reports: Vec<PassReport>,
}

impl EchoTraceWorld {
    pub fn new(config: PropagationConfig, tracer: Arc<dyn RayTracer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tracer,
            emitters: Vec::new(),
            next_emitter_id: 0,
            listener: Pose::identity(),
            last_reports: Vec::new(),
        })
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Registers an emitter and returns its handle.
    pub fn add_emitter(&mut self, desc: EmitterDesc) -> EmitterId {
        let id = EmitterId(self.next_emitter_id);
        self.next_emitter_id += 1;
        self.emitters.push(Emitter::new(id, desc));
        id
    }

    /// Unregisters an emitter. Takes effect from the next pass.
    pub fn remove_emitter(&mut self, id: EmitterId) -> Result<()> {
        let index = self
            .emitters
            .iter()
            .position(|e| e.id() == id)
            .ok_or(EchoTraceError::UnknownEmitter(id))?;
        self.emitters.remove(index);
        Ok(())
    }

    /// Replaces the whole registry with a fresh set of emitters, returning
    /// their handles in order.
    ///
    /// Hosts whose emitter set changes wholesale (level load, scene swap)
    /// use this instead of diffing adds and removes.
    pub fn refresh(&mut self, descs: impl IntoIterator<Item = EmitterDesc>) -> Vec<EmitterId> {
        self.emitters.clear();
        self.last_reports.clear();
        descs.into_iter().map(|desc| self.add_emitter(desc)).collect()
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.iter().find(|e| e.id() == id)
    }

    /// Mutable access, e.g. to move an emitter with its host transform.
    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters.iter_mut().find(|e| e.id() == id)
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn set_listener_pose(&mut self, pose: Pose) {
        self.listener = pose;
    }

    pub fn listener_pose(&self) -> Pose {
        self.listener
    }

    /// Runs one propagation pass against the current listener pose and
    /// emitter set, returning per-emitter reports for the audio pipeline.
    ///
    /// The reports are also retained; [`last_reports`](Self::last_reports)
    /// returns the previous pass's output (virtual positions included) until
    /// the next call.
    pub fn run_pass(&mut self) -> Vec<PassReport> {
        let reports = run_pass(
            self.tracer.as_ref(),
            &self.listener,
            &mut self.emitters,
            &self.config,
        );
        self.last_reports = reports.clone();
        reports
    }

    /// Output of the most recent pass, empty before the first one.
    pub fn last_reports(&self) -> &[PassReport] {
        &self.last_reports
    }
}
