//! Ember Particles - single-emitter particle lifecycle engine
//!
//! Provides one emitter driving point particles onto one surface:
//! - One spawn per tick at the emitter origin
//! - Per-particle direction/speed/size/color from pluggable producers
//! - Stock generators with per-particle jitter, oscillation, and decay
//! - Tolerance-band boundary with destruction on exit
//! - Ordered PRE/POST render listeners with soft removal

pub mod config;
pub mod emitter;
pub mod generators;
pub mod listener;
pub mod particle;
pub mod producer;
pub mod rand;

use ember_core::Result;
use ember_render::Surface;
use ember_runtime::{InputState, RuntimeSystem};

pub use config::{ColorSpec, DirectionSpec, EmitterConfig, SizeSpec, SpeedSpec};
pub use emitter::{Boundary, EmitterState, ParticleEmitter, RenderContext, RenderListener};
pub use generators::{
    exponential_attenuation_speed_generator, radial_direction_generator,
    random_direction_generator, random_light_color_generator, random_size_generator,
};
pub use listener::{ListenerId, ListenerPhase, ListenerRegistry};
pub use particle::{Particle, ParticleFate, ParticleId};
pub use producer::{Generator, Producer, Sampler, Value};
pub use crate::rand::ParticleRng;

/// Particle system driven by the run loop.
///
/// Pointer clicks move the emitter origin before the frame is ticked.
pub struct ParticleSystem<S: Surface> {
    pub emitter: ParticleEmitter<S>,
}

impl<S: Surface> ParticleSystem<S> {
    pub fn new(emitter: ParticleEmitter<S>) -> Self {
        Self { emitter }
    }

    pub fn into_emitter(self) -> ParticleEmitter<S> {
        self.emitter
    }
}

impl<S: Surface> RuntimeSystem for ParticleSystem<S> {
    fn initialize(&mut self) -> Result<()> {
        let origin = self.emitter.origin();
        let surface = self.emitter.surface();
        log::info!(
            "[particles] Emitting at ({}, {}) onto a {}x{} surface",
            origin.x,
            origin.y,
            surface.width(),
            surface.height()
        );
        Ok(())
    }

    fn update(&mut self, input: &InputState) -> Result<()> {
        for click in input.clicks() {
            self.emitter.set_origin(click.x, click.y);
        }
        self.emitter.tick();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!(
            "[particles] {} particle(s) live after {} frame(s)",
            self.emitter.particle_count(),
            self.emitter.frame()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Point2;
    use ember_render::RecordingSurface;
    use ember_runtime::{ManualScheduler, Runner, ScriptedPointer};

    #[test]
    fn click_moves_origin_before_spawn() {
        let mut emitter = ParticleEmitter::with_seed(RecordingSurface::new(100, 100), 5);
        emitter.set_speed(Producer::constant(0.0));
        let mut system = ParticleSystem::new(emitter);

        let pointer = ScriptedPointer::new().click_at(1, 12.0, 34.0);
        let mut runner = Runner::new(ManualScheduler::new(), pointer);
        let stats = runner.run(&mut system, Some(2)).unwrap();
        assert_eq!(stats.ticks, 2);

        let emitter = system.into_emitter();
        assert_eq!(emitter.origin(), Point2::new(12.0, 34.0));
        let mut coords: Vec<Point2> = emitter.state().particles().map(|p| p.coordinate()).collect();
        coords.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(coords, vec![Point2::new(12.0, 34.0), Point2::new(50.0, 50.0)]);
    }

    #[test]
    fn runner_ticks_match_emitter_frames() {
        let emitter = ParticleEmitter::with_seed(RecordingSurface::new(100, 100), 9);
        let mut system = ParticleSystem::new(emitter);
        let mut runner = Runner::new(ManualScheduler::new(), ember_runtime::NoInput);
        runner.run(&mut system, Some(7)).unwrap();
        assert_eq!(system.emitter.frame(), 7);
        assert_eq!(system.emitter.surface().clear_count(), 7);
        assert_eq!(system.name(), "particles");
    }
}
