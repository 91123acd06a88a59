//! The particle emitter: spawn schedule, boundary policy, listener hookup

use crate::config::EmitterConfig;
use crate::listener::{ListenerId, ListenerPhase, ListenerRegistry};
use crate::particle::{Particle, ParticleFate, ParticleId};
use crate::producer::Producer;
use crate::rand::ParticleRng;
use ember_core::{Color, Point2};
use ember_render::Surface;

/// Default tolerance past the surface edge, in pixels
pub const DEFAULT_THRESHOLD: f32 = 10.0;
/// Default constant speed in pixels per tick
pub const DEFAULT_SPEED: f32 = 5.0;
/// Default constant radius in pixels
pub const DEFAULT_SIZE: f32 = 4.0;

/// Surface extent plus a tolerance band.
///
/// A point is out of bounds only once it is more than `threshold` past an
/// edge; the band itself is inclusive. Pick `threshold` at least as large as
/// the biggest radius in use so particles never clip visibly at the edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub x: (f32, f32),
    pub y: (f32, f32),
    pub threshold: f32,
}

impl Boundary {
    pub fn new(x: (f32, f32), y: (f32, f32), threshold: f32) -> Self {
        Self { x, y, threshold }
    }

    /// Boundary covering a `width` x `height` surface
    pub fn for_surface(width: u32, height: u32, threshold: f32) -> Self {
        Self::new((0.0, width as f32), (0.0, height as f32), threshold)
    }

    /// True when (x, y) lies outside the tolerance band. Non-finite
    /// coordinates are always outside.
    pub fn exceeds(&self, x: f32, y: f32) -> bool {
        let t = self.threshold;
        let inside_x = x >= self.x.0 - t && x <= self.x.1 + t;
        let inside_y = y >= self.y.0 - t && y <= self.y.1 + t;
        !(inside_x && inside_y)
    }
}

/// Listener callback; may reconfigure the emitter or remove listeners mid-tick
pub type RenderListener = Box<dyn FnMut(&mut RenderContext<'_>)>;

/// What a listener sees while it runs: the spawn state plus the listener
/// registry's removal flags.
pub struct RenderContext<'a> {
    state: &'a mut EmitterState,
    current: ListenerId,
    registered: usize,
    removals: &'a mut Vec<ListenerId>,
}

impl RenderContext<'_> {
    pub fn state(&self) -> &EmitterState {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut EmitterState {
        &mut *self.state
    }

    /// Flag a listener as removed. Later listeners of this tick already see
    /// the flag. Returns false if `id` was never registered.
    pub fn remove_render_listener(&mut self, id: ListenerId) -> bool {
        if id.index() >= self.registered {
            return false;
        }
        self.removals.push(id);
        true
    }

    /// Remove the listener being run
    pub fn remove_self(&mut self) {
        self.removals.push(self.current);
    }
}

/// Spawn configuration and the live particle set
pub struct EmitterState {
    origin: Point2,
    boundary: Boundary,
    particles: Vec<Particle>,
    next_particle: u64,
    max_particles: Option<usize>,
    color: Producer<Color>,
    direction: Producer<f32>,
    speed: Producer<f32>,
    size: Producer<f32>,
}

impl EmitterState {
    fn new(boundary: Boundary, origin: Point2, mut rng: ParticleRng) -> Self {
        Self {
            origin,
            boundary,
            particles: Vec::new(),
            next_particle: 0,
            max_particles: None,
            color: Producer::constant(Color::WHITE),
            direction: Producer::from_fn(move || rng.direction_degrees()),
            speed: Producer::constant(DEFAULT_SPEED),
            size: Producer::constant(DEFAULT_SIZE),
        }
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// Move the spawn point; existing particles keep their own coordinates
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Point2::new(x, y);
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn threshold(&self) -> f32 {
        self.boundary.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.boundary.threshold = threshold;
    }

    /// Cap on live particles; `None` spawns without limit
    pub fn max_particles(&self) -> Option<usize> {
        self.max_particles
    }

    pub fn set_max_particles(&mut self, max: Option<usize>) {
        self.max_particles = max;
    }

    pub fn set_speed(&mut self, speed: impl Into<Producer<f32>>) {
        self.speed = speed.into();
    }

    pub fn set_direction(&mut self, direction: impl Into<Producer<f32>>) {
        self.direction = direction.into();
    }

    pub fn set_color(&mut self, color: impl Into<Producer<Color>>) {
        self.color = color.into();
    }

    pub fn set_size(&mut self, size: impl Into<Producer<f32>>) {
        self.size = size.into();
    }

    pub fn exceed_boundary(&self, x: f32, y: f32) -> bool {
        self.boundary.exceeds(x, y)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id() == id)
    }

    /// Drop a particle from the live set. Absent ids are ignored.
    pub fn kill_particle(&mut self, id: ParticleId) -> bool {
        match self.particles.iter().position(|p| p.id() == id) {
            Some(idx) => {
                self.particles.swap_remove(idx);
                log::trace!("killed particle {}", id.0);
                true
            }
            None => false,
        }
    }

    /// Create one particle at the origin from the current producers
    pub fn spawn(&mut self) -> Option<ParticleId> {
        if let Some(max) = self.max_particles {
            if self.particles.len() >= max {
                log::trace!("spawn skipped, {max} particle(s) live");
                return None;
            }
        }

        let id = ParticleId(self.next_particle);
        self.next_particle += 1;

        let direction = self.direction.produce();
        let speed = self.speed.produce();
        let color = self.color.produce();
        let size = self.size.produce();
        self.particles
            .push(Particle::new(id, self.origin, direction, speed, size, color));
        log::trace!("spawned particle {} at {:?}", id.0, self.origin);
        Some(id)
    }

    /// Draw every live particle, dropping each one the moment it leaves bounds
    fn draw_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let boundary = self.boundary;
        let mut i = 0;
        while i < self.particles.len() {
            match self.particles[i].draw(&boundary, surface) {
                ParticleFate::Alive => i += 1,
                ParticleFate::Destructed => {
                    let id = self.particles[i].id();
                    self.particles.swap_remove(i);
                    log::trace!("particle {} left bounds", id.0);
                    // The swapped-in particle still needs drawing
                }
            }
        }
    }
}

/// Owns one surface, its particles, and the listeners around each frame.
///
/// Each `tick` clears the surface, spawns one particle, runs PRE listeners,
/// draws every particle, then runs POST listeners.
pub struct ParticleEmitter<S: Surface> {
    surface: S,
    width: u32,
    height: u32,
    state: EmitterState,
    listeners: ListenerRegistry<RenderListener>,
    frame: u64,
}

impl<S: Surface> ParticleEmitter<S> {
    pub fn new(surface: S) -> Self {
        Self::with_rng(surface, ParticleRng::from_entropy())
    }

    pub fn with_seed(surface: S, seed: u64) -> Self {
        Self::with_rng(surface, ParticleRng::new(seed))
    }

    /// Emitter centered on `surface` with the default producers.
    /// `rng` drives the default random direction.
    pub fn with_rng(surface: S, rng: ParticleRng) -> Self {
        let width = surface.width();
        let height = surface.height();
        let boundary = Boundary::for_surface(width, height, DEFAULT_THRESHOLD);
        let origin = Point2::new(width as f32 / 2.0, height as f32 / 2.0);
        Self {
            surface,
            width,
            height,
            state: EmitterState::new(boundary, origin, rng),
            listeners: ListenerRegistry::new(),
            frame: 0,
        }
    }

    /// Emitter configured from `config`; generators fork from `rng`
    pub fn from_config(surface: S, config: &EmitterConfig, mut rng: ParticleRng) -> Self {
        let mut emitter = Self::with_rng(surface, rng.fork());
        config.apply(&mut emitter.state, &mut rng);
        emitter
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.surface.clear_rect(self.width, self.height);
        self.state.spawn();

        self.run_listeners(ListenerPhase::Pre);
        self.state.draw_all(&mut self.surface);
        self.run_listeners(ListenerPhase::Post);
        self.frame += 1;
    }

    /// Run the active listeners of `phase` in registration order. Removal
    /// flags set by a listener take effect before the next one is checked.
    fn run_listeners(&mut self, phase: ListenerPhase) {
        let registered = self.listeners.len();
        let mut removals = Vec::new();
        for index in 0..registered {
            let id = ListenerId(index);
            let Some(listener) = self.listeners.active_mut(id, phase) else {
                continue;
            };
            let mut ctx = RenderContext {
                state: &mut self.state,
                current: id,
                registered,
                removals: &mut removals,
            };
            listener(&mut ctx);
            for removed in removals.drain(..) {
                self.remove_render_listener(removed);
            }
        }
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> &EmitterState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EmitterState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // ── Listeners ──

    pub fn add_pre_render_listener(
        &mut self,
        listener: impl FnMut(&mut RenderContext<'_>) + 'static,
    ) -> ListenerId {
        let id = self.listeners.add(ListenerPhase::Pre, Box::new(listener));
        log::trace!("added pre-render listener {}", id.index());
        id
    }

    pub fn add_post_render_listener(
        &mut self,
        listener: impl FnMut(&mut RenderContext<'_>) + 'static,
    ) -> ListenerId {
        let id = self.listeners.add(ListenerPhase::Post, Box::new(listener));
        log::trace!("added post-render listener {}", id.index());
        id
    }

    /// Stop a listener from running. Returns false if it was never registered.
    pub fn remove_render_listener(&mut self, id: ListenerId) -> bool {
        let found = self.listeners.remove(id);
        if found {
            log::trace!("removed render listener {}", id.index());
        }
        found
    }

    pub fn listeners(&self) -> &ListenerRegistry<RenderListener> {
        &self.listeners
    }

    // ── Shorthands for the spawn state ──

    pub fn origin(&self) -> Point2 {
        self.state.origin()
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.state.set_origin(x, y);
    }

    pub fn threshold(&self) -> f32 {
        self.state.threshold()
    }

    pub fn set_speed(&mut self, speed: impl Into<Producer<f32>>) {
        self.state.set_speed(speed);
    }

    pub fn set_direction(&mut self, direction: impl Into<Producer<f32>>) {
        self.state.set_direction(direction);
    }

    pub fn set_color(&mut self, color: impl Into<Producer<Color>>) {
        self.state.set_color(color);
    }

    pub fn set_size(&mut self, size: impl Into<Producer<f32>>) {
        self.state.set_size(size);
    }

    pub fn exceed_boundary(&self, x: f32, y: f32) -> bool {
        self.state.exceed_boundary(x, y)
    }

    pub fn kill_particle(&mut self, id: ParticleId) -> bool {
        self.state.kill_particle(id)
    }

    pub fn particle_count(&self) -> usize {
        self.state.particle_count()
    }
}
