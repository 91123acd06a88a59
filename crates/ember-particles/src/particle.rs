//! A single moving point

use crate::emitter::Boundary;
use crate::producer::Value;
use ember_core::{Color, Point2};
use ember_render::Surface;

/// Identity of a live particle within its emitter
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ParticleId(pub u64);

/// What a draw step decided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleFate {
    Alive,
    /// The next position left the boundary tolerance; the owner must drop it
    Destructed,
}

/// One particle. Its values were bound at spawn; `Varying` ones are
/// re-resolved on every draw.
#[derive(Debug)]
pub struct Particle {
    id: ParticleId,
    coordinate: Point2,
    direction: Value<f32>,
    speed: Value<f32>,
    size: Value<f32>,
    color: Value<Color>,
}

impl Particle {
    pub fn new(
        id: ParticleId,
        origin: Point2,
        direction: Value<f32>,
        speed: Value<f32>,
        size: Value<f32>,
        color: Value<Color>,
    ) -> Self {
        Self {
            id,
            coordinate: origin,
            direction,
            speed,
            size,
            color,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Position after the most recent successful draw (or the spawn origin)
    pub fn coordinate(&self) -> Point2 {
        self.coordinate
    }

    /// Move one step and paint, unless the step leaves `boundary`.
    ///
    /// A destructed particle keeps its last in-bounds coordinate and draws nothing.
    pub fn draw<S: Surface + ?Sized>(&mut self, boundary: &Boundary, surface: &mut S) -> ParticleFate {
        let color = self.color.resolve();
        let direction = self.direction.resolve();
        let speed = self.speed.resolve();
        let size = self.size.resolve();

        let next = self.coordinate.offset_polar(direction, speed);
        if boundary.exceeds(next.x, next.y) {
            return ParticleFate::Destructed;
        }

        self.coordinate = next;
        surface.fill_circle(next, size, color);
        ParticleFate::Alive
    }
}
