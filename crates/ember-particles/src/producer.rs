//! Producers: how per-particle direction, speed, size, and color are chosen
//!
//! The emitter calls its producer once per spawn. The result is either a
//! value fixed for the particle's whole life, or a `Sampler` the particle
//! calls again on every draw (a color that jitters, a speed that decays).

use ember_core::Color;
use std::fmt;

/// Yields a fresh value on every call
pub trait Sampler<T> {
    fn sample(&mut self) -> T;
}

impl<T, F: FnMut() -> T> Sampler<T> for F {
    fn sample(&mut self) -> T {
        self()
    }
}

/// Hands out one `Sampler` per spawned particle
pub trait Generator<T> {
    fn spawn(&mut self) -> Box<dyn Sampler<T>>;
}

impl<T, F: FnMut() -> Box<dyn Sampler<T>>> Generator<T> for F {
    fn spawn(&mut self) -> Box<dyn Sampler<T>> {
        self()
    }
}

/// A value bound to one particle at spawn time
pub enum Value<T> {
    /// Same value every frame
    Fixed(T),
    /// Re-resolved on every draw
    Varying(Box<dyn Sampler<T>>),
}

impl<T: Copy> Value<T> {
    pub fn resolve(&mut self) -> T {
        match self {
            Value::Fixed(v) => *v,
            Value::Varying(sampler) => sampler.sample(),
        }
    }

    pub fn is_varying(&self) -> bool {
        matches!(self, Value::Varying(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Value::Varying(_) => f.write_str("Varying(..)"),
        }
    }
}

/// A spawn-time source of per-particle values
pub enum Producer<T> {
    /// Every particle gets this value
    Constant(T),
    /// Called once per spawn; the result is fixed for that particle
    Stateless(Box<dyn FnMut() -> T>),
    /// Called once per spawn; the particle keeps the returned sampler
    Stateful(Box<dyn Generator<T>>),
}

impl<T: Copy + 'static> Producer<T> {
    pub fn constant(value: T) -> Self {
        Producer::Constant(value)
    }

    pub fn from_fn(f: impl FnMut() -> T + 'static) -> Self {
        Producer::Stateless(Box::new(f))
    }

    pub fn from_generator(g: impl Generator<T> + 'static) -> Self {
        Producer::Stateful(Box::new(g))
    }

    /// Evaluate for one new particle
    pub fn produce(&mut self) -> Value<T> {
        match self {
            Producer::Constant(v) => Value::Fixed(*v),
            Producer::Stateless(f) => Value::Fixed(f()),
            Producer::Stateful(g) => Value::Varying(g.spawn()),
        }
    }
}

impl From<f32> for Producer<f32> {
    fn from(value: f32) -> Self {
        Producer::Constant(value)
    }
}

impl From<Color> for Producer<Color> {
    fn from(value: Color) -> Self {
        Producer::Constant(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Producer::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Producer::Stateless(_) => f.write_str("Stateless(..)"),
            Producer::Stateful(_) => f.write_str("Stateful(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_produces_fixed() {
        let mut p = Producer::constant(5.0_f32);
        let mut v = p.produce();
        assert!(!v.is_varying());
        assert_eq!(v.resolve(), 5.0);
        assert_eq!(v.resolve(), 5.0);
    }

    #[test]
    fn stateless_called_once_per_spawn() {
        let mut calls = 0;
        let mut p = Producer::from_fn(move || {
            calls += 1;
            calls as f32
        });
        let mut first = p.produce();
        let mut second = p.produce();
        // Resolving never calls the producer again
        assert_eq!(first.resolve(), 1.0);
        assert_eq!(first.resolve(), 1.0);
        assert_eq!(second.resolve(), 2.0);
    }

    #[test]
    fn stateful_sampler_per_particle() {
        let mut p: Producer<u32> = Producer::from_generator(|| {
            let mut n = 0u32;
            Box::new(move || {
                n += 1;
                n
            }) as Box<dyn Sampler<u32>>
        });
        let mut a = p.produce();
        let mut b = p.produce();
        assert!(a.is_varying());
        assert_eq!(a.resolve(), 1);
        assert_eq!(a.resolve(), 2);
        // b has its own counter
        assert_eq!(b.resolve(), 1);
    }

    #[test]
    fn debug_does_not_need_sampler_debug() {
        let p: Producer<f32> = Producer::from_fn(|| 1.0);
        assert_eq!(format!("{p:?}"), "Stateless(..)");
        assert_eq!(format!("{:?}", Value::Fixed(2u8)), "Fixed(2)");
    }
}
