//! Stock value generators
//!
//! Each generator comes as a struct (seedable, testable) that converts into
//! a `Producer`, plus a free function that seeds it from entropy.

use crate::producer::{Generator, Producer, Sampler};
use crate::rand::ParticleRng;
use ember_core::Color;

/// Lowest channel value of a light color
const LIGHT_MIN: i32 = 100;
/// One past the highest channel value of a light color
const LIGHT_MAX: i32 = 255;

/// Smallest size the random size generator hands out
const MIN_SIZE: u32 = 3;
/// Sizes are drawn from [0, SIZE_SPAN) before clamping
const SIZE_SPAN: u32 = 10;

// ── Color ──

/// Random light colors, optionally jittering around a per-particle base hue
pub struct RandomLightColor {
    variant: u32,
    rng: ParticleRng,
}

impl RandomLightColor {
    pub fn new(variant: u32, rng: ParticleRng) -> Self {
        Self { variant, rng }
    }
}

/// Fixed base hue; every sample adds [0, 2v) to each channel
pub struct ColorJitter {
    base: [i32; 3],
    variant: u32,
    rng: ParticleRng,
}

impl Sampler<Color> for ColorJitter {
    fn sample(&mut self) -> Color {
        let span = self.variant.saturating_mul(2);
        let r = self.base[0] + self.rng.below(span) as i32;
        let g = self.base[1] + self.rng.below(span) as i32;
        let b = self.base[2] + self.rng.below(span) as i32;
        Color::from_channels(r, g, b)
    }
}

impl Generator<Color> for RandomLightColor {
    fn spawn(&mut self) -> Box<dyn Sampler<Color>> {
        let v = self.variant as i32;
        let base = [
            self.rng.int_range(LIGHT_MIN, LIGHT_MAX) - v,
            self.rng.int_range(LIGHT_MIN, LIGHT_MAX) - v,
            self.rng.int_range(LIGHT_MIN, LIGHT_MAX) - v,
        ];
        Box::new(ColorJitter {
            base,
            variant: self.variant,
            rng: self.rng.fork(),
        })
    }
}

impl From<RandomLightColor> for Producer<Color> {
    fn from(mut g: RandomLightColor) -> Self {
        if g.variant == 0 {
            Producer::from_fn(move || {
                Color::from_channels(
                    g.rng.int_range(LIGHT_MIN, LIGHT_MAX),
                    g.rng.int_range(LIGHT_MIN, LIGHT_MAX),
                    g.rng.int_range(LIGHT_MIN, LIGHT_MAX),
                )
            })
        } else {
            Producer::from_generator(g)
        }
    }
}

/// Light colors with channels in [100, 255); with `variant > 0` each particle
/// keeps a base hue and jitters around it every frame
pub fn random_light_color_generator(variant: u32) -> Producer<Color> {
    RandomLightColor::new(variant, ParticleRng::from_entropy()).into()
}

// ── Direction ──

/// Random headings, optionally oscillating around a per-particle base
pub struct RandomDirection {
    variant: u32,
    rng: ParticleRng,
}

impl RandomDirection {
    /// `variant` is meant to stay below 180 degrees
    pub fn new(variant: u32, rng: ParticleRng) -> Self {
        Self { variant, rng }
    }
}

/// Alternates adding and subtracting a fresh offset from a fixed base
pub struct DirectionOscillator {
    base: i32,
    variant: u32,
    subtract_next: bool,
    rng: ParticleRng,
}

impl Sampler<f32> for DirectionOscillator {
    fn sample(&mut self) -> f32 {
        let offset = self.rng.below(self.variant) as i32;
        let heading = if self.subtract_next {
            self.base - offset
        } else {
            self.base + offset
        };
        self.subtract_next = !self.subtract_next;
        heading.rem_euclid(360) as f32
    }
}

impl Generator<f32> for RandomDirection {
    fn spawn(&mut self) -> Box<dyn Sampler<f32>> {
        Box::new(DirectionOscillator {
            base: self.rng.direction_degrees() as i32,
            variant: self.variant,
            subtract_next: false,
            rng: self.rng.fork(),
        })
    }
}

impl From<RandomDirection> for Producer<f32> {
    fn from(mut g: RandomDirection) -> Self {
        if g.variant == 0 {
            Producer::from_fn(move || g.rng.direction_degrees())
        } else {
            Producer::from_generator(g)
        }
    }
}

/// Whole-degree headings in [0, 360); with `variant > 0` each particle wobbles
/// around its own base heading
pub fn random_direction_generator(variant: u32) -> Producer<f32> {
    RandomDirection::new(variant, ParticleRng::from_entropy()).into()
}

/// Deterministic sweep: 0, step, 2*step, ... then back to 0
#[derive(Debug, Clone)]
pub struct RadialDirection {
    step: u32,
    angle: u32,
}

impl RadialDirection {
    /// A step of 0 is treated as 1; steps past a full turn as 360
    pub fn new(step: u32) -> Self {
        Self {
            step: step.clamp(1, 360),
            angle: 0,
        }
    }

    fn limit(&self) -> u32 {
        360u32.saturating_sub(self.step.saturating_add(1))
    }
}

impl Sampler<f32> for RadialDirection {
    fn sample(&mut self) -> f32 {
        let current = self.angle;
        self.angle = if current > self.limit() {
            0
        } else {
            current + self.step
        };
        current as f32
    }
}

impl From<RadialDirection> for Producer<f32> {
    fn from(mut g: RadialDirection) -> Self {
        Producer::from_fn(move || g.sample())
    }
}

pub fn radial_direction_generator(step: u32) -> Producer<f32> {
    RadialDirection::new(step).into()
}

// ── Size ──

/// Random radii, optionally jittering around a per-particle base
pub struct RandomSize {
    variant: u32,
    rng: ParticleRng,
}

impl RandomSize {
    pub fn new(variant: u32, rng: ParticleRng) -> Self {
        Self { variant, rng }
    }

    fn base_size(rng: &mut ParticleRng) -> u32 {
        rng.below(SIZE_SPAN).max(MIN_SIZE)
    }
}

/// Fixed base size plus [0, variant) each frame
pub struct SizeJitter {
    base: u32,
    variant: u32,
    rng: ParticleRng,
}

impl Sampler<f32> for SizeJitter {
    fn sample(&mut self) -> f32 {
        (self.base + self.rng.below(self.variant)) as f32
    }
}

impl Generator<f32> for RandomSize {
    fn spawn(&mut self) -> Box<dyn Sampler<f32>> {
        Box::new(SizeJitter {
            base: Self::base_size(&mut self.rng),
            variant: self.variant,
            rng: self.rng.fork(),
        })
    }
}

impl From<RandomSize> for Producer<f32> {
    fn from(mut g: RandomSize) -> Self {
        if g.variant == 0 {
            Producer::from_fn(move || RandomSize::base_size(&mut g.rng) as f32)
        } else {
            Producer::from_generator(g)
        }
    }
}

/// Whole sizes in [3, 10); with `variant > 0` each particle pulses above its base
pub fn random_size_generator(variant: u32) -> Producer<f32> {
    RandomSize::new(variant, ParticleRng::from_entropy()).into()
}

// ── Speed ──

/// Speed decaying from `initial_speed` toward 1.
///
/// Yields `exp(a / (x + period_scale))` with `a = ln(initial_speed) * period_scale`
/// and `x` the particle's draw count. Larger `period_scale` decays slower.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialAttenuation {
    initial_speed: f64,
    period_scale: f64,
}

impl ExponentialAttenuation {
    pub fn new(initial_speed: f32, period_scale: f32) -> Self {
        Self {
            initial_speed: initial_speed as f64,
            period_scale: period_scale as f64,
        }
    }
}

/// Per-particle decay state
pub struct AttenuationSampler {
    a: f64,
    period_scale: f64,
    x: u64,
}

impl Sampler<f32> for AttenuationSampler {
    fn sample(&mut self) -> f32 {
        let speed = (self.a / (self.x as f64 + self.period_scale)).exp();
        self.x += 1;
        speed as f32
    }
}

impl Generator<f32> for ExponentialAttenuation {
    fn spawn(&mut self) -> Box<dyn Sampler<f32>> {
        Box::new(AttenuationSampler {
            a: self.initial_speed.ln() * self.period_scale,
            period_scale: self.period_scale,
            x: 0,
        })
    }
}

impl From<ExponentialAttenuation> for Producer<f32> {
    fn from(g: ExponentialAttenuation) -> Self {
        Producer::from_generator(g)
    }
}

pub fn exponential_attenuation_speed_generator(
    initial_speed: f32,
    period_scale: f32,
) -> Producer<f32> {
    ExponentialAttenuation::new(initial_speed, period_scale).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::Value;

    fn resolve_n(value: &mut Value<f32>, n: usize) -> Vec<f32> {
        (0..n).map(|_| value.resolve()).collect()
    }

    #[test]
    fn light_color_without_variance_is_fixed_and_light() {
        let mut producer: Producer<Color> = RandomLightColor::new(0, ParticleRng::new(1)).into();
        for _ in 0..200 {
            let mut v = producer.produce();
            assert!(!v.is_varying());
            let c = v.resolve();
            for ch in [c.r, c.g, c.b] {
                assert!((100..255).contains(&ch));
            }
            assert_eq!(v.resolve(), c);
        }
    }

    #[test]
    fn light_color_jitters_around_base() {
        let variant = 20;
        let mut g = RandomLightColor::new(variant, ParticleRng::new(3));
        for _ in 0..20 {
            let mut sampler = g.spawn();
            let samples: Vec<Color> = (0..50).map(|_| sampler.sample()).collect();
            // All samples of one particle stay inside a 2v-wide window per channel
            let (min_r, max_r) = samples
                .iter()
                .fold((255u8, 0u8), |(lo, hi), c| (lo.min(c.r), hi.max(c.r)));
            assert!((max_r - min_r) < 2 * variant as u8);
            for c in &samples {
                assert!(c.r >= 80 && c.g >= 80 && c.b >= 80);
            }
        }
    }

    #[test]
    fn random_direction_without_variance() {
        let mut producer: Producer<f32> = RandomDirection::new(0, ParticleRng::new(5)).into();
        for _ in 0..200 {
            let mut v = producer.produce();
            let d = v.resolve();
            assert!((0.0..360.0).contains(&d));
            assert_eq!(v.resolve(), d);
        }
    }

    #[test]
    fn direction_oscillates_around_base() {
        let mut osc = DirectionOscillator {
            base: 5,
            variant: 30,
            subtract_next: false,
            rng: ParticleRng::new(11),
        };
        for i in 0..100 {
            let d = osc.sample();
            assert!((0.0..360.0).contains(&d));
            // Distance to the base on the circle never reaches the variant
            let diff = (d as i32 - 5).rem_euclid(360);
            let circular = diff.min(360 - diff);
            assert!(circular < 30, "sample {i} drifted to {d}");
        }
    }

    #[test]
    fn direction_first_sample_adds() {
        let mut osc = DirectionOscillator {
            base: 350,
            variant: 1,
            subtract_next: false,
            rng: ParticleRng::new(0),
        };
        // variant 1 means the offset is always 0
        assert_eq!(osc.sample(), 350.0);
        assert!(osc.subtract_next);
        assert_eq!(osc.sample(), 350.0);
        assert!(!osc.subtract_next);
    }

    #[test]
    fn radial_sweep_wraps_after_full_circle() {
        let mut producer = radial_direction_generator(10);
        let seq: Vec<f32> = (0..37).map(|_| producer.produce().resolve()).collect();
        let expected: Vec<f32> = (0..36).map(|i| (i * 10) as f32).chain([0.0]).collect();
        assert_eq!(seq, expected);
    }

    #[test]
    fn radial_sweep_is_restartable_by_reconstruction() {
        let mut a = RadialDirection::new(45);
        let first: Vec<f32> = (0..10).map(|_| a.sample()).collect();
        let mut b = RadialDirection::new(45);
        let again: Vec<f32> = (0..10).map(|_| b.sample()).collect();
        assert_eq!(first, again);
        assert_eq!(&first[..9], &[0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0, 0.0]);
    }

    #[test]
    fn radial_zero_step_means_one() {
        let mut g = RadialDirection::new(0);
        assert_eq!(g.sample(), 0.0);
        assert_eq!(g.sample(), 1.0);
    }

    #[test]
    fn radial_huge_step_stays_within_a_turn() {
        let mut g = RadialDirection::new(u32::MAX);
        for _ in 0..4 {
            let angle = g.sample();
            assert!((0.0..=360.0).contains(&angle));
        }
    }

    #[test]
    fn random_size_range() {
        let mut producer: Producer<f32> = RandomSize::new(0, ParticleRng::new(8)).into();
        for _ in 0..500 {
            let s = producer.produce().resolve();
            assert!((3.0..10.0).contains(&s));
        }
    }

    #[test]
    fn size_jitter_stays_above_base() {
        let mut g = RandomSize::new(4, ParticleRng::new(21));
        let mut v = Value::Varying(g.spawn());
        let samples = resolve_n(&mut v, 100);
        let min = samples.iter().cloned().fold(f32::MAX, f32::min);
        let max = samples.iter().cloned().fold(f32::MIN, f32::max);
        assert!(min >= 3.0);
        assert!(max - min < 4.0);
    }

    #[test]
    fn attenuation_starts_at_initial_speed_and_decays_toward_one() {
        let mut producer = exponential_attenuation_speed_generator(7.0, 100.0);
        let mut v = producer.produce();
        let samples = resolve_n(&mut v, 2000);
        assert!((samples[0] - 7.0).abs() < 1e-4);
        for pair in samples.windows(2) {
            assert!(pair[1] < pair[0]);
            assert!(pair[1] > 1.0);
        }
        assert!(samples[1999] < 1.2);
    }

    #[test]
    fn attenuation_counter_is_per_particle() {
        let mut producer = exponential_attenuation_speed_generator(4.0, 10.0);
        let mut a = producer.produce();
        resolve_n(&mut a, 5);
        let mut b = producer.produce();
        assert!((b.resolve() - 4.0).abs() < 1e-4);
    }
}
