//! Emitter configuration (parsed from TOML)

use crate::emitter::{EmitterState, DEFAULT_SIZE, DEFAULT_SPEED, DEFAULT_THRESHOLD};
use crate::generators::{
    ExponentialAttenuation, RadialDirection, RandomDirection, RandomLightColor, RandomSize,
};
use crate::producer::Producer;
use crate::rand::ParticleRng;
use ember_core::{Color, EmberError, Point2, Result};

/// Initial speed used by `speed = "exponential"` when none is given
const DEFAULT_ATTENUATION_INITIAL: f32 = 7.0;
/// Period scale used by `speed = "exponential"` when none is given
const DEFAULT_ATTENUATION_PERIOD: f32 = 100.0;

/// How spawned particles pick a heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectionSpec {
    Fixed(f32),
    Random { variant: u32 },
    Radial { step: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec {
    Fixed(Color),
    RandomLight { variant: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeSpec {
    Fixed(f32),
    Random { variant: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedSpec {
    Fixed(f32),
    Exponential { initial: f32, period: f32 },
}

impl DirectionSpec {
    pub fn producer(&self, rng: &mut ParticleRng) -> Producer<f32> {
        match *self {
            DirectionSpec::Fixed(d) => Producer::constant(d),
            DirectionSpec::Random { variant } => RandomDirection::new(variant, rng.fork()).into(),
            DirectionSpec::Radial { step } => RadialDirection::new(step).into(),
        }
    }
}

impl ColorSpec {
    pub fn producer(&self, rng: &mut ParticleRng) -> Producer<Color> {
        match *self {
            ColorSpec::Fixed(c) => Producer::constant(c),
            ColorSpec::RandomLight { variant } => RandomLightColor::new(variant, rng.fork()).into(),
        }
    }
}

impl SizeSpec {
    pub fn producer(&self, rng: &mut ParticleRng) -> Producer<f32> {
        match *self {
            SizeSpec::Fixed(s) => Producer::constant(s),
            SizeSpec::Random { variant } => RandomSize::new(variant, rng.fork()).into(),
        }
    }
}

impl SpeedSpec {
    pub fn producer(&self) -> Producer<f32> {
        match *self {
            SpeedSpec::Fixed(s) => Producer::constant(s),
            SpeedSpec::Exponential { initial, period } => {
                ExponentialAttenuation::new(initial, period).into()
            }
        }
    }
}

/// Configuration parsed from an `[emitter]` TOML table
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub threshold: f32,
    /// Spawn point; `None` keeps the surface center
    pub origin: Option<Point2>,
    pub max_particles: Option<usize>,
    pub direction: DirectionSpec,
    pub color: ColorSpec,
    pub size: SizeSpec,
    pub speed: SpeedSpec,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            origin: None,
            max_particles: None,
            direction: DirectionSpec::Random { variant: 0 },
            color: ColorSpec::Fixed(Color::WHITE),
            size: SizeSpec::Fixed(DEFAULT_SIZE),
            speed: SpeedSpec::Fixed(DEFAULT_SPEED),
        }
    }
}

impl EmitterConfig {
    /// Parse an EmitterConfig from a TOML table. Every key is optional.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("threshold") {
            config.threshold = toml_f32(v, config.threshold);
        }
        if let Some(v) = table.get("origin") {
            config.origin = toml_vec2(v).map(Point2::from_array);
        }
        if let Some(v) = table.get("max_particles") {
            let max = v.as_integer().ok_or_else(|| EmberError::InvalidFieldType {
                expected: "integer for 'max_particles'".into(),
                got: v.type_str().into(),
            })?;
            if max <= 0 {
                return Err(EmberError::ConfigError(format!(
                    "max_particles must be positive, got {max}"
                )));
            }
            config.max_particles = Some(max as usize);
        }

        if let Some(v) = table.get("direction") {
            config.direction = match v.as_str() {
                Some("random") => DirectionSpec::Random {
                    variant: toml_u32(table.get("direction_variant"), 0),
                },
                Some("radial") => DirectionSpec::Radial {
                    step: toml_u32(table.get("direction_step"), 1),
                },
                Some(other) => return Err(enum_error(other, &["random", "radial"])),
                None => DirectionSpec::Fixed(number(v, "direction")?),
            };
        }

        if let Some(v) = table.get("color") {
            config.color = match v.as_str() {
                Some("random_light") => ColorSpec::RandomLight {
                    variant: toml_u32(table.get("color_variant"), 0),
                },
                Some(name) => ColorSpec::Fixed(Color::from_name(name).ok_or_else(|| {
                    enum_error(name, &["random_light", "white", "black", "red", "green", "blue"])
                })?),
                None => ColorSpec::Fixed(toml_rgb(v)?),
            };
        }

        if let Some(v) = table.get("size") {
            config.size = match v.as_str() {
                Some("random") => SizeSpec::Random {
                    variant: toml_u32(table.get("size_variant"), 0),
                },
                Some(other) => return Err(enum_error(other, &["random"])),
                None => SizeSpec::Fixed(number(v, "size")?),
            };
        }

        if let Some(v) = table.get("speed") {
            config.speed = match v.as_str() {
                Some("exponential") => SpeedSpec::Exponential {
                    initial: table
                        .get("speed_initial")
                        .map(|v| toml_f32(v, DEFAULT_ATTENUATION_INITIAL))
                        .unwrap_or(DEFAULT_ATTENUATION_INITIAL),
                    period: table
                        .get("speed_period")
                        .map(|v| toml_f32(v, DEFAULT_ATTENUATION_PERIOD))
                        .unwrap_or(DEFAULT_ATTENUATION_PERIOD),
                },
                Some(other) => return Err(enum_error(other, &["exponential"])),
                None => SpeedSpec::Fixed(number(v, "speed")?),
            };
        }

        Ok(config)
    }

    /// Push this configuration into an emitter's spawn state
    pub fn apply(&self, state: &mut EmitterState, rng: &mut ParticleRng) {
        state.set_threshold(self.threshold);
        if let Some(origin) = self.origin {
            state.set_origin(origin.x, origin.y);
        }
        state.set_max_particles(self.max_particles);
        state.set_direction(self.direction.producer(rng));
        state.set_color(self.color.producer(rng));
        state.set_size(self.size.producer(rng));
        state.set_speed(self.speed.producer());
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_u32(v: Option<&toml::Value>, default: u32) -> u32 {
    v.and_then(|v| v.as_integer())
        .map(|i| i.unsigned_abs().min(u32::MAX as u64) as u32)
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value) -> Option<[f32; 2]> {
    let arr = v.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    Some([toml_f32(&arr[0], 0.0), toml_f32(&arr[1], 0.0)])
}

fn toml_rgb(v: &toml::Value) -> Result<Color> {
    let channels: Option<Vec<i64>> = v
        .as_array()
        .filter(|arr| arr.len() == 3)
        .map(|arr| arr.iter().filter_map(|c| c.as_integer()).collect());
    match channels {
        Some(c) if c.len() == 3 => Ok(Color::from_channels(c[0] as i32, c[1] as i32, c[2] as i32)),
        _ => Err(EmberError::InvalidFieldType {
            expected: "color name or [r, g, b] integers".into(),
            got: v.type_str().into(),
        }),
    }
}

fn number(v: &toml::Value, field: &str) -> Result<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .ok_or_else(|| EmberError::InvalidFieldType {
            expected: format!("number for '{field}'"),
            got: v.type_str().into(),
        })
}

fn enum_error(value: &str, allowed: &[&str]) -> EmberError {
    EmberError::InvalidEnumValue {
        value: value.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}
