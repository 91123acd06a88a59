//! Play configuration: surface, loop timing, scripted clicks, emitter

use anyhow::{Context, Result};
use ember_particles::{EmitterConfig, SizeSpec, SpeedSpec};
use ember_runtime::{ScriptedPointer, DEFAULT_INTERVAL_MS};
use std::path::Path;

/// A click replayed before the given tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedClick {
    pub tick: u64,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayConfig {
    pub width: u32,
    pub height: u32,
    /// Minimum delay between ticks in milliseconds
    pub interval: u64,
    /// Ticks to run; 0 runs until interrupted
    pub ticks: u64,
    pub seed: Option<u64>,
    pub clicks: Vec<ScriptedClick>,
    pub emitter: EmitterConfig,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            interval: DEFAULT_INTERVAL_MS,
            ticks: 300,
            seed: None,
            clicks: Vec::new(),
            // Slow, small particles unless the config says otherwise
            emitter: EmitterConfig {
                speed: SpeedSpec::Fixed(1.0),
                size: SizeSpec::Fixed(2.0),
                ..EmitterConfig::default()
            },
        }
    }
}

impl PlayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text).context("Failed to parse TOML")?;
        let mut config = Self::default();

        if let Some(v) = integer(&table, "width")? {
            config.width = positive_u32(v, "width")?;
        }
        if let Some(v) = integer(&table, "height")? {
            config.height = positive_u32(v, "height")?;
        }
        if let Some(v) = integer(&table, "interval")? {
            config.interval = non_negative(v, "interval")?;
        }
        if let Some(v) = integer(&table, "ticks")? {
            config.ticks = non_negative(v, "ticks")?;
        }
        if let Some(v) = integer(&table, "seed")? {
            config.seed = Some(v as u64);
        }

        if let Some(clicks) = table.get("clicks").and_then(|v| v.as_array()) {
            for (i, click) in clicks.iter().enumerate() {
                let click = click
                    .as_table()
                    .with_context(|| format!("clicks[{i}] must be a table"))?;
                let tick = click.get("tick").and_then(|v| v.as_integer()).unwrap_or(0);
                let x = coord(click.get("x")).with_context(|| format!("clicks[{i}].x missing"))?;
                let y = coord(click.get("y")).with_context(|| format!("clicks[{i}].y missing"))?;
                config.clicks.push(ScriptedClick {
                    tick: tick.max(0) as u64,
                    x,
                    y,
                });
            }
        }

        if let Some(emitter) = table.get("emitter") {
            let emitter = emitter.as_table().context("[emitter] must be a table")?;
            // Keys absent from [emitter] keep the play defaults
            let parsed = EmitterConfig::from_toml(emitter)?;
            config.emitter = EmitterConfig {
                speed: if emitter.contains_key("speed") {
                    parsed.speed
                } else {
                    config.emitter.speed
                },
                size: if emitter.contains_key("size") {
                    parsed.size
                } else {
                    config.emitter.size
                },
                ..parsed
            };
        }

        Ok(config)
    }

    /// Ticks as the runner expects them
    pub fn max_ticks(&self) -> Option<u64> {
        (self.ticks > 0).then_some(self.ticks)
    }

    pub fn pointer_script(&self) -> ScriptedPointer {
        self.clicks
            .iter()
            .fold(ScriptedPointer::new(), |p, c| p.click_at(c.tick, c.x, c.y))
    }
}

/// Integer value of `key`, if present. Any other TOML type is an error.
fn integer(table: &toml::value::Table, key: &str) -> Result<Option<i64>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_integer()
            .map(Some)
            .with_context(|| format!("{key} must be an integer, got {}", v.type_str())),
    }
}

fn non_negative(v: i64, field: &str) -> Result<u64> {
    if v < 0 {
        anyhow::bail!("{field} must not be negative, got {v}");
    }
    Ok(v as u64)
}

fn positive_u32(v: i64, field: &str) -> Result<u32> {
    if v <= 0 || v > u32::MAX as i64 {
        anyhow::bail!("{field} must be a positive integer, got {v}");
    }
    Ok(v as u32)
}

fn coord(v: Option<&toml::Value>) -> Option<f32> {
    let v = v?;
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_particles::DirectionSpec;

    #[test]
    fn defaults_match_the_demo() {
        let config = PlayConfig::default();
        assert_eq!(config.interval, 30);
        assert_eq!(config.emitter.speed, SpeedSpec::Fixed(1.0));
        assert_eq!(config.emitter.size, SizeSpec::Fixed(2.0));
        assert_eq!(config.max_ticks(), Some(300));
    }

    #[test]
    fn parse_full_config() {
        let config = PlayConfig::parse(
            r#"
width = 320
height = 240
interval = 16
ticks = 0
seed = 42

[[clicks]]
tick = 10
x = 100
y = 50.5

[emitter]
direction = "radial"
direction_step = 10
size = 3
"#,
        )
        .unwrap();
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.interval, 16);
        assert_eq!(config.max_ticks(), None);
        assert_eq!(config.seed, Some(42));
        assert_eq!(
            config.clicks,
            vec![ScriptedClick {
                tick: 10,
                x: 100.0,
                y: 50.5
            }]
        );
        assert_eq!(config.emitter.direction, DirectionSpec::Radial { step: 10 });
        assert_eq!(config.emitter.size, SizeSpec::Fixed(3.0));
        // Unset speed keeps the play default
        assert_eq!(config.emitter.speed, SpeedSpec::Fixed(1.0));
        assert_eq!(config.pointer_script().remaining(), 1);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(PlayConfig::parse("width = 0").is_err());
        assert!(PlayConfig::parse("width = \"wide\"").is_err());
        assert!(PlayConfig::parse("height = 1.5").is_err());
        assert!(PlayConfig::parse("interval = -1").is_err());
        assert!(PlayConfig::parse("ticks = \"forever\"").is_err());
        assert!(PlayConfig::parse("seed = 4.2").is_err());
        assert!(PlayConfig::parse("[[clicks]]\ntick = 1\nx = 3").is_err());
        assert!(PlayConfig::parse("[emitter]\nspeed = \"warp\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("play.toml");
        std::fs::write(&path, "ticks = 5\n").unwrap();
        assert_eq!(PlayConfig::load(&path).unwrap().ticks, 5);
        assert!(PlayConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
