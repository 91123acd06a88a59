//! Play command: runs the emitter headless and saves the final frame

use crate::config::PlayConfig;
use anyhow::{Context, Result};
use ember_core::Color;
use ember_particles::{ParticleEmitter, ParticleRng, ParticleSystem};
use ember_render::RasterSurface;
use ember_runtime::{FixedDelayScheduler, Runner};

pub struct PlayArgs {
    pub interval: Option<u64>,
    pub config: Option<String>,
    pub ticks: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub seed: Option<u64>,
    pub output: String,
}

/// Flags override values from the config file
fn resolve_config(args: &PlayArgs) -> Result<PlayConfig> {
    let mut config = match &args.config {
        Some(path) => PlayConfig::load(path)?,
        None => PlayConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.interval = interval;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

pub fn run(args: PlayArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let surface = RasterSurface::new(config.width, config.height)
        .context("Failed to create drawing surface")?
        .with_background(Color::BLACK);
    let rng = config
        .seed
        .map(ParticleRng::new)
        .unwrap_or_else(ParticleRng::from_entropy);

    let mut emitter = ParticleEmitter::from_config(surface, &config.emitter, rng);
    emitter.add_pre_render_listener(|ctx| {
        log::debug!("Particle count: {}", ctx.state().particle_count());
    });

    if config.max_ticks().is_none() {
        log::warn!("Running until interrupted; {} is only written when the run ends", args.output);
    }

    let scheduler = FixedDelayScheduler::with_interval_ms(config.interval);
    let mut runner = Runner::new(scheduler, config.pointer_script());
    let mut system = ParticleSystem::new(emitter);

    let stats = runner
        .run(&mut system, config.max_ticks())
        .context("Particle loop failed")?;

    system
        .emitter
        .surface()
        .save_png(&args.output)
        .context(format!("Failed to save image to {}", args.output))?;

    println!(
        "Ran {} tick(s), {} particle(s) live; rendered {}x{} frame to {}",
        stats.ticks,
        system.emitter.particle_count(),
        config.width,
        config.height,
        args.output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> PlayArgs {
        PlayArgs {
            interval: None,
            config: None,
            ticks: None,
            width: None,
            height: None,
            seed: None,
            output: "frame.png".into(),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let config = resolve_config(&PlayArgs {
            interval: Some(0),
            ticks: Some(12),
            width: Some(64),
            seed: Some(3),
            ..args()
        })
        .unwrap();
        assert_eq!(config.interval, 0);
        assert_eq!(config.ticks, 12);
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 600);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn play_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        run(PlayArgs {
            interval: Some(0),
            ticks: Some(20),
            width: Some(64),
            height: Some(48),
            seed: Some(1),
            output: output.to_string_lossy().into_owned(),
            ..args()
        })
        .unwrap();
        assert!(output.exists());
    }
}
