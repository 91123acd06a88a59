//! Config check command

use crate::config::PlayConfig;
use anyhow::Result;

pub fn run(path: &str) -> Result<()> {
    let config = PlayConfig::load(path)?;
    let e = &config.emitter;

    println!("Config OK: {path}");
    println!("  Surface:   {}x{}", config.width, config.height);
    println!("  Interval:  {} ms", config.interval);
    match config.max_ticks() {
        Some(ticks) => println!("  Ticks:     {ticks}"),
        None => println!("  Ticks:     until interrupted"),
    }
    if let Some(seed) = config.seed {
        println!("  Seed:      {seed}");
    }
    println!("  Threshold: {}", e.threshold);
    match e.origin {
        Some(o) => println!("  Origin:    ({}, {})", o.x, o.y),
        None => println!("  Origin:    surface center"),
    }
    if let Some(max) = e.max_particles {
        println!("  Max live:  {max}");
    }
    println!("  Direction: {:?}", e.direction);
    println!("  Speed:     {:?}", e.speed);
    println!("  Size:      {:?}", e.size);
    println!("  Color:     {:?}", e.color);
    if !config.clicks.is_empty() {
        println!("  Clicks:    {}", config.clicks.len());
    }

    Ok(())
}
