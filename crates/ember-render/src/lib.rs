//! Ember Render - drawing surfaces for particle output
//!
//! The particle engine only needs two primitives from its host: clear a
//! rectangle and fill a circle. This crate defines that seam and ships two
//! implementations:
//! - `RasterSurface`: CPU rasterizer over an `image::RgbaImage`, saved as PNG
//! - `RecordingSurface`: captures draw calls, for tests and tooling

mod raster;
mod recording;
mod surface;

pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{RenderError, Surface};
