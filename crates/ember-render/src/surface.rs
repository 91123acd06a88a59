//! The drawing-surface seam

use ember_core::{Color, Point2};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

impl From<RenderError> for ember_core::EmberError {
    fn from(err: RenderError) -> Self {
        ember_core::EmberError::SurfaceError(err.to_string())
    }
}

/// A 2D drawing target particles are painted onto.
///
/// Sizes are fixed once the surface is created; the emitter reads them a
/// single time to derive its boundary.
pub trait Surface {
    /// Pixel width
    fn width(&self) -> u32;

    /// Pixel height
    fn height(&self) -> u32;

    /// Clear the rectangle from the top-left corner spanning `width` x `height`
    fn clear_rect(&mut self, width: u32, height: u32);

    /// Fill a circle centered at `center`
    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color);

    /// Clear the whole surface
    fn clear(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.clear_rect(w, h);
    }
}
