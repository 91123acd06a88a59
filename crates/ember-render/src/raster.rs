//! CPU raster surface backed by an RGBA image buffer

use crate::surface::{RenderError, Surface};
use ember_core::{Color, Point2};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Software surface that fills circles into an in-memory image.
///
/// Cleared pixels are transparent black, so saved frames composite cleanly.
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba<u8>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
            background: Rgba([0, 0, 0, 0]),
        })
    }

    /// Use an opaque background color for cleared pixels
    pub fn with_background(mut self, color: Color) -> Self {
        let background = Rgba(color.to_rgba());
        self.background = background;
        self.image.pixels_mut().for_each(|p| *p = background);
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color at a pixel, or None when out of range
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.image.width() && y < self.image.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Encode the current frame as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| RenderError::EncodeFailed(format!("{}: {e}", path.display())))?;
        log::info!(
            "Saved {}x{} frame to {}",
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear_rect(&mut self, width: u32, height: u32) {
        let w = width.min(self.image.width());
        let h = height.min(self.image.height());
        for y in 0..h {
            for x in 0..w {
                self.image.put_pixel(x, y, self.background);
            }
        }
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color) {
        if radius.is_nan() || radius <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let min_x = ((center.x - radius).floor() as i64).max(0);
        let max_x = ((center.x + radius).ceil() as i64).min(w - 1);
        let min_y = ((center.y - radius).floor() as i64).max(0);
        let max_y = ((center.y + radius).ceil() as i64).min(h - 1);
        let r2 = radius * radius;
        let fill = Rgba(color.to_rgba());

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel centers
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.image.put_pixel(x as u32, y as u32, fill);
                }
            }
        }
    }
}
