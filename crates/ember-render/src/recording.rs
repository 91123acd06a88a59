//! Surface that records draw calls instead of rasterizing them

use crate::surface::Surface;
use ember_core::{Color, Point2};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: u32, height: u32 },
    Circle {
        center: Point2,
        radius: f32,
        color: Color,
    },
}

/// Headless surface that keeps every command issued since creation
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Circles drawn since the most recent clear
    pub fn circles_in_frame(&self) -> Vec<(Point2, f32, Color)> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => Some((*center, *radius, *color)),
                DrawCommand::Clear { .. } => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
