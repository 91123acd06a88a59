//! Spatial and color types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A point on the 2D drawing surface, in pixels from the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_array(arr: [f32; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }

    /// Move `distance` units along `direction` (degrees, 0 = +X, clockwise on screen)
    pub fn offset_polar(&self, direction: f32, distance: f32) -> Self {
        let rad = angle_to_radians(direction);
        *self + Self::new(distance * rad.cos(), distance * rad.sin())
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Degrees to radians
pub fn angle_to_radians(angle: f32) -> f32 {
    std::f32::consts::PI / 180.0 * angle
}

/// Opaque 8-bit RGB fill color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from signed channel values, clamping each into 0..=255
    pub fn from_channels(r: i32, g: i32, b: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Named colors accepted in config files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "red" => Some(Self::rgb(255, 0, 0)),
            "green" => Some(Self::rgb(0, 255, 0)),
            "blue" => Some(Self::rgb(0, 0, 255)),
            _ => None,
        }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
