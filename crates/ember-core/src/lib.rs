//! Ember Core - Foundational types for the Ember particle engine
//!
//! This crate provides the types that all other Ember crates depend on:
//! - `Point2` - 2D surface coordinates
//! - `Color` - 8-bit RGB fill colors
//! - Error types and Result alias

mod error;
mod types;

pub use error::{EmberError, Result};
pub use types::{angle_to_radians, Color, Point2};
