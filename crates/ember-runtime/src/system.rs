//! Runtime system trait

use crate::input::InputState;
use ember_core::Result;

/// A system that can be ticked by the run loop
///
/// `update` runs exactly once per scheduled tick, never concurrently with
/// another tick of the same system.
pub trait RuntimeSystem {
    /// Called once before the first tick
    fn initialize(&mut self) -> Result<()>;

    /// Called once per tick with the input gathered since the previous tick
    fn update(&mut self, input: &InputState) -> Result<()>;

    /// Called once after the last tick
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
