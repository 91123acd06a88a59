//! Ember Runtime - Frame loop infrastructure
//!
//! Provides the building blocks around a single emitter's frame loop:
//! - `Scheduler` / `FixedDelayScheduler`: self-rearming minimum-delay ticks
//! - `InputState` / `PointerSource`: pointer clicks relative to the surface
//! - `RuntimeSystem`: trait for systems ticked by the loop
//! - `Runner`: wires scheduler, input, and a system together

mod clock;
mod input;
mod runner;
mod system;

pub use clock::{FixedDelayScheduler, ManualScheduler, Scheduler, DEFAULT_INTERVAL_MS};
pub use input::{InputState, NoInput, PointerEvent, PointerSource, ScriptedPointer};
pub use runner::{RunStats, Runner};
pub use system::RuntimeSystem;
