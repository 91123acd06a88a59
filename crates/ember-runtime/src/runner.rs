//! The self-rearming run loop

use crate::clock::Scheduler;
use crate::input::{InputState, PointerSource};
use crate::system::RuntimeSystem;
use ember_core::Result;

/// Summary of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub pointer_events: u64,
}

/// Drives a `RuntimeSystem` with an injected scheduler and pointer source.
///
/// Ticks run strictly one after another: poll input, update the system,
/// then rearm the scheduler. An error from the system ends the run.
pub struct Runner<C: Scheduler, P: PointerSource> {
    scheduler: C,
    pointer: P,
    input: InputState,
    tick: u64,
}

impl<C: Scheduler, P: PointerSource> Runner<C, P> {
    pub fn new(scheduler: C, pointer: P) -> Self {
        Self {
            scheduler,
            pointer,
            input: InputState::new(),
            tick: 0,
        }
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Run `system` for `max_ticks` ticks, or forever when `None`
    pub fn run(&mut self, system: &mut dyn RuntimeSystem, max_ticks: Option<u64>) -> Result<RunStats> {
        let mut stats = RunStats::default();
        log::info!("Starting '{}'", system.name());
        system.initialize()?;

        loop {
            if max_ticks.is_some_and(|max| stats.ticks >= max) {
                break;
            }

            for event in self.pointer.poll(self.tick) {
                self.input.process_event(event);
                stats.pointer_events += 1;
            }

            system.update(&self.input)?;
            self.input.end_frame();
            self.tick += 1;
            stats.ticks += 1;

            // No need to wait after the final tick
            if max_ticks.is_some_and(|max| stats.ticks >= max) {
                break;
            }
            self.scheduler.rearm();
        }

        system.shutdown()?;
        log::info!("Stopped '{}' after {} tick(s)", system.name(), stats.ticks);
        Ok(stats)
    }
}
