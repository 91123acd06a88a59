//! Pointer input state

use ember_core::Point2;
use std::collections::VecDeque;

/// A pointer interaction, positioned relative to the surface's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Click { x: f32, y: f32 },
    Move { x: f32, y: f32 },
}

/// Where pointer events come from between ticks
pub trait PointerSource {
    /// Events that arrived before tick number `tick` starts
    fn poll(&mut self, tick: u64) -> Vec<PointerEvent>;
}

/// A source that never reports anything
#[derive(Debug, Default)]
pub struct NoInput;

impl PointerSource for NoInput {
    fn poll(&mut self, _tick: u64) -> Vec<PointerEvent> {
        Vec::new()
    }
}

/// Replays clicks at fixed tick numbers
#[derive(Debug, Default)]
pub struct ScriptedPointer {
    /// (tick, event), sorted by tick
    script: VecDeque<(u64, PointerEvent)>,
}

impl ScriptedPointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a click to be delivered before `tick` runs
    pub fn click_at(mut self, tick: u64, x: f32, y: f32) -> Self {
        self.push(tick, PointerEvent::Click { x, y });
        self
    }

    pub fn push(&mut self, tick: u64, event: PointerEvent) {
        let idx = self.script.partition_point(|(t, _)| *t <= tick);
        self.script.insert(idx, (tick, event));
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PointerSource for ScriptedPointer {
    fn poll(&mut self, tick: u64) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        while let Some((t, _)) = self.script.front() {
            if *t > tick {
                break;
            }
            if let Some((_, event)) = self.script.pop_front() {
                events.push(event);
            }
        }
        events
    }
}

/// Tracks pointer input per frame
#[derive(Debug, Default)]
pub struct InputState {
    /// Last known pointer position
    pub pointer_position: Point2,
    /// Clicks delivered since the previous frame, oldest first
    clicks: Vec<Point2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Click { x, y } => self.process_click(x, y),
            PointerEvent::Move { x, y } => self.process_move(x, y),
        }
    }

    pub fn process_click(&mut self, x: f32, y: f32) {
        self.pointer_position = Point2::new(x, y);
        self.clicks.push(Point2::new(x, y));
    }

    pub fn process_move(&mut self, x: f32, y: f32) {
        self.pointer_position = Point2::new(x, y);
    }

    /// Clicks this frame, oldest first
    pub fn clicks(&self) -> &[Point2] {
        &self.clicks
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.clicks.clear();
    }
}
