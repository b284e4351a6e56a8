//! Collaborators of the demo loops: rendering, input and timing.
//!
//! The simulation never calls these itself; the scene drivers in
//! `simulation::scenario` receive them as arguments so tests can swap in
//! recording or scripted versions.

pub mod viewport;
pub mod text;
#[cfg(feature = "viewer")]
pub mod viewer2d;

use std::collections::BTreeMap;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::simulation::states::NVec2;

/// Draws one frame worth of circles, in world coordinates
pub trait Renderer {
    fn begin_frame(&mut self, tick: u64) -> io::Result<()>;

    fn draw_circle(&mut self, center: NVec2, radius: f64) -> io::Result<()>;

    /// Dotted path, used by the bouncy ball demo
    fn draw_trajectory(&mut self, _points: &[NVec2]) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    SpawnBody, // one planet per key press
}

pub trait InputSource {
    /// Events that arrived since the last poll
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Replays a fixed number of spawns on given ticks
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    spawns: BTreeMap<u64, usize>,
    tick: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_at(mut self, tick: u64, count: usize) -> Self {
        *self.spawns.entry(tick).or_default() += count;
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        let count = self.spawns.remove(&self.tick).unwrap_or(0);
        self.tick += 1;
        vec![InputEvent::SpawnBody; count]
    }
}

/// Fixed tick interval plus the pacing between ticks
pub trait Clock {
    fn tick_interval(&self) -> f64;

    fn wait_for_next_tick(&mut self);
}

/// Real-time pacing: sleeps off whatever is left of the interval
#[derive(Debug)]
pub struct FixedClock {
    interval: f64,
    last: Instant,
}

impl FixedClock {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
}

impl Clock for FixedClock {
    fn tick_interval(&self) -> f64 {
        self.interval
    }

    fn wait_for_next_tick(&mut self) {
        let target = Duration::from_secs_f64(self.interval);
        let elapsed = self.last.elapsed();
        if elapsed < target {
            thread::sleep(target - elapsed);
        }
        self.last = Instant::now();
    }
}

/// No pacing, counts ticks. Used headless and in tests
#[derive(Debug, Clone)]
pub struct ManualClock {
    interval: f64,
    pub ticks: u64,
}

impl ManualClock {
    pub fn new(interval: f64) -> Self {
        Self { interval, ticks: 0 }
    }
}

impl Clock for ManualClock {
    fn tick_interval(&self) -> f64 {
        self.interval
    }

    fn wait_for_next_tick(&mut self) {
        self.ticks += 1;
    }
}

/// Keeps every frame in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub circles: Vec<(NVec2, f64)>,
    pub trajectory: Vec<NVec2>,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, tick: u64) -> io::Result<()> {
        self.frames.push(Frame {
            tick,
            ..Default::default()
        });
        Ok(())
    }

    fn draw_circle(&mut self, center: NVec2, radius: f64) -> io::Result<()> {
        if let Some(frame) = self.frames.last_mut() {
            frame.circles.push((center, radius));
        }
        Ok(())
    }

    fn draw_trajectory(&mut self, points: &[NVec2]) -> io::Result<()> {
        if let Some(frame) = self.frames.last_mut() {
            frame.trajectory = points.to_vec();
        }
        Ok(())
    }
}
