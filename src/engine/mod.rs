//! Fixed-timestep driver
//!
//! The engine owns the accumulator state machine: elapsed wall-clock time is
//! folded into an accumulator, whole ticks are peeled off it to run the
//! systems, and whatever remains is slept away so the loop never busy-spins.
//! Physics always steps by the fixed tick duration, never by a wall-clock
//! delta, so trajectories depend only on the tick count.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    clock::FrameClock,
    render::{draw_world, FrameBuffer, RenderGate, Screen},
    world::World,
};

/// Ticks consumed in a single frame before the backlog warning fires.
const BACKLOG_WARN_TICKS: u32 = 30;

pub struct EngineSettings {
    /// Logical tick duration in milliseconds.
    pub tick_ms: f64,
    /// Remaining run time; `None` runs until an input stop.
    pub max_run_ms: Option<f64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_ms: 16.6,
            max_run_ms: Some(5000.0),
        }
    }
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            countdown_ms: self.settings.max_run_ms,
            accumulator_ms: 0.0,
            state: EngineState::Running,
            gate: RenderGate::new(),
            ticks: 0,
            systems: self.systems,
            settings: self.settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Stopped,
}

/// Per-tick context handed to every system.
pub struct TickContext {
    pub tick: u64,
    pub dt_ms: f64,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &TickContext, world: &mut World) -> Result<()>;
}

/// What one outer frame did.
#[derive(Debug, Clone, Copy)]
pub struct FrameSummary {
    /// Inner-loop entries this frame, the final stopping entry included.
    pub ticks: u32,
    /// Whether a redraw is pending after this frame.
    pub dirty: bool,
    pub state: EngineState,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
}

pub struct Engine {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
    gate: RenderGate,
    state: EngineState,
    accumulator_ms: f64,
    countdown_ms: Option<f64>,
    ticks: u64,
}

impl Engine {
    /// Folds `elapsed_ms` into the accumulator and consumes whole ticks from
    /// it: per tick the countdown is decremented (stopping at zero), then the
    /// systems run in order, then one tick duration leaves the accumulator.
    ///
    /// The accumulator never goes negative and only ever decreases by exactly
    /// one tick per step.
    pub fn advance(&mut self, world: &mut World, elapsed_ms: f64) -> Result<FrameSummary> {
        self.accumulator_ms += elapsed_ms;
        if self.accumulator_ms > self.settings.tick_ms {
            self.gate.mark_dirty();
        }

        let mut ticks = 0u32;
        while self.accumulator_ms > self.settings.tick_ms && self.state == EngineState::Running {
            ticks += 1;
            self.ticks += 1;

            if let Some(countdown) = self.countdown_ms.as_mut() {
                *countdown -= self.settings.tick_ms;
                if *countdown <= 0.0 {
                    self.state = EngineState::Stopped;
                    break;
                }
            }

            let ctx = TickContext {
                tick: self.ticks,
                dt_ms: self.settings.tick_ms,
            };
            for system in &mut self.systems {
                system
                    .run(&ctx, world)
                    .with_context(|| format!("system {} failed", system.name()))?;
            }
            self.accumulator_ms -= self.settings.tick_ms;

            if world.stop_requested() {
                self.state = EngineState::Stopped;
                break;
            }
        }

        if ticks > BACKLOG_WARN_TICKS {
            warn!(ticks, elapsed_ms, "large tick backlog consumed in one frame");
        }

        Ok(FrameSummary {
            ticks,
            dirty: self.gate.is_dirty(),
            state: self.state,
        })
    }

    /// Drives the loop against a live clock and screen until stopped: sample,
    /// advance, draw if dirty, then sleep the sub-tick remainder.
    pub fn run(&mut self, world: &mut World, screen: &mut dyn Screen) -> Result<RunSummary> {
        let (cols, rows) = screen.size().context("failed to query display size")?;
        let mut fb = FrameBuffer::new(cols, rows);
        info!(
            tick_ms = self.settings.tick_ms,
            max_run_ms = ?self.settings.max_run_ms,
            entities = world.entity_count(),
            cols,
            rows,
            "starting the loop"
        );

        let mut clock = FrameClock::start();
        let mut frames = 0u64;
        while self.state == EngineState::Running {
            let elapsed = clock.sample();
            self.advance(world, elapsed)?;

            if self.gate.is_dirty() {
                draw_world(world, &mut fb);
                screen.present(&fb).context("failed to present frame")?;
                self.gate.clear_dirty();
                frames += 1;
            }

            if self.state == EngineState::Running && self.accumulator_ms < self.settings.tick_ms {
                sleep_remainder(self.accumulator_ms);
            }
        }

        info!(ticks = self.ticks, frames, "loop done");
        Ok(RunSummary {
            ticks: self.ticks,
            frames,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    pub fn countdown_ms(&self) -> Option<f64> {
        self.countdown_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Sleeps for the unspent accumulator time, built as a whole-second plus
/// sub-second-nanosecond duration. `thread::sleep` restarts the underlying
/// syscall on interruption until the full duration has passed, so spurious
/// wake-ups do not shorten the wait.
fn sleep_remainder(ms: f64) {
    let secs = (ms / 1000.0) as u64;
    let nanos = ((ms as u64 % 1000) * 1_000_000) as u32;
    thread::sleep(Duration::new(secs, nanos));
}
