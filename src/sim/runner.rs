//! Owner-driven stepping for every demo
//!
//! The owner holds the simulation value and decides when to step it; there
//! is no self-scheduling callback chain. Headless callers use
//! [`run_until_stopped`], the browser loop feeds frame times into a
//! [`FrameClock`] and steps once per tick it hands back.

use serde::Serialize;

use super::state::{CollisionSnapshot, SimulationState};
use super::tick;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// A fixed-timestep demo the owner can drive
pub trait Simulation {
    type Snapshot: Serialize;

    /// Advance one tick; no-op while not running
    fn step(&mut self, dt: f32);

    fn is_running(&self) -> bool;

    /// Pure read view for the renderer
    fn snapshot(&self) -> Self::Snapshot;
}

impl Simulation for SimulationState {
    type Snapshot = CollisionSnapshot;

    fn step(&mut self, dt: f32) {
        tick::step(self, dt);
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn snapshot(&self) -> CollisionSnapshot {
        SimulationState::snapshot(self)
    }
}

/// How a headless run went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Ticks actually stepped
    pub ticks: u32,
    /// True if the demo stopped itself before the cap
    pub stopped: bool,
}

/// Step `sim` until it stops on its own or `max_ticks` have elapsed
pub fn run_until_stopped<S: Simulation>(sim: &mut S, dt: f32, max_ticks: u32) -> RunSummary {
    let mut ticks = 0;
    while sim.is_running() && ticks < max_ticks {
        sim.step(dt);
        ticks += 1;
    }
    RunSummary {
        ticks,
        stopped: !sim.is_running(),
    }
}

/// Fixed timestep accumulator fed by display frame times
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks to run for a frame timestamp (milliseconds)
    pub fn ticks_for_frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time_ms = Some(time_ms);
        self.advance(dt)
    }

    /// Accumulate `dt` seconds and return how many fixed ticks are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        // Long stalls (hidden tab) are not replayed
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Forget the previous frame time (after a pause or reset)
    pub fn resync(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}
