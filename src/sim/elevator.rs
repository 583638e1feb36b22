//! Elevator: apparent weight of a passenger under vertical acceleration
//!
//! The force figures are closed-form. The cabin animation is only there to
//! show the direction of motion, so it runs in scene units per tick.

use serde::{Deserialize, Serialize};

use super::runner::Simulation;
use crate::consts::GRAVITY;

/// Cabin start height (scene units from the top of the shaft)
pub const CABIN_START_Y: f32 = 50.0;
/// Highest cabin position
pub const CABIN_MIN_Y: f32 = 20.0;
/// Shaft height and cabin height; the cabin stops one cabin above the floor
pub const SHAFT_HEIGHT: f32 = 500.0;
pub const CABIN_HEIGHT: f32 = 100.0;
/// Velocity gained per tick per m/s² of acceleration
pub const CABIN_ACCEL_SCALE: f32 = 0.5;
/// Rides end on their own after this long (s)
pub const RIDE_DURATION: f32 = 5.0;
/// Accelerations within ± this feel like standing still (m/s²)
pub const SENSATION_THRESHOLD: f32 = 0.5;

/// Operator inputs for the elevator demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorParams {
    /// Passenger mass (kg)
    pub mass_kg: f32,
    /// Cabin acceleration (m/s², positive is upward)
    pub acceleration: f32,
}

/// What the passenger feels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sensation {
    /// Accelerating upward (or braking on the way down)
    Heavier,
    /// Accelerating downward (or braking on the way up)
    Lighter,
    /// Constant velocity
    Normal,
}

impl Sensation {
    pub fn from_acceleration(acceleration: f32) -> Self {
        if acceleration > SENSATION_THRESHOLD {
            Sensation::Heavier
        } else if acceleration < -SENSATION_THRESHOLD {
            Sensation::Lighter
        } else {
            Sensation::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sensation::Heavier => "Heavier",
            Sensation::Lighter => "Lighter",
            Sensation::Normal => "Normal",
        }
    }
}

/// Forces acting on the passenger (N)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevatorForces {
    pub real_weight: f32,
    pub apparent_weight: f32,
    pub cable_tension: f32,
    pub sensation: Sensation,
}

impl ElevatorForces {
    pub fn compute(params: &ElevatorParams) -> Self {
        let real_weight = params.mass_kg * GRAVITY;
        let apparent_weight = params.mass_kg * (GRAVITY + params.acceleration);
        Self {
            real_weight,
            apparent_weight,
            // The cable carries the passenger's apparent weight
            cable_tension: apparent_weight,
            sensation: Sensation::from_acceleration(params.acceleration),
        }
    }
}

/// Elevator cabin state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elevator {
    pub params: ElevatorParams,
    /// Cabin top (scene units, grows downward)
    pub cabin_y: f32,
    /// Scene units per tick
    pub cabin_vel: f32,
    /// Ride time (s)
    pub elapsed: f32,
    pub is_running: bool,
}

impl Elevator {
    pub fn new(params: ElevatorParams) -> Self {
        Self {
            params,
            cabin_y: CABIN_START_Y,
            cabin_vel: 0.0,
            elapsed: 0.0,
            is_running: false,
        }
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.cabin_y = CABIN_START_Y;
        self.cabin_vel = 0.0;
        self.elapsed = 0.0;
    }

    pub fn set_params(&mut self, params: ElevatorParams) {
        self.params = params;
    }

    /// Start a ride from wherever the cabin is; no-op mid-ride
    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.elapsed = 0.0;
        self.is_running = true;
        log::info!("Elevator ride at {:.1} m/s²", self.params.acceleration);
    }

    pub fn forces(&self) -> ElevatorForces {
        ElevatorForces::compute(&self.params)
    }

    fn max_cabin_y() -> f32 {
        SHAFT_HEIGHT - CABIN_HEIGHT
    }
}

/// Display view of the elevator demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevatorSnapshot {
    pub cabin_y: f32,
    pub cabin_vel: f32,
    pub elapsed: f32,
    pub forces: ElevatorForces,
    pub is_running: bool,
}

impl Simulation for Elevator {
    type Snapshot = ElevatorSnapshot;

    fn step(&mut self, dt: f32) {
        if !self.is_running {
            return;
        }

        self.cabin_vel += self.params.acceleration * CABIN_ACCEL_SCALE;
        self.cabin_y += self.cabin_vel;

        if self.cabin_y < CABIN_MIN_Y {
            self.cabin_y = CABIN_MIN_Y;
            self.cabin_vel = 0.0;
        }
        if self.cabin_y > Self::max_cabin_y() {
            self.cabin_y = Self::max_cabin_y();
            self.cabin_vel = 0.0;
        }

        self.elapsed += dt;
        if self.elapsed > RIDE_DURATION {
            self.is_running = false;
            log::info!("Elevator ride finished");
        }
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            cabin_y: self.cabin_y,
            cabin_vel: self.cabin_vel,
            elapsed: self.elapsed,
            forces: self.forces(),
            is_running: self.is_running,
        }
    }
}
