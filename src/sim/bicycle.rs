//! Bicycle dynamics: pedal force against air drag and slope

use serde::{Deserialize, Serialize};

use super::runner::Simulation;
use crate::consts::{GRAVITY, ROAD_PIXELS_PER_METER};
use crate::mps_to_kmh;

/// Track width in the scene and the margin kept free at its end
pub const TRACK_WIDTH: f32 = 800.0;
pub const TRACK_END_MARGIN: f32 = 100.0;
/// Crank rotation per tick per m/s (radians)
pub const CRANK_RATE: f32 = 0.2;

/// Operator inputs for the bicycle demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BicycleParams {
    /// Rider plus bicycle mass (kg)
    pub mass_kg: f32,
    /// Pedal force at the road (N)
    pub pedal_force: f32,
    /// Air drag coefficient k in F = k·v² (kg/m)
    pub drag_coefficient: f32,
    /// Road grade (%), positive is uphill
    pub slope_percent: f32,
}

impl BicycleParams {
    /// Drag force at speed `v` (N)
    pub fn drag_force(&self, v: f32) -> f32 {
        self.drag_coefficient * v * v
    }

    /// Weight component along the road (N), positive opposes motion
    pub fn slope_force(&self) -> f32 {
        let angle = (self.slope_percent / 100.0).atan();
        self.mass_kg * GRAVITY * angle.sin()
    }

    /// Speed where pedal force balances drag and slope (m/s)
    pub fn terminal_speed(&self) -> Option<f32> {
        let surplus = self.pedal_force - self.slope_force();
        if surplus <= 0.0 || self.drag_coefficient <= 0.0 {
            return None;
        }
        Some((surplus / self.drag_coefficient).sqrt())
    }
}

/// Bicycle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bicycle {
    pub params: BicycleParams,
    /// m/s
    pub speed: f32,
    /// m
    pub distance: f32,
    /// Crank angle for the pedal animation (radians)
    pub crank_angle: f32,
    /// N, as computed on the last tick
    pub net_force: f32,
    /// m/s², as computed on the last tick
    pub acceleration: f32,
    pub is_running: bool,
}

impl Bicycle {
    pub fn new(params: BicycleParams) -> Self {
        Self {
            params,
            speed: 0.0,
            distance: 0.0,
            crank_angle: 0.0,
            net_force: 0.0,
            acceleration: 0.0,
            is_running: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.params);
    }

    pub fn set_params(&mut self, params: BicycleParams) {
        self.params = params;
    }

    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        log::info!(
            "Pedalling with {:.0} N on a {:.1}% grade",
            self.params.pedal_force,
            self.params.slope_percent
        );
    }

    /// Distance after which the rider reaches the end of the track (m)
    pub fn track_length() -> f32 {
        (TRACK_WIDTH - TRACK_END_MARGIN) / ROAD_PIXELS_PER_METER
    }
}

/// Display view of the bicycle demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BicycleSnapshot {
    pub net_force: f32,
    pub acceleration: f32,
    pub speed_mps: f32,
    pub speed_kmh: f32,
    pub distance: f32,
    pub crank_angle: f32,
    pub is_running: bool,
}

impl Simulation for Bicycle {
    type Snapshot = BicycleSnapshot;

    fn step(&mut self, dt: f32) {
        if !self.is_running {
            return;
        }

        let p = &self.params;
        self.net_force = p.pedal_force - p.drag_force(self.speed) - p.slope_force();
        self.acceleration = self.net_force / p.mass_kg;

        // No rolling back downhill
        self.speed = (self.speed + self.acceleration * dt).max(0.0);
        self.distance += self.speed * dt;
        self.crank_angle += self.speed * CRANK_RATE;

        if self.distance > Self::track_length() {
            self.is_running = false;
            log::info!("Rider reached the end of the track at {:.1} km/h", mps_to_kmh(self.speed));
        }
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn snapshot(&self) -> BicycleSnapshot {
        BicycleSnapshot {
            net_force: self.net_force,
            acceleration: self.acceleration,
            speed_mps: self.speed,
            speed_kmh: mps_to_kmh(self.speed),
            distance: self.distance,
            crank_angle: self.crank_angle,
            is_running: self.is_running,
        }
    }
}
