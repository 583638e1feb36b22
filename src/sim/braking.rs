//! Braking car: constant deceleration from a set brake force
//!
//! Analytic figures come from `a = F / m`, `d = v² / 2a` and `t = v / a`;
//! the animation integrates the same deceleration one tick at a time.

use serde::{Deserialize, Serialize};

use super::runner::Simulation;
use crate::consts::ROAD_PIXELS_PER_METER;
use crate::kmh_to_mps;

/// Car start position on the road (scene units)
pub const CAR_START_X: f32 = 50.0;

/// Operator inputs for the braking demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrakingParams {
    /// Car mass (kg)
    pub mass_kg: f32,
    /// Speed when braking starts (km/h)
    pub speed_kmh: f32,
    /// Brake force (kN)
    pub brake_force_kn: f32,
}

impl BrakingParams {
    /// Deceleration magnitude (m/s²)
    pub fn deceleration(&self) -> f32 {
        self.brake_force_kn * 1000.0 / self.mass_kg
    }
}

/// Closed-form stopping figures for a set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrakingPlan {
    /// m/s²
    pub deceleration: f32,
    /// m
    pub stopping_distance: f32,
    /// s
    pub stopping_time: f32,
}

impl BrakingPlan {
    pub fn compute(params: &BrakingParams) -> Self {
        let v = kmh_to_mps(params.speed_kmh);
        let a = params.deceleration();
        Self {
            deceleration: a,
            stopping_distance: v * v / (2.0 * a),
            stopping_time: v / a,
        }
    }
}

/// Braking car state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrakingCar {
    pub params: BrakingParams,
    /// m/s
    pub speed: f32,
    /// m/s², as applied on the last tick
    pub deceleration: f32,
    /// Distance covered since braking started (m)
    pub distance: f32,
    pub is_running: bool,
}

impl BrakingCar {
    pub fn new(params: BrakingParams) -> Self {
        Self {
            params,
            speed: 0.0,
            deceleration: 0.0,
            distance: 0.0,
            is_running: false,
        }
    }

    /// Stop and park the car back at the start line
    pub fn reset(&mut self) {
        self.is_running = false;
        self.speed = 0.0;
        self.deceleration = 0.0;
        self.distance = 0.0;
    }

    /// Live parameter change; brake force and mass apply on the next tick
    pub fn set_params(&mut self, params: BrakingParams) {
        self.params = params;
    }

    /// Start braking from the configured speed; no-op mid-run
    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.reset();
        self.speed = kmh_to_mps(self.params.speed_kmh);
        self.is_running = true;
        log::info!(
            "Braking from {:.0} km/h with {:.1} kN",
            self.params.speed_kmh,
            self.params.brake_force_kn
        );
    }

    pub fn plan(&self) -> BrakingPlan {
        BrakingPlan::compute(&self.params)
    }

    /// Car position on the road (scene units)
    pub fn scene_x(&self) -> f32 {
        CAR_START_X + self.distance * ROAD_PIXELS_PER_METER
    }
}

/// Display view of the braking demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrakingSnapshot {
    pub speed_mps: f32,
    pub speed_kmh: f32,
    pub distance: f32,
    pub scene_x: f32,
    pub plan: BrakingPlan,
    pub is_running: bool,
}

impl Simulation for BrakingCar {
    type Snapshot = BrakingSnapshot;

    fn step(&mut self, dt: f32) {
        if !self.is_running {
            return;
        }

        self.deceleration = self.params.deceleration();
        self.speed -= self.deceleration * dt;

        if self.speed <= 0.0 {
            self.speed = 0.0;
            self.is_running = false;
            log::info!("Car stopped after {:.2} m", self.distance);
        }

        self.distance += self.speed * dt;
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn snapshot(&self) -> BrakingSnapshot {
        BrakingSnapshot {
            speed_mps: self.speed,
            speed_kmh: crate::mps_to_kmh(self.speed),
            distance: self.distance,
            scene_x: self.scene_x(),
            plan: self.plan(),
            is_running: self.is_running,
        }
    }
}
