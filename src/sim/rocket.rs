//! Rocket ascent with fuel burn
//!
//! Net force is thrust minus weight, with mass dropping every tick until the
//! dry mass (10% of lift-off mass) is reached.

use serde::{Deserialize, Serialize};

use super::runner::Simulation;
use crate::consts::GRAVITY;

/// Dry mass as a fraction of lift-off mass
pub const DRY_MASS_FRACTION: f32 = 0.1;
/// Launch pad height in the scene (scene units from the top)
pub const PAD_Y: f32 = 450.0;
/// Scene units per metre of altitude
pub const ALTITUDE_SCALE: f32 = 0.5;
/// The run ends once the rocket is this far above the top of the scene
pub const SCENE_CEILING_Y: f32 = -100.0;

/// Operator inputs for the rocket demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketParams {
    /// Lift-off mass (kg)
    pub mass_kg: f32,
    /// Engine thrust (kN)
    pub thrust_kn: f32,
    /// Propellant burn rate (kg/s)
    pub burn_rate: f32,
}

/// Rocket state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub params: RocketParams,
    /// Current mass (kg)
    pub mass: f32,
    /// Mass at lift-off (kg)
    pub initial_mass: f32,
    /// m/s, never negative (the pad holds the rocket)
    pub velocity: f32,
    /// m/s², as computed on the last tick
    pub acceleration: f32,
    /// m
    pub altitude: f32,
    pub is_running: bool,
}

impl Rocket {
    pub fn new(params: RocketParams) -> Self {
        Self {
            params,
            mass: params.mass_kg,
            initial_mass: params.mass_kg,
            velocity: 0.0,
            acceleration: 0.0,
            altitude: 0.0,
            is_running: false,
        }
    }

    /// Back on the pad, refuelled with the current lift-off mass
    pub fn reset(&mut self) {
        *self = Self::new(self.params);
    }

    /// Thrust and burn rate apply live; lift-off mass waits for reset
    pub fn set_params(&mut self, params: RocketParams) {
        self.params = params;
    }

    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        log::info!(
            "Rocket lift-off: {:.0} kg, {:.0} kN thrust",
            self.mass,
            self.params.thrust_kn
        );
    }

    pub fn dry_mass(&self) -> f32 {
        self.initial_mass * DRY_MASS_FRACTION
    }

    pub fn weight(&self) -> f32 {
        self.mass * GRAVITY
    }

    /// Thrust minus weight (N)
    pub fn net_force(&self) -> f32 {
        self.params.thrust_kn * 1000.0 - self.weight()
    }

    /// Rocket position in the scene (scene units, clamped at the ceiling)
    pub fn scene_y(&self) -> f32 {
        (PAD_Y - self.altitude * ALTITUDE_SCALE).max(SCENE_CEILING_Y)
    }
}

/// Display view of the rocket demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocketSnapshot {
    pub mass: f32,
    pub acceleration: f32,
    pub velocity: f32,
    pub altitude: f32,
    pub scene_y: f32,
    pub is_running: bool,
}

impl Simulation for Rocket {
    type Snapshot = RocketSnapshot;

    fn step(&mut self, dt: f32) {
        if !self.is_running {
            return;
        }

        self.mass = (self.mass - self.params.burn_rate * dt).max(self.dry_mass());

        self.acceleration = self.net_force() / self.mass;
        self.velocity = (self.velocity + self.acceleration * dt).max(0.0);
        self.altitude += self.velocity * dt;

        if PAD_Y - self.altitude * ALTITUDE_SCALE < SCENE_CEILING_Y {
            self.is_running = false;
            log::info!(
                "Rocket left the scene at {:.0} m, {:.1} m/s",
                self.altitude,
                self.velocity
            );
        }
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn snapshot(&self) -> RocketSnapshot {
        RocketSnapshot {
            mass: self.mass,
            acceleration: self.acceleration,
            velocity: self.velocity,
            altitude: self.altitude,
            scene_y: self.scene_y(),
            is_running: self.is_running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::runner::run_until_stopped;

    fn params() -> RocketParams {
        RocketParams {
            mass_kg: 5000.0,
            thrust_kn: 100.0,
            burn_rate: 50.0,
        }
    }

    #[test]
    fn test_first_tick_burns_fuel() {
        let mut rocket = Rocket::new(params());
        rocket.start();
        rocket.step(SIM_DT);

        let expected_mass = 5000.0 - 50.0 * SIM_DT;
        assert!((rocket.mass - expected_mass).abs() < 1e-2);
        let expected_accel = (100_000.0 - expected_mass * GRAVITY) / expected_mass;
        assert!((rocket.acceleration - expected_accel).abs() < 1e-3);
        assert!(rocket.altitude > 0.0);
    }

    #[test]
    fn test_underpowered_rocket_stays_on_pad() {
        let mut rocket = Rocket::new(RocketParams {
            thrust_kn: 10.0,
            ..params()
        });
        rocket.start();
        for _ in 0..60 {
            rocket.step(SIM_DT);
        }
        assert_eq!(rocket.velocity, 0.0);
        assert_eq!(rocket.altitude, 0.0);
        assert!(rocket.acceleration < 0.0);
        assert!(rocket.is_running);
    }

    #[test]
    fn test_mass_floors_at_dry_mass() {
        let mut rocket = Rocket::new(RocketParams {
            burn_rate: 2000.0,
            thrust_kn: 10.0,
            ..params()
        });
        rocket.start();
        for _ in 0..600 {
            rocket.step(SIM_DT);
        }
        assert!((rocket.mass - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_ascent_leaves_scene() {
        let mut rocket = Rocket::new(params());
        rocket.start();
        let summary = run_until_stopped(&mut rocket, SIM_DT, 60 * 120);
        assert!(summary.stopped);
        assert_eq!(rocket.scene_y(), SCENE_CEILING_Y);
        assert!(rocket.altitude > (PAD_Y - SCENE_CEILING_Y) / ALTITUDE_SCALE);
    }

    #[test]
    fn test_reset_refuels() {
        let mut rocket = Rocket::new(params());
        rocket.start();
        for _ in 0..30 {
            rocket.step(SIM_DT);
        }
        rocket.reset();
        assert_eq!(rocket.mass, 5000.0);
        assert_eq!(rocket.altitude, 0.0);
        assert!(!rocket.is_running);
    }
}
