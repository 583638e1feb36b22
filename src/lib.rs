//! Physics Lab - interactive classroom physics demonstrations
//!
//! Core modules:
//! - `sim`: Deterministic simulations (collision, braking, elevator, rocket, bicycle)
//! - `lab`: One owner for all five demos, shared by both entry points
//! - `settings`: Operator parameters with slider ranges and JSON persistence
//! - `error`: Errors raised at the platform edge (never by the simulations)

pub mod error;
pub mod lab;
pub mod settings;
pub mod sim;

pub use error::{LabError, Result};
pub use lab::{Demo, Lab};
pub use settings::LabSettings;

/// Lab-wide constants
pub mod consts {
    /// Display refresh rate the simulations are tuned for
    pub const FRAME_RATE: f32 = 60.0;
    /// Fixed simulation timestep (one display frame)
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Standard gravity (m/s²)
    pub const GRAVITY: f32 = 9.8;

    /// Collision table dimensions (scene units)
    pub const TABLE_WIDTH: f32 = 700.0;
    pub const TABLE_HEIGHT: f32 = 400.0;
    /// Scene units per metre on the collision table
    pub const TABLE_PIXELS_PER_METER: f32 = 50.0;
    /// Per-tick velocity multiplier modelling table drag
    pub const TABLE_FRICTION: f32 = 0.98;
    /// Below this per-axis speed (scene units/tick) a body is snapped to rest
    pub const REST_SPEED: f32 = 0.1;
    /// Velocity retained after bouncing off a table cushion
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Disk radius at the reference mass, and growth per kilogram above it
    pub const BASE_RADIUS: f32 = 15.0;
    pub const REFERENCE_MASS: f32 = 0.1;
    pub const RADIUS_PER_KG: f32 = 30.0;

    /// Road/track scale for the braking and bicycle scenes
    pub const ROAD_PIXELS_PER_METER: f32 = 5.0;
}

/// Disk radius for a given mass (linear, recomputed only on reset)
#[inline]
pub fn radius_for_mass(mass: f32) -> f32 {
    use consts::*;
    BASE_RADIUS + (mass - REFERENCE_MASS) * RADIUS_PER_KG
}

/// Convert km/h to m/s
#[inline]
pub fn kmh_to_mps(kmh: f32) -> f32 {
    kmh / 3.6
}

/// Convert m/s to km/h
#[inline]
pub fn mps_to_kmh(mps: f32) -> f32 {
    mps * 3.6
}

/// Convert m/s to collision-table scene units per tick
#[inline]
pub fn mps_to_table_speed(mps: f32) -> f32 {
    mps * consts::TABLE_PIXELS_PER_METER / consts::FRAME_RATE
}

/// Convert collision-table scene units per tick to m/s
#[inline]
pub fn table_speed_to_mps(speed: f32) -> f32 {
    speed * consts::FRAME_RATE / consts::TABLE_PIXELS_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_for_mass() {
        assert!((radius_for_mass(0.1) - 15.0).abs() < 1e-5);
        assert!((radius_for_mass(0.17) - 17.1).abs() < 1e-4);
        assert!((radius_for_mass(0.5) - 27.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_conversions() {
        assert!((kmh_to_mps(36.0) - 10.0).abs() < 1e-5);
        assert!((mps_to_kmh(10.0) - 36.0).abs() < 1e-5);

        // 2 m/s on the table is 100 px/s, i.e. 5/3 px per tick at 60 Hz
        let scene = mps_to_table_speed(2.0);
        assert!((scene - 5.0 / 3.0).abs() < 1e-5);
        assert!((table_speed_to_mps(scene) - 2.0).abs() < 1e-5);
    }
}
