//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - State is an explicit value owned by the caller
//! - No rendering, formatting or platform dependencies

pub mod bicycle;
pub mod bounds;
pub mod braking;
pub mod collision;
pub mod elevator;
pub mod rocket;
pub mod runner;
pub mod state;
pub mod tick;

pub use bicycle::{Bicycle, BicycleParams, BicycleSnapshot};
pub use bounds::{SceneBounds, WallHits};
pub use braking::{BrakingCar, BrakingParams, BrakingPlan, BrakingSnapshot};
pub use collision::{ContactResolution, bodies_touching, normal_velocities, resolve_contact};
pub use elevator::{Elevator, ElevatorForces, ElevatorParams, ElevatorSnapshot, Sensation};
pub use rocket::{Rocket, RocketParams, RocketSnapshot};
pub use runner::{FrameClock, RunSummary, Simulation, run_until_stopped};
pub use state::{
    Body, BodySnapshot, BodyTag, CUE_START, CollisionParams, CollisionSnapshot, RunOutcome,
    RunStatus, SimulationState, TARGET_START,
};
pub use tick::step;
