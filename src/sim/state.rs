//! Collision table state and core simulation types
//!
//! Two disks on a bounded table. The cue disk (A) is launched toward the
//! target disk (B); everything else follows from `tick::step`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::SceneBounds;
use crate::{mps_to_table_speed, radius_for_mass, table_speed_to_mps};

/// Start position of the cue disk (scene units)
pub const CUE_START: Vec2 = Vec2::new(100.0, 200.0);
/// Start position of the target disk (scene units)
pub const TARGET_START: Vec2 = Vec2::new(600.0, 200.0);

/// Display identity of a disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    /// Body A, the disk that gets launched
    Cue,
    /// Body B, the disk at rest
    Target,
}

/// A disk on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub tag: BodyTag,
    /// Center position (scene units)
    pub pos: Vec2,
    /// Velocity (scene units per tick)
    pub vel: Vec2,
    /// Radius, derived from mass at reset
    pub radius: f32,
    /// Mass (kg)
    pub mass: f32,
}

impl Body {
    pub fn new(tag: BodyTag, pos: Vec2, mass: f32) -> Self {
        Self {
            tag,
            pos,
            vel: Vec2::ZERO,
            radius: radius_for_mass(mass),
            mass,
        }
    }

    /// Advance position by one tick
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Snap to rest when both velocity components are below `threshold`
    pub fn settle(&mut self, threshold: f32) {
        if self.vel.x.abs() < threshold && self.vel.y.abs() < threshold {
            self.vel = Vec2::ZERO;
        }
    }

    /// True only when velocity is exactly zero (after settling)
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Speed in m/s
    pub fn speed_mps(&self) -> f32 {
        table_speed_to_mps(self.vel.length())
    }

    /// Linear momentum magnitude (kg·m/s)
    pub fn momentum(&self) -> f32 {
        self.mass * self.speed_mps()
    }
}

/// Operator inputs for the collision demo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionParams {
    /// Cue disk mass (kg)
    pub mass_a: f32,
    /// Cue disk launch speed (m/s)
    pub launch_speed: f32,
    /// Target disk mass (kg)
    pub mass_b: f32,
    /// Disk-disk restitution in [0, 1]
    pub restitution: f32,
}

/// How a run ended on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Both disks came to rest after touching at least once
    Completed,
    /// Both disks came to rest without ever touching
    StoppedWithoutCollision,
}

/// Status line for the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Freshly reset, waiting for launch
    Waiting,
    /// Stepping
    Moving,
    /// Paused mid-run
    Paused,
    /// Ended on its own
    Finished(RunOutcome),
}

impl RunStatus {
    /// Status line text
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Waiting => "Ready",
            RunStatus::Moving => "Moving",
            RunStatus::Paused => "Paused",
            RunStatus::Finished(RunOutcome::Completed) => "Simulation complete",
            RunStatus::Finished(RunOutcome::StoppedWithoutCollision) => {
                "Stopped (no collision)"
            }
        }
    }
}

/// Complete collision table state (deterministic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Cue disk
    pub a: Body,
    /// Target disk
    pub b: Body,
    pub bounds: SceneBounds,
    /// Disk-disk restitution coefficient, read at every contact
    pub restitution: f32,
    pub is_running: bool,
    /// Latched at first contact, cleared only by reset
    pub has_collided: bool,
    /// Tick of first contact this run
    pub collision_tick: Option<u64>,
    /// Impact force estimate at first contact (telemetry only)
    pub impact_force: Option<f32>,
    /// Kinetic energy imparted at launch (J)
    pub initial_kinetic_energy: f32,
    /// Ticks stepped since reset
    pub time_ticks: u64,
    /// Set when the run ends on its own
    pub outcome: Option<RunOutcome>,
}

impl SimulationState {
    /// Create a table with both disks at their start positions
    pub fn new(mass_a: f32, mass_b: f32, restitution: f32) -> Self {
        Self {
            a: Body::new(BodyTag::Cue, CUE_START, mass_a),
            b: Body::new(BodyTag::Target, TARGET_START, mass_b),
            bounds: SceneBounds::default(),
            restitution,
            is_running: false,
            has_collided: false,
            collision_tick: None,
            impact_force: None,
            initial_kinetic_energy: 0.0,
            time_ticks: 0,
            outcome: None,
        }
    }

    pub fn from_params(params: &CollisionParams) -> Self {
        Self::new(params.mass_a, params.mass_b, params.restitution)
    }

    /// Put both disks back at their start positions with new masses
    pub fn reset(&mut self, mass_a: f32, mass_b: f32) {
        let restitution = self.restitution;
        let bounds = self.bounds;
        *self = Self::new(mass_a, mass_b, restitution);
        self.bounds = bounds;
        log::info!(
            "Collision table reset (m_a = {:.2} kg, m_b = {:.2} kg)",
            mass_a,
            mass_b
        );
    }

    /// Update the restitution used for subsequent contacts
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution;
    }

    /// Nothing has moved or touched since the last reset or stop
    pub fn is_pristine(&self) -> bool {
        self.a.is_at_rest() && self.b.is_at_rest() && !self.has_collided
    }

    /// Start (or resume) the run.
    ///
    /// From a pristine table the cue disk receives `speed_mps` along +x;
    /// otherwise the run simply resumes. Already running is a no-op.
    pub fn launch(&mut self, speed_mps: f32) {
        if self.is_running {
            return;
        }

        if self.is_pristine() {
            self.a.vel = Vec2::new(mps_to_table_speed(speed_mps), 0.0);
            self.initial_kinetic_energy = 0.5 * self.a.mass * speed_mps * speed_mps;
            log::info!("Cue disk launched at {:.2} m/s", speed_mps);
        }

        self.outcome = None;
        self.is_running = true;
    }

    /// Stop stepping without touching positions or velocities
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    pub fn status(&self) -> RunStatus {
        if self.is_running {
            RunStatus::Moving
        } else if let Some(outcome) = self.outcome {
            RunStatus::Finished(outcome)
        } else if self.is_pristine() {
            RunStatus::Waiting
        } else {
            RunStatus::Paused
        }
    }

    /// Sum of both disks' momentum magnitudes (kg·m/s)
    pub fn total_momentum(&self) -> f32 {
        self.a.momentum() + self.b.momentum()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> CollisionSnapshot {
        CollisionSnapshot {
            a: BodySnapshot::from(&self.a),
            b: BodySnapshot::from(&self.b),
            total_momentum: self.total_momentum(),
            initial_kinetic_energy: self.initial_kinetic_energy,
            impact_force: self.impact_force,
            is_running: self.is_running,
            has_collided: self.has_collided,
            collision_tick: self.collision_tick,
            status: self.status(),
        }
    }
}

/// Per-disk part of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub tag: BodyTag,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub speed_mps: f32,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            tag: body.tag,
            pos: body.pos,
            vel: body.vel,
            radius: body.radius,
            mass: body.mass,
            speed_mps: body.speed_mps(),
        }
    }
}

/// Everything the display needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionSnapshot {
    pub a: BodySnapshot,
    pub b: BodySnapshot,
    /// kg·m/s
    pub total_momentum: f32,
    /// J
    pub initial_kinetic_energy: f32,
    /// N, present once the disks have touched
    pub impact_force: Option<f32>,
    pub is_running: bool,
    pub has_collided: bool,
    pub collision_tick: Option<u64>,
    pub status: RunStatus,
}
