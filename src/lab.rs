//! The five demos side by side, driven by one owner
//!
//! Both entry points (browser loop and headless CLI) hold a single [`Lab`]
//! and route button presses, slider changes and frame ticks through it.

use std::fmt;
use std::str::FromStr;

use crate::error::{LabError, Result};
use crate::settings::LabSettings;
use crate::sim::{Bicycle, BrakingCar, Elevator, Rocket, Simulation, SimulationState};

/// Demo selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Collision,
    Braking,
    Elevator,
    Rocket,
    Bicycle,
}

impl Demo {
    pub const ALL: [Demo; 5] = [
        Demo::Collision,
        Demo::Braking,
        Demo::Elevator,
        Demo::Rocket,
        Demo::Bicycle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Demo::Collision => "collision",
            Demo::Braking => "braking",
            Demo::Elevator => "elevator",
            Demo::Rocket => "rocket",
            Demo::Bicycle => "bicycle",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LabError::UnknownDemo(s.to_string()))
    }
}

/// All demo states plus the settings they were built from
#[derive(Debug, Clone)]
pub struct Lab {
    settings: LabSettings,
    pub collision: SimulationState,
    pub braking: BrakingCar,
    pub elevator: Elevator,
    pub rocket: Rocket,
    pub bicycle: Bicycle,
}

impl Lab {
    pub fn new(settings: &LabSettings) -> Self {
        let settings = settings.clamped();
        Self {
            collision: SimulationState::from_params(&settings.collision),
            braking: BrakingCar::new(settings.braking),
            elevator: Elevator::new(settings.elevator),
            rocket: Rocket::new(settings.rocket),
            bicycle: Bicycle::new(settings.bicycle),
            settings,
        }
    }

    pub fn settings(&self) -> &LabSettings {
        &self.settings
    }

    /// Take new slider values.
    ///
    /// Values a running demo reads every tick apply at once. Disk masses and
    /// rocket lift-off mass wait for the next reset.
    pub fn apply_settings(&mut self, settings: &LabSettings) {
        self.settings = settings.clamped();
        self.collision.set_restitution(self.settings.collision.restitution);
        self.braking.set_params(self.settings.braking);
        self.elevator.set_params(self.settings.elevator);
        self.rocket.set_params(self.settings.rocket);
        self.bicycle.set_params(self.settings.bicycle);
    }

    /// Begin (or resume) a run
    pub fn start(&mut self, demo: Demo) {
        match demo {
            Demo::Collision => self.collision.launch(self.settings.collision.launch_speed),
            Demo::Braking => self.braking.start(),
            Demo::Elevator => self.elevator.start(),
            Demo::Rocket => self.rocket.start(),
            Demo::Bicycle => self.bicycle.start(),
        }
    }

    /// Play button: starts an idle demo. A running collision table pauses,
    /// any other running demo is stopped and reset.
    pub fn play(&mut self, demo: Demo) {
        if !self.is_running(demo) {
            self.start(demo);
        } else if demo == Demo::Collision {
            self.pause();
        } else {
            self.reset(demo);
        }
    }

    /// Reset button
    pub fn reset(&mut self, demo: Demo) {
        match demo {
            Demo::Collision => {
                let p = self.settings.collision;
                self.collision.set_restitution(p.restitution);
                self.collision.reset(p.mass_a, p.mass_b);
            }
            Demo::Braking => self.braking.reset(),
            Demo::Elevator => self.elevator.reset(),
            Demo::Rocket => self.rocket.reset(),
            Demo::Bicycle => self.bicycle.reset(),
        }
    }

    /// Pause is only offered on the collision table
    pub fn pause(&mut self) {
        self.collision.pause();
    }

    pub fn is_running(&self, demo: Demo) -> bool {
        match demo {
            Demo::Collision => self.collision.is_running(),
            Demo::Braking => self.braking.is_running(),
            Demo::Elevator => self.elevator.is_running(),
            Demo::Rocket => self.rocket.is_running(),
            Demo::Bicycle => self.bicycle.is_running(),
        }
    }

    pub fn any_running(&self) -> bool {
        Demo::ALL.into_iter().any(|demo| self.is_running(demo))
    }

    /// One fixed tick for every demo; idle demos ignore it
    pub fn step(&mut self, dt: f32) {
        self.collision.step(dt);
        self.braking.step(dt);
        self.elevator.step(dt);
        self.rocket.step(dt);
        self.bicycle.step(dt);
    }

    /// Snapshot of one demo as JSON
    pub fn snapshot_json(&self, demo: Demo) -> Result<String> {
        let json = match demo {
            Demo::Collision => serde_json::to_string(&self.collision.snapshot())?,
            Demo::Braking => serde_json::to_string(&self.braking.snapshot())?,
            Demo::Elevator => serde_json::to_string(&self.elevator.snapshot())?,
            Demo::Rocket => serde_json::to_string(&self.rocket.snapshot())?,
            Demo::Bicycle => serde_json::to_string(&self.bicycle.snapshot())?,
        };
        Ok(json)
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new(&LabSettings::default())
    }
}
