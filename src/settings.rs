//! Lab settings: the slider values for every demo
//!
//! Persisted as JSON (LocalStorage in the browser, a file on native). Every
//! value is clamped to its slider range before it reaches a simulation, so
//! the simulations can trust their inputs.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};
use crate::sim::{BicycleParams, BrakingParams, CollisionParams, ElevatorParams, RocketParams};

/// Slider bounds for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Slider ranges, grouped per demo
pub mod ranges {
    use super::ParamRange;

    pub const DISK_MASS: ParamRange = ParamRange::new(0.1, 0.5, 0.01);
    pub const LAUNCH_SPEED: ParamRange = ParamRange::new(0.5, 20.0, 0.5);
    pub const RESTITUTION: ParamRange = ParamRange::new(0.0, 1.0, 0.1);

    pub const CAR_MASS: ParamRange = ParamRange::new(800.0, 3000.0, 100.0);
    pub const CAR_SPEED_KMH: ParamRange = ParamRange::new(20.0, 150.0, 5.0);
    pub const BRAKE_FORCE_KN: ParamRange = ParamRange::new(2.0, 20.0, 0.5);

    pub const PASSENGER_MASS: ParamRange = ParamRange::new(40.0, 120.0, 1.0);
    pub const ELEVATOR_ACCEL: ParamRange = ParamRange::new(-5.0, 5.0, 0.5);

    pub const ROCKET_MASS: ParamRange = ParamRange::new(1000.0, 10000.0, 500.0);
    pub const THRUST_KN: ParamRange = ParamRange::new(50.0, 300.0, 10.0);
    pub const BURN_RATE: ParamRange = ParamRange::new(10.0, 200.0, 10.0);

    pub const BICYCLE_MASS: ParamRange = ParamRange::new(50.0, 120.0, 1.0);
    pub const PEDAL_FORCE: ParamRange = ParamRange::new(20.0, 300.0, 10.0);
    pub const DRAG_COEFFICIENT: ParamRange = ParamRange::new(0.1, 1.0, 0.05);
    pub const SLOPE_PERCENT: ParamRange = ParamRange::new(-10.0, 15.0, 1.0);
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            mass_a: 0.17,
            launch_speed: 15.0,
            mass_b: 0.17,
            restitution: 1.0,
        }
    }
}

impl Default for BrakingParams {
    fn default() -> Self {
        Self {
            mass_kg: 1200.0,
            speed_kmh: 90.0,
            brake_force_kn: 10.0,
        }
    }
}

impl Default for ElevatorParams {
    fn default() -> Self {
        Self {
            mass_kg: 70.0,
            acceleration: 2.0,
        }
    }
}

impl Default for RocketParams {
    fn default() -> Self {
        Self {
            mass_kg: 5000.0,
            thrust_kn: 100.0,
            burn_rate: 50.0,
        }
    }
}

impl Default for BicycleParams {
    fn default() -> Self {
        Self {
            mass_kg: 80.0,
            pedal_force: 100.0,
            drag_coefficient: 0.5,
            slope_percent: 0.0,
        }
    }
}

/// All demo parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabSettings {
    pub collision: CollisionParams,
    pub braking: BrakingParams,
    pub elevator: ElevatorParams,
    pub rocket: RocketParams,
    pub bicycle: BicycleParams,
}

impl LabSettings {
    /// Copy of these settings with every value pulled into its slider range
    pub fn clamped(&self) -> Self {
        use ranges::*;

        let c = &self.collision;
        let b = &self.braking;
        let e = &self.elevator;
        let r = &self.rocket;
        let y = &self.bicycle;

        Self {
            collision: CollisionParams {
                mass_a: DISK_MASS.clamp(c.mass_a),
                launch_speed: LAUNCH_SPEED.clamp(c.launch_speed),
                mass_b: DISK_MASS.clamp(c.mass_b),
                restitution: RESTITUTION.clamp(c.restitution),
            },
            braking: BrakingParams {
                mass_kg: CAR_MASS.clamp(b.mass_kg),
                speed_kmh: CAR_SPEED_KMH.clamp(b.speed_kmh),
                brake_force_kn: BRAKE_FORCE_KN.clamp(b.brake_force_kn),
            },
            elevator: ElevatorParams {
                mass_kg: PASSENGER_MASS.clamp(e.mass_kg),
                acceleration: ELEVATOR_ACCEL.clamp(e.acceleration),
            },
            rocket: RocketParams {
                mass_kg: ROCKET_MASS.clamp(r.mass_kg),
                thrust_kn: THRUST_KN.clamp(r.thrust_kn),
                burn_rate: BURN_RATE.clamp(r.burn_rate),
            },
            bicycle: BicycleParams {
                mass_kg: BICYCLE_MASS.clamp(y.mass_kg),
                pedal_force: PEDAL_FORCE.clamp(y.pedal_force),
                drag_coefficient: DRAG_COEFFICIENT.clamp(y.drag_coefficient),
                slope_percent: SLOPE_PERCENT.clamp(y.slope_percent),
            },
        }
    }

    fn values(&self) -> [(&'static str, f32); 16] {
        let c = &self.collision;
        let b = &self.braking;
        let e = &self.elevator;
        let r = &self.rocket;
        let y = &self.bicycle;
        [
            ("collision.mass_a", c.mass_a),
            ("collision.launch_speed", c.launch_speed),
            ("collision.mass_b", c.mass_b),
            ("collision.restitution", c.restitution),
            ("braking.mass_kg", b.mass_kg),
            ("braking.speed_kmh", b.speed_kmh),
            ("braking.brake_force_kn", b.brake_force_kn),
            ("elevator.mass_kg", e.mass_kg),
            ("elevator.acceleration", e.acceleration),
            ("rocket.mass_kg", r.mass_kg),
            ("rocket.thrust_kn", r.thrust_kn),
            ("rocket.burn_rate", r.burn_rate),
            ("bicycle.mass_kg", y.mass_kg),
            ("bicycle.pedal_force", y.pedal_force),
            ("bicycle.drag_coefficient", y.drag_coefficient),
            ("bicycle.slope_percent", y.slope_percent),
        ]
    }

    /// Reject values that clamping cannot repair (NaN, infinities)
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.values() {
            if !value.is_finite() {
                return Err(LabError::InvalidParameter(format!("{name} = {value}")));
            }
        }
        Ok(())
    }

    /// Parse settings from JSON, filling gaps with defaults and clamping
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings.clamped())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "physics_lab_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::debug!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
