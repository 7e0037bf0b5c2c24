use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::sim_clock::{SimClock, MS_PER_HOUR, MS_PER_MIN};
use crate::trip_policy::TripPolicy;

/// Default number of aircraft in the fleet
pub const DEFAULT_FLEET_SIZE: usize = 20;

/// Default ceiling on fleet size
pub const DEFAULT_MAX_FLEET_SIZE: usize = 20;

/// Default number of chargers shared by the fleet
pub const DEFAULT_CHARGER_COUNT: usize = 3;

/// Default tick length: one minute
pub const DEFAULT_STEP_MS: u64 = MS_PER_MIN;

/// Default run length: five hours
pub const DEFAULT_DURATION_MS: u64 = 5 * MS_PER_HOUR;

pub const DEFAULT_SEED: u64 = 20;

/// Run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub fleet_size: usize,
    pub max_fleet_size: usize,
    pub charger_count: usize,
    pub step_ms: u64,
    pub duration_ms: u64,
    pub seed: u64,
    pub trip_policy: TripPolicy,
}

impl SimConfig {
    /// Check every constraint, reporting the first one violated.
    /// Oversized fleets are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if self.fleet_size == 0 {
            return Err(SimError::EmptyFleet);
        }
        if self.fleet_size > self.max_fleet_size {
            return Err(SimError::FleetTooLarge {
                requested: self.fleet_size,
                max: self.max_fleet_size,
            });
        }
        if self.charger_count == 0 {
            return Err(SimError::NoChargers);
        }
        if self.step_ms == 0 {
            return Err(SimError::InvalidStep);
        }
        if self.duration_ms == 0 {
            return Err(SimError::InvalidDuration);
        }
        self.trip_policy.validate()
    }

    /// Number of ticks a full run takes
    pub fn total_ticks(&self) -> u64 {
        SimClock::new(self.step_ms).ticks_for(self.duration_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fleet_size: DEFAULT_FLEET_SIZE,
            max_fleet_size: DEFAULT_MAX_FLEET_SIZE,
            charger_count: DEFAULT_CHARGER_COUNT,
            step_ms: DEFAULT_STEP_MS,
            duration_ms: DEFAULT_DURATION_MS,
            seed: DEFAULT_SEED,
            trip_policy: TripPolicy::default(),
        }
    }
}
