use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::aircraft_profile::AircraftProfile;
use crate::error::{Result, SimError};

/// Parameters for one trip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripPlan {
    pub passengers: u32,
    pub length_miles: f64,
}

/// How an idle aircraft with charge picks its next trip
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TripPolicy {
    /// Every trip carries a full cabin over the full battery range
    #[default]
    FullCapacity,
    /// Passengers drawn from 1..=max, length from [fraction * range, range]
    Randomized { min_range_fraction: f64 },
}

impl TripPolicy {
    pub fn validate(&self) -> Result<()> {
        match self {
            TripPolicy::FullCapacity => Ok(()),
            TripPolicy::Randomized { min_range_fraction } => {
                if *min_range_fraction > 0.0 && *min_range_fraction <= 1.0 {
                    Ok(())
                } else {
                    Err(SimError::InvalidTripPolicy(format!(
                        "min_range_fraction must be within (0, 1], got {min_range_fraction}"
                    )))
                }
            }
        }
    }

    /// Plan the next trip. The length never exceeds the profile's range.
    /// `FullCapacity` never touches the rng.
    pub fn plan(&self, profile: &AircraftProfile, rng: &mut impl Rng) -> TripPlan {
        match self {
            TripPolicy::FullCapacity => TripPlan {
                passengers: profile.max_passengers,
                length_miles: profile.max_trip_miles,
            },
            TripPolicy::Randomized { min_range_fraction } => {
                let passengers = if profile.max_passengers == 0 {
                    0
                } else {
                    rng.gen_range(1..=profile.max_passengers)
                };
                let low = profile.max_trip_miles * min_range_fraction;
                let length_miles = if low < profile.max_trip_miles {
                    Uniform::new_inclusive(low, profile.max_trip_miles).sample(rng)
                } else {
                    profile.max_trip_miles
                };
                TripPlan {
                    passengers,
                    length_miles: length_miles.min(profile.max_trip_miles),
                }
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            TripPolicy::FullCapacity => "full capacity".to_string(),
            TripPolicy::Randomized { min_range_fraction } => {
                format!("randomized (>= {:.0}% range)", min_range_fraction * 100.0)
            }
        }
    }
}
