use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// The fixed catalog of aircraft models in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    Alpha,
    Beta,
    Charlie,
    Delta,
    Echo,
}

impl AircraftType {
    /// All catalog types, in report order
    pub const ALL: [AircraftType; 5] = [
        AircraftType::Alpha,
        AircraftType::Beta,
        AircraftType::Charlie,
        AircraftType::Delta,
        AircraftType::Echo,
    ];

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            AircraftType::Alpha => "Alpha",
            AircraftType::Beta => "Beta",
            AircraftType::Charlie => "Charlie",
            AircraftType::Delta => "Delta",
            AircraftType::Echo => "Echo",
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            AircraftType::Alpha => 0,
            AircraftType::Beta => 1,
            AircraftType::Charlie => 2,
            AircraftType::Delta => 3,
            AircraftType::Echo => 4,
        }
    }

    /// Catalog constants for this model
    pub fn profile(&self) -> AircraftProfile {
        //                                          mph    kWh    chg h  kWh/mi  pax  fault/h
        match self {
            AircraftType::Alpha => AircraftProfile::derive(*self, 120.0, 320.0, 0.60, 1.6, 4, 0.25),
            AircraftType::Beta => AircraftProfile::derive(*self, 100.0, 100.0, 0.20, 1.5, 5, 0.10),
            AircraftType::Charlie => AircraftProfile::derive(*self, 160.0, 220.0, 0.80, 2.2, 3, 0.05),
            AircraftType::Delta => AircraftProfile::derive(*self, 90.0, 120.0, 0.62, 0.8, 2, 0.22),
            AircraftType::Echo => AircraftProfile::derive(*self, 30.0, 150.0, 0.30, 5.8, 2, 0.61),
        }
    }

    /// Draw a type uniformly from the catalog
    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl std::fmt::Display for AircraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical constants for one aircraft model. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub aircraft_type: AircraftType,
    /// Cruise speed (mph)
    pub cruise_speed_mph: f64,
    /// Battery capacity (kWh)
    pub battery_capacity_kwh: f64,
    /// Time to charge from empty (hours)
    pub charge_time_hours: f64,
    /// Energy use at cruise (kWh/mile)
    pub energy_per_mile_kwh: f64,
    pub max_passengers: u32,
    /// Probability of a fault per hour of operation
    pub fault_probability_per_hour: f64,

    // Derived
    /// Range on a full battery (miles)
    pub max_trip_miles: f64,
    /// kWh gained per hour of charging
    pub charge_rate_kwh_per_hour: f64,
}

impl AircraftProfile {
    /// Build a custom profile, rejecting constants that would make the
    /// derived values meaningless.
    pub fn new(
        aircraft_type: AircraftType,
        cruise_speed_mph: f64,
        battery_capacity_kwh: f64,
        charge_time_hours: f64,
        energy_per_mile_kwh: f64,
        max_passengers: u32,
        fault_probability_per_hour: f64,
    ) -> Result<Self> {
        if !(cruise_speed_mph > 0.0) {
            return Err(SimError::InvalidProfile(format!(
                "cruise speed must be positive, got {cruise_speed_mph}"
            )));
        }
        if !(battery_capacity_kwh > 0.0) {
            return Err(SimError::InvalidProfile(format!(
                "battery capacity must be positive, got {battery_capacity_kwh}"
            )));
        }
        if !(charge_time_hours > 0.0) {
            return Err(SimError::InvalidProfile(format!(
                "charge time must be positive, got {charge_time_hours}"
            )));
        }
        if !(energy_per_mile_kwh > 0.0) {
            return Err(SimError::InvalidProfile(format!(
                "energy use must be positive, got {energy_per_mile_kwh}"
            )));
        }
        if !(0.0..=1.0).contains(&fault_probability_per_hour) {
            return Err(SimError::InvalidProfile(format!(
                "fault probability must be within [0, 1], got {fault_probability_per_hour}"
            )));
        }

        Ok(Self::derive(
            aircraft_type,
            cruise_speed_mph,
            battery_capacity_kwh,
            charge_time_hours,
            energy_per_mile_kwh,
            max_passengers,
            fault_probability_per_hour,
        ))
    }

    fn derive(
        aircraft_type: AircraftType,
        cruise_speed_mph: f64,
        battery_capacity_kwh: f64,
        charge_time_hours: f64,
        energy_per_mile_kwh: f64,
        max_passengers: u32,
        fault_probability_per_hour: f64,
    ) -> Self {
        Self {
            aircraft_type,
            cruise_speed_mph,
            battery_capacity_kwh,
            charge_time_hours,
            energy_per_mile_kwh,
            max_passengers,
            fault_probability_per_hour,
            max_trip_miles: battery_capacity_kwh / energy_per_mile_kwh,
            charge_rate_kwh_per_hour: battery_capacity_kwh / charge_time_hours,
        }
    }

    /// Miles flyable on `energy_kwh`
    pub fn miles_for_energy(&self, energy_kwh: f64) -> f64 {
        energy_kwh / self.energy_per_mile_kwh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_catalog_constants() {
        let alpha = AircraftType::Alpha.profile();
        assert_eq!(alpha.cruise_speed_mph, 120.0);
        assert_eq!(alpha.battery_capacity_kwh, 320.0);
        assert_eq!(alpha.max_passengers, 4);
        assert_eq!(alpha.max_trip_miles, 200.0);

        let beta = AircraftType::Beta.profile();
        assert_eq!(beta.charge_rate_kwh_per_hour, 500.0);

        let echo = AircraftType::Echo.profile();
        assert!((echo.max_trip_miles - 25.862).abs() < 0.001);
        assert_eq!(echo.fault_probability_per_hour, 0.61);
    }

    #[test]
    fn test_profiles_carry_their_type() {
        for t in AircraftType::ALL {
            assert_eq!(t.profile().aircraft_type, t);
            assert_eq!(AircraftType::ALL[t.index()], t);
        }
    }

    #[test]
    fn test_derived_values() {
        for t in AircraftType::ALL {
            let p = t.profile();
            let range_energy = p.energy_per_mile_kwh * p.max_trip_miles;
            assert!((range_energy - p.battery_capacity_kwh).abs() < 1e-9, "{t}");
            assert!((p.miles_for_energy(p.battery_capacity_kwh) - p.max_trip_miles).abs() < 1e-9);
            assert!((p.charge_rate_kwh_per_hour * p.charge_time_hours - p.battery_capacity_kwh).abs() < 1e-9);
        }
    }

    #[test]
    fn test_custom_profile_validation() {
        assert!(AircraftProfile::new(AircraftType::Alpha, 100.0, 200.0, 0.5, 1.0, 4, 0.1).is_ok());

        let zero_energy = AircraftProfile::new(AircraftType::Alpha, 100.0, 200.0, 0.5, 0.0, 4, 0.1);
        assert!(matches!(zero_energy, Err(SimError::InvalidProfile(_))));

        let zero_charge = AircraftProfile::new(AircraftType::Alpha, 100.0, 200.0, 0.0, 1.0, 4, 0.1);
        assert!(matches!(zero_charge, Err(SimError::InvalidProfile(_))));

        let bad_fault = AircraftProfile::new(AircraftType::Alpha, 100.0, 200.0, 0.5, 1.0, 4, 1.5);
        assert!(matches!(bad_fault, Err(SimError::InvalidProfile(_))));

        let nan_speed = AircraftProfile::new(AircraftType::Alpha, f64::NAN, 200.0, 0.5, 1.0, 4, 0.1);
        assert!(nan_speed.is_err());
    }

    #[test]
    fn test_random_type_covers_catalog() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[AircraftType::random(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AircraftType::Charlie.label(), "Charlie");
        assert_eq!(AircraftType::Delta.to_string(), "Delta");
    }
}
