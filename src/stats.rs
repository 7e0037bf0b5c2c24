//! Run summaries read from a finished (or running) simulation.
//!
//! Nothing here mutates the fleet; the aggregator only reads the per-aircraft
//! counters and the clock.

use serde::Serialize;

use crate::aircraft::{AircraftState, Mode};
use crate::aircraft_profile::AircraftType;
use crate::simulator::FleetSimulator;
use crate::sim_clock::SimClock;

/// Aggregate figures for one aircraft model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStats {
    pub aircraft_type: AircraftType,
    pub vehicle_count: usize,
    pub flight_time_per_flight_hours: f64,
    pub distance_per_flight_miles: f64,
    pub charge_session_hours: f64,
    pub total_faults: u32,
    pub total_passenger_miles: f64,
}

/// Fraction of the run one vehicle spent in each mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeShare {
    pub vehicle: usize,
    pub aircraft_type: AircraftType,
    /// Indexed like `Mode::ALL`
    pub shares: [f64; Mode::COUNT],
}

impl ModeShare {
    pub fn share(&self, mode: Mode) -> f64 {
        self.shares[mode.index()]
    }
}

/// Fleet-wide totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetTotals {
    pub ticks: u64,
    pub simulated_hours: f64,
    pub trips: u32,
    pub charging_sessions: u32,
    pub miles_flown: f64,
    pub passenger_miles: f64,
    pub faults: u32,
}

pub struct StatisticsAggregator<'a> {
    fleet: &'a [AircraftState],
    clock: &'a SimClock,
}

impl<'a> StatisticsAggregator<'a> {
    pub fn new(sim: &'a FleetSimulator) -> Self {
        Self::from_parts(sim.fleet(), sim.clock())
    }

    pub fn from_parts(fleet: &'a [AircraftState], clock: &'a SimClock) -> Self {
        Self { fleet, clock }
    }

    /// One entry per catalog type, in catalog order, including types with
    /// no vehicles (all zeros).
    pub fn type_stats(&self) -> Vec<TypeStats> {
        AircraftType::ALL
            .iter()
            .map(|&t| self.stats_for(t))
            .collect()
    }

    pub fn stats_for(&self, aircraft_type: AircraftType) -> TypeStats {
        let vehicles: Vec<&AircraftState> = self
            .fleet
            .iter()
            .filter(|a| a.aircraft_type() == aircraft_type)
            .collect();

        let trips: u32 = vehicles.iter().map(|a| a.trips_started).sum();
        let sessions: u32 = vehicles.iter().map(|a| a.charging_sessions_started).sum();
        let flying_ticks: u64 = vehicles.iter().map(|a| a.ticks_in(Mode::Flying)).sum();
        let charging_ticks: u64 = vehicles.iter().map(|a| a.ticks_in(Mode::Charging)).sum();
        let miles: f64 = vehicles.iter().map(|a| a.total_miles_flown).sum();

        TypeStats {
            aircraft_type,
            vehicle_count: vehicles.len(),
            flight_time_per_flight_hours: ratio(self.clock.ticks_to_hours(flying_ticks), trips),
            distance_per_flight_miles: ratio(miles, trips),
            charge_session_hours: ratio(self.clock.ticks_to_hours(charging_ticks), sessions),
            total_faults: vehicles.iter().map(|a| a.total_faults).sum(),
            total_passenger_miles: vehicles.iter().map(|a| a.total_passenger_miles).sum(),
        }
    }

    /// Per-vehicle mode breakdown, in fleet order
    pub fn mode_shares(&self) -> Vec<ModeShare> {
        let ticks = self.clock.elapsed_ticks;
        self.fleet
            .iter()
            .enumerate()
            .map(|(vehicle, a)| {
                let mut shares = [0.0; Mode::COUNT];
                if ticks > 0 {
                    for mode in Mode::ALL {
                        shares[mode.index()] = a.ticks_in(mode) as f64 / ticks as f64;
                    }
                }
                ModeShare {
                    vehicle,
                    aircraft_type: a.aircraft_type(),
                    shares,
                }
            })
            .collect()
    }

    pub fn fleet_totals(&self) -> FleetTotals {
        FleetTotals {
            ticks: self.clock.elapsed_ticks,
            simulated_hours: self.clock.elapsed_hours(),
            trips: self.fleet.iter().map(|a| a.trips_started).sum(),
            charging_sessions: self.fleet.iter().map(|a| a.charging_sessions_started).sum(),
            miles_flown: self.fleet.iter().map(|a| a.total_miles_flown).sum(),
            passenger_miles: self.fleet.iter().map(|a| a.total_passenger_miles).sum(),
            faults: self.fleet.iter().map(|a| a.total_faults).sum(),
        }
    }
}

fn ratio(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim_clock::{MS_PER_HOUR, MS_PER_MIN};

    fn finished_sim() -> FleetSimulator {
        let config = SimConfig {
            fleet_size: 4,
            charger_count: 1,
            ..SimConfig::default()
        };
        let composition = [
            AircraftType::Alpha,
            AircraftType::Alpha,
            AircraftType::Beta,
            AircraftType::Echo,
        ];
        let mut sim = FleetSimulator::new(config, &composition).unwrap();
        sim.run();
        sim
    }

    #[test]
    fn test_type_stats_cover_catalog() {
        let sim = finished_sim();
        let stats = StatisticsAggregator::new(&sim).type_stats();

        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].aircraft_type, AircraftType::Alpha);
        assert_eq!(stats[0].vehicle_count, 2);
        assert_eq!(stats[1].vehicle_count, 1);
        assert_eq!(stats[2].vehicle_count, 0);
        assert_eq!(stats[2].flight_time_per_flight_hours, 0.0);
        assert_eq!(stats[2].total_passenger_miles, 0.0);
    }

    #[test]
    fn test_type_stats_match_vehicle_counters() {
        let sim = finished_sim();
        let alpha = StatisticsAggregator::new(&sim).stats_for(AircraftType::Alpha);

        let vehicles = &sim.fleet()[..2];
        let faults: u32 = vehicles.iter().map(|a| a.total_faults).sum();
        let pm: f64 = vehicles.iter().map(|a| a.total_passenger_miles).sum();
        let trips: u32 = vehicles.iter().map(|a| a.trips_started).sum();
        let miles: f64 = vehicles.iter().map(|a| a.total_miles_flown).sum();

        assert_eq!(alpha.total_faults, faults);
        assert!((alpha.total_passenger_miles - pm).abs() < 1e-9);
        assert!((alpha.distance_per_flight_miles - miles / trips as f64).abs() < 1e-9);
        // Alpha range is 200 miles, so no flight can average more
        assert!(alpha.distance_per_flight_miles <= 200.0 + 2.0);
        assert!(alpha.flight_time_per_flight_hours > 0.0);
    }

    #[test]
    fn test_mode_shares_sum_to_one() {
        let sim = finished_sim();
        for share in StatisticsAggregator::new(&sim).mode_shares() {
            let total: f64 = share.shares.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "vehicle {}", share.vehicle);
            assert_eq!(share.share(Mode::ChargeComplete), 0.0);
        }
    }

    #[test]
    fn test_mode_shares_before_run() {
        let sim = FleetSimulator::new(
            SimConfig { fleet_size: 1, ..SimConfig::default() },
            &[AircraftType::Delta],
        )
        .unwrap();
        let shares = StatisticsAggregator::new(&sim).mode_shares();
        assert_eq!(shares[0].shares, [0.0; Mode::COUNT]);
    }

    #[test]
    fn test_charge_session_time() {
        // Beta charges 100 kWh in 0.2 h; a lone aircraft never waits
        let config = SimConfig {
            fleet_size: 1,
            charger_count: 1,
            step_ms: MS_PER_MIN,
            ..SimConfig::default()
        };
        let mut sim = FleetSimulator::new(config, &[AircraftType::Beta]).unwrap();
        sim.simulate(3 * MS_PER_HOUR);

        let beta = StatisticsAggregator::new(&sim).stats_for(AircraftType::Beta);
        assert!(beta.charge_session_hours > 0.15 && beta.charge_session_hours < 0.25);
    }

    #[test]
    fn test_fleet_totals() {
        let sim = finished_sim();
        let totals = StatisticsAggregator::new(&sim).fleet_totals();
        assert_eq!(totals.ticks, 300);
        assert!((totals.simulated_hours - 5.0).abs() < 1e-9);
        let trips: u32 = sim.fleet().iter().map(|a| a.trips_started).sum();
        assert_eq!(totals.trips, trips);
    }
}
