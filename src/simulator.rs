use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::aircraft::{AircraftState, Mode};
use crate::aircraft_profile::{AircraftProfile, AircraftType};
use crate::charger::ChargerAllocator;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::sim_clock::SimClock;
use crate::sim_seed::{SimSeed, FAULT_ROLLS, FLEET_COMPOSITION, TRIP_PLANNING};

/// Draw `size` catalog types from the seed's fleet composition stream
pub fn random_composition(seed: SimSeed, size: usize) -> Vec<AircraftType> {
    let mut rng = seed.stream(FLEET_COMPOSITION);
    (0..size).map(|_| AircraftType::random(&mut rng)).collect()
}

/// Discrete-time simulation of a fleet sharing one charger pool.
///
/// Each tick runs every aircraft's own step in fleet order (mode tally,
/// fault roll, state transition), then settles the chargers: aircraft that
/// started waiting this tick get a free slot immediately if one exists,
/// and aircraft that finished charging hand their slot to whoever has
/// waited longest.
#[derive(Debug, Clone)]
pub struct FleetSimulator {
    config: SimConfig,
    fleet: Vec<AircraftState>,
    chargers: ChargerAllocator,
    clock: SimClock,
    fault_rng: ChaCha8Rng,
    trip_rng: ChaCha8Rng,
}

impl FleetSimulator {
    /// Build a fleet from catalog types, one per slot
    pub fn new(config: SimConfig, composition: &[AircraftType]) -> Result<Self> {
        let profiles = composition.iter().map(|t| t.profile()).collect();
        Self::with_profiles(config, profiles)
    }

    /// Build a fleet with types drawn from the configured seed
    pub fn with_random_fleet(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let composition = random_composition(SimSeed::new(config.seed), config.fleet_size);
        Self::new(config, &composition)
    }

    /// Build a fleet from arbitrary profiles, one per slot
    pub fn with_profiles(config: SimConfig, profiles: Vec<AircraftProfile>) -> Result<Self> {
        config.validate()?;
        if profiles.len() != config.fleet_size {
            return Err(SimError::CompositionMismatch {
                expected: config.fleet_size,
                got: profiles.len(),
            });
        }

        let seed = SimSeed::new(config.seed);
        Ok(Self {
            fleet: profiles.into_iter().map(AircraftState::new).collect(),
            chargers: ChargerAllocator::new(config.charger_count),
            clock: SimClock::new(config.step_ms),
            fault_rng: seed.stream(FAULT_ROLLS),
            trip_rng: seed.stream(TRIP_PLANNING),
            config,
        })
    }

    /// Run for the configured duration
    pub fn run(&mut self) {
        self.simulate(self.config.duration_ms);
    }

    /// Run ticks until `duration_ms` of simulated time is covered
    pub fn simulate(&mut self, duration_ms: u64) {
        self.simulate_with_callback(duration_ms, |_| {});
    }

    /// Run ticks until `duration_ms` is covered, calling `observer` after each tick
    pub fn simulate_with_callback<F>(&mut self, duration_ms: u64, mut observer: F)
    where
        F: FnMut(&FleetSimulator),
    {
        info!(
            vehicles = self.fleet.len(),
            chargers = self.chargers.capacity,
            step_ms = self.clock.step_ms,
            duration_ms,
            "simulating"
        );

        let mut elapsed_ms = 0;
        while elapsed_ms < duration_ms {
            self.tick();
            observer(self);
            elapsed_ms += self.clock.step_ms;
        }

        info!(
            ticks = self.clock.elapsed_ticks,
            queued = ChargerAllocator::queue_len(&self.fleet),
            chargers_in_use = self.chargers.in_use,
            "simulation finished"
        );
    }

    /// Advance the whole fleet by one step
    pub fn tick(&mut self) {
        let step_ms = self.clock.step_ms;
        let policy = self.config.trip_policy;
        let mut newly_waiting = Vec::new();

        for (index, aircraft) in self.fleet.iter_mut().enumerate() {
            aircraft.record_tick();
            aircraft.roll_fault(step_ms, &mut self.fault_rng);

            let was_waiting = aircraft.is_waiting();
            match aircraft.mode {
                Mode::Idle => {
                    let rng = &mut self.trip_rng;
                    aircraft.idle(|profile| policy.plan(profile, rng));
                }
                Mode::Flying => aircraft.fly(step_ms),
                Mode::Charging => aircraft.charge(step_ms),
                Mode::WaitingToCharge => aircraft.wait_for_charger(),
                // Released during settlement
                Mode::ChargeComplete => {}
            }
            if !was_waiting && aircraft.is_waiting() {
                newly_waiting.push(index);
            }

            debug!(
                tick = self.clock.elapsed_ticks,
                vehicle = index,
                aircraft_type = %aircraft.aircraft_type(),
                mode = aircraft.mode.label(),
                remaining_kwh = aircraft.remaining_energy_kwh,
                trip_miles = aircraft.trip_miles_elapsed,
                trip_length = aircraft.trip_length_miles,
                "step"
            );
        }

        for index in newly_waiting {
            self.chargers.try_allocate(&mut self.fleet, index);
        }

        for index in 0..self.fleet.len() {
            if self.fleet[index].mode == Mode::ChargeComplete {
                self.chargers.release(&mut self.fleet, index);
            }
        }

        self.clock.advance();
        debug!(
            time = %self.clock.get_time_string(),
            chargers_in_use = self.chargers.in_use,
            queued = ChargerAllocator::queue_len(&self.fleet),
            "tick settled"
        );
        debug_assert!(self.invariants_hold(), "fleet invariant violated");
    }

    /// Energy and charger bounds, and one mode tally per elapsed tick
    pub fn invariants_hold(&self) -> bool {
        let charging = self.fleet.iter().filter(|a| a.mode == Mode::Charging).count();
        self.chargers.in_use <= self.chargers.capacity
            && charging == self.chargers.in_use
            && self.fleet.iter().all(|a| {
                a.remaining_energy_kwh >= 0.0
                    && a.remaining_energy_kwh <= a.profile.battery_capacity_kwh
                    && a.total_ticks() == self.clock.elapsed_ticks
            })
    }

    pub fn fleet(&self) -> &[AircraftState] {
        &self.fleet
    }

    pub fn aircraft(&self, index: usize) -> Option<&AircraftState> {
        self.fleet.get(index)
    }

    pub fn chargers(&self) -> &ChargerAllocator {
        &self.chargers
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.clock.elapsed_ticks
    }

    pub fn step_ms(&self) -> u64 {
        self.clock.step_ms
    }
}
