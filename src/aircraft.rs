use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aircraft_profile::{AircraftProfile, AircraftType};
use crate::error::{Result, SimError};
use crate::sim_clock::ms_to_hours;
use crate::trip_policy::TripPlan;

/// Slack allowed when checking a trip against the derived range, so that
/// range values like 220 / 2.2 = 99.99999999999999 still admit a 100 mile trip.
pub const TRIP_LENGTH_TOLERANCE: f64 = 1e-9;

/// Operational mode of one aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Idle,
    WaitingToCharge,
    ChargeComplete,
    Charging,
    Flying,
}

impl Mode {
    pub const COUNT: usize = 5;

    /// All modes, in report column order
    pub const ALL: [Mode; Mode::COUNT] = [
        Mode::Idle,
        Mode::WaitingToCharge,
        Mode::ChargeComplete,
        Mode::Charging,
        Mode::Flying,
    ];

    pub fn index(&self) -> usize {
        match self {
            Mode::Idle => 0,
            Mode::WaitingToCharge => 1,
            Mode::ChargeComplete => 2,
            Mode::Charging => 3,
            Mode::Flying => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::WaitingToCharge => "Waiting to charge",
            Mode::ChargeComplete => "Charge complete",
            Mode::Charging => "Charging",
            Mode::Flying => "Flying",
        }
    }
}

/// One simulated vehicle: a catalog profile plus its mutable run state.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftState {
    pub profile: AircraftProfile,
    pub mode: Mode,
    /// Remaining battery energy (kWh), always within [0, capacity]
    pub remaining_energy_kwh: f64,

    // Current trip. Meaningful while Flying and until the next trip starts.
    pub trip_length_miles: f64,
    pub trip_miles_elapsed: f64,
    pub trip_passenger_count: u32,

    // Run totals
    pub ticks_in_mode: [u64; Mode::COUNT],
    pub total_miles_flown: f64,
    pub total_passenger_miles: f64,
    pub total_faults: u32,
    pub trips_started: u32,
    pub charging_sessions_started: u32,
    /// Ticks spent queued since entering WaitingToCharge; reset on grant
    pub ticks_waiting_for_charger: u32,
}

impl AircraftState {
    /// A vehicle starts idle with a full battery
    pub fn new(profile: AircraftProfile) -> Self {
        Self {
            profile,
            mode: Mode::Idle,
            remaining_energy_kwh: profile.battery_capacity_kwh,
            trip_length_miles: 0.0,
            trip_miles_elapsed: 0.0,
            trip_passenger_count: 0,
            ticks_in_mode: [0; Mode::COUNT],
            total_miles_flown: 0.0,
            total_passenger_miles: 0.0,
            total_faults: 0,
            trips_started: 0,
            charging_sessions_started: 0,
            ticks_waiting_for_charger: 0,
        }
    }

    /// Shorthand for a catalog vehicle
    pub fn of_type(aircraft_type: AircraftType) -> Self {
        Self::new(aircraft_type.profile())
    }

    pub fn aircraft_type(&self) -> AircraftType {
        self.profile.aircraft_type
    }

    /// Count one tick against the current mode
    pub fn record_tick(&mut self) {
        self.ticks_in_mode[self.mode.index()] += 1;
    }

    pub fn ticks_in(&self, mode: Mode) -> u64 {
        self.ticks_in_mode[mode.index()]
    }

    pub fn total_ticks(&self) -> u64 {
        self.ticks_in_mode.iter().sum()
    }

    /// Roll for a fault over `duration_ms`. Counts the fault and returns true
    /// on a hit; never changes mode.
    pub fn roll_fault(&mut self, duration_ms: u64, rng: &mut impl Rng) -> bool {
        let chance = ms_to_hours(duration_ms) * self.profile.fault_probability_per_hour;
        let roll: f64 = rng.gen();
        if roll < chance {
            self.total_faults += 1;
            true
        } else {
            false
        }
    }

    /// Begin a trip. Rejects trips beyond the aircraft's range or cabin size.
    pub fn start_trip(&mut self, passengers: u32, length_miles: f64) -> Result<()> {
        if length_miles > self.profile.max_trip_miles + TRIP_LENGTH_TOLERANCE {
            return Err(SimError::TripTooLong {
                requested: length_miles,
                max: self.profile.max_trip_miles,
            });
        }
        if passengers > self.profile.max_passengers {
            return Err(SimError::TooManyPassengers {
                requested: passengers,
                max: self.profile.max_passengers,
            });
        }
        self.begin_trip(TripPlan {
            passengers,
            length_miles,
        });
        Ok(())
    }

    fn begin_trip(&mut self, plan: TripPlan) {
        debug_assert!(plan.length_miles <= self.profile.max_trip_miles + TRIP_LENGTH_TOLERANCE);
        self.trip_passenger_count = plan.passengers;
        self.trip_length_miles = plan.length_miles;
        self.trip_miles_elapsed = 0.0;
        self.trips_started += 1;
        self.mode = Mode::Flying;
    }

    /// Idle step: queue for a charger when empty, otherwise take off on
    /// the planned trip. `plan` is only consulted when a trip starts.
    pub fn idle(&mut self, plan: impl FnOnce(&AircraftProfile) -> TripPlan) {
        if self.remaining_energy_kwh <= 0.0 {
            self.mode = Mode::WaitingToCharge;
        } else {
            let trip = plan(&self.profile);
            self.begin_trip(trip);
        }
    }

    /// Fly at cruise for `duration_ms`. Runs out of energy mid-step by
    /// flying only the feasible distance and queueing for a charger.
    pub fn fly(&mut self, duration_ms: u64) {
        let hours = ms_to_hours(duration_ms);
        let energy_needed = self.profile.energy_per_mile_kwh * self.profile.cruise_speed_mph * hours;
        let miles_this_tick = self.profile.cruise_speed_mph * hours;

        if energy_needed > self.remaining_energy_kwh {
            let partial_miles = self.profile.miles_for_energy(self.remaining_energy_kwh);
            self.remaining_energy_kwh = 0.0;
            self.add_miles(partial_miles);
            self.mode = Mode::WaitingToCharge;
        } else {
            let trip_done = self.trip_miles_elapsed + miles_this_tick >= self.trip_length_miles;
            self.remaining_energy_kwh -= energy_needed;
            self.add_miles(miles_this_tick);
            if trip_done {
                self.mode = Mode::Idle;
            }
        }

        debug_assert!(self.remaining_energy_kwh >= 0.0, "negative energy after flight");
    }

    fn add_miles(&mut self, miles: f64) {
        self.trip_miles_elapsed += miles;
        self.total_miles_flown += miles;
        self.total_passenger_miles += miles * self.trip_passenger_count as f64;
    }

    /// Charge for `duration_ms`, capped at battery capacity.
    pub fn charge(&mut self, duration_ms: u64) {
        let charged = self.profile.charge_rate_kwh_per_hour * ms_to_hours(duration_ms);
        self.remaining_energy_kwh =
            (self.remaining_energy_kwh + charged).min(self.profile.battery_capacity_kwh);

        if self.remaining_energy_kwh >= self.profile.battery_capacity_kwh {
            self.mode = Mode::ChargeComplete;
        }
    }

    /// One queued tick without a charger
    pub fn wait_for_charger(&mut self) {
        self.ticks_waiting_for_charger += 1;
    }

    /// Take a charger slot (called by the allocator)
    pub fn grant_charger(&mut self) {
        debug_assert_eq!(self.mode, Mode::WaitingToCharge);
        self.mode = Mode::Charging;
        self.charging_sessions_started += 1;
        self.ticks_waiting_for_charger = 0;
    }

    /// Leave the charger after a full charge (called by the allocator)
    pub fn leave_charger(&mut self) {
        debug_assert_eq!(self.mode, Mode::ChargeComplete);
        self.mode = Mode::Idle;
    }

    pub fn is_waiting(&self) -> bool {
        self.mode == Mode::WaitingToCharge
    }
}
