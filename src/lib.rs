pub mod aircraft;
pub mod aircraft_profile;
pub mod charger;
pub mod config;
pub mod error;
pub mod report;
pub mod sim_clock;
pub mod sim_seed;
pub mod simulator;
pub mod stats;
pub mod trip_policy;

pub use aircraft::{AircraftState, Mode};
pub use aircraft_profile::{AircraftProfile, AircraftType};
pub use charger::ChargerAllocator;
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use simulator::FleetSimulator;
pub use stats::StatisticsAggregator;
pub use trip_policy::TripPolicy;
