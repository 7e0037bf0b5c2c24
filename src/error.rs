use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("fleet size {requested} exceeds the maximum of {max}")]
    FleetTooLarge { requested: usize, max: usize },
    #[error("fleet must contain at least one aircraft")]
    EmptyFleet,
    #[error("charger count must be at least 1")]
    NoChargers,
    #[error("step duration must be positive")]
    InvalidStep,
    #[error("run duration must be positive")]
    InvalidDuration,
    #[error("fleet composition has {got} aircraft, expected {expected}")]
    CompositionMismatch { expected: usize, got: usize },
    #[error("invalid aircraft profile: {0}")]
    InvalidProfile(String),
    #[error("trip of {requested} miles exceeds maximum range of {max} miles")]
    TripTooLong { requested: f64, max: f64 },
    #[error("{requested} passengers exceeds capacity of {max}")]
    TooManyPassengers { requested: u32, max: u32 },
    #[error("invalid trip policy: {0}")]
    InvalidTripPolicy(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
