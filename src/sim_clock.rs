//! Tick clock for the fleet simulation
//! Time advances in fixed steps; nothing pauses or rewinds

pub const MS_PER_SEC: u64 = 1000;
pub const MS_PER_MIN: u64 = 60 * MS_PER_SEC;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MIN;

/// Convert a millisecond duration to fractional hours
pub fn ms_to_hours(duration_ms: u64) -> f64 {
    duration_ms as f64 / MS_PER_HOUR as f64
}

/// Clock state
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    /// Duration of one tick in milliseconds
    pub step_ms: u64,
    /// Number of ticks completed so far
    pub elapsed_ticks: u64,
}

impl SimClock {
    /// Create a clock at tick zero
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms,
            elapsed_ticks: 0,
        }
    }

    /// Advance the clock by one tick
    pub fn advance(&mut self) {
        self.elapsed_ticks += 1;
    }

    /// Simulated milliseconds elapsed
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ticks * self.step_ms
    }

    /// Simulated hours elapsed
    pub fn elapsed_hours(&self) -> f64 {
        ms_to_hours(self.elapsed_ms())
    }

    /// Fraction of an hour covered by one tick
    pub fn hours_per_step(&self) -> f64 {
        ms_to_hours(self.step_ms)
    }

    /// Number of ticks needed to cover `duration_ms`.
    /// A trailing partial step still counts as a full tick.
    pub fn ticks_for(&self, duration_ms: u64) -> u64 {
        if self.step_ms == 0 {
            return 0;
        }
        duration_ms.div_ceil(self.step_ms)
    }

    /// Convert a tick count to hours at this clock's step size
    pub fn ticks_to_hours(&self, ticks: u64) -> f64 {
        ticks as f64 * self.hours_per_step()
    }

    /// Formatted elapsed time (e.g., "t = 2h 05m")
    pub fn get_time_string(&self) -> String {
        let total_min = self.elapsed_ms() / MS_PER_MIN;
        format!("t = {}h {:02}m", total_min / 60, total_min % 60)
    }
}
