use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stream topic for drawing aircraft types into fleet slots.
pub const FLEET_COMPOSITION: &str = "fleet_composition";
/// Stream topic for the per-tick fault rolls.
pub const FAULT_ROLLS: &str = "fault_rolls";
/// Stream topic for trip parameter draws.
pub const TRIP_PLANNING: &str = "trip_planning";

/// A deterministic seed for a simulation run.
///
/// Every source of randomness in a run (fleet composition, fault rolls,
/// trip planning) draws from its own stream derived from this seed and a
/// topic name. Streams are independent: drawing more fault rolls never
/// shifts the fleet composition, so two runs with the same seed and
/// configuration replay bit-identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSeed {
    seed: u64,
}

impl SimSeed {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Get the raw seed value
    pub fn raw_seed(&self) -> u64 {
        self.seed
    }

    /// Get a deterministic RNG stream for a topic.
    pub fn stream(&self, topic: &str) -> ChaCha8Rng {
        let topic_hash = fnv1a(topic.as_bytes());
        let mut seed_bytes = [0u8; 32];
        seed_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        seed_bytes[8..16].copy_from_slice(&topic_hash.to_le_bytes());
        ChaCha8Rng::from_seed(seed_bytes)
    }
}

/// FNV-1a hash. std's DefaultHasher is not stable across Rust versions.
fn fnv1a(data: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
