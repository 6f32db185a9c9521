//! Seeded random stream for generation, optionally seeded from runtime entropy.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Deterministic uniform source. Every draw advances the same ChaCha stream, so a
/// `(seed, call sequence)` pair always yields the same values.
#[derive(Clone, Debug)]
pub struct RandomSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeds from the wall clock, the process id and a per-process draw counter.
    /// The chosen seed stays readable through [`Self::seed`] so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `0..upper`. `upper` must be non-zero.
    pub fn below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "below() needs a non-empty range");
        (self.rng.next_u64() % upper as u64) as usize
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

static ENTROPY_DRAWS: AtomicU64 = AtomicU64::new(0);

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

fn entropy_seed() -> u64 {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let draw = ENTROPY_DRAWS.fetch_add(1, Ordering::Relaxed);
    let clock = (nanos as u64) ^ ((nanos >> 64) as u64);
    let pid = u64::from(process::id()).rotate_left(32);
    splitmix64(clock ^ pid ^ draw.wrapping_mul(GOLDEN_GAMMA))
}

fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
