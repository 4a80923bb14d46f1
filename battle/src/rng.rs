//! Injectable randomness for accuracy, critical hit and enemy move rolls

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Source of uniform random integers
pub trait RandomSource: Send {
    /// Uniform value in `[0, bound)`. `bound` is always greater than zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// `StdRng`-backed source
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound.max(1))
    }
}

/// A `numerator / denominator` probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chance {
    pub numerator: u32,
    pub denominator: u32,
}

impl Chance {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub const fn never() -> Self {
        Self::new(0, 1)
    }

    /// Roll once. Consumes exactly one value unless the denominator is zero.
    pub fn roll(&self, rng: &mut dyn RandomSource) -> bool {
        if self.denominator == 0 {
            return false;
        }
        rng.next_below(self.denominator) < self.numerator
    }
}

/// Hands out one random source per battle session
pub trait RngProvider: Send + Sync {
    fn session_rng(&self) -> Box<dyn RandomSource>;
}

/// Fresh OS-seeded source for every session
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngProvider;

impl RngProvider for OsRngProvider {
    fn session_rng(&self) -> Box<dyn RandomSource> {
        Box::new(StdRandom::from_os())
    }
}

/// Reproducible sources: session `n` is seeded with `seed + n`
#[derive(Debug, Default)]
pub struct SeededRngProvider {
    seed: u64,
    issued: AtomicU64,
}

impl SeededRngProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            issued: AtomicU64::new(0),
        }
    }
}

impl RngProvider for SeededRngProvider {
    fn session_rng(&self) -> Box<dyn RandomSource> {
        let n = self.issued.fetch_add(1, Ordering::Relaxed);
        Box::new(StdRandom::seeded(self.seed.wrapping_add(n)))
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use scripted::{ScriptedRng, ScriptedRngProvider};

#[cfg(any(test, feature = "test-util"))]
mod scripted {
    use super::{RandomSource, RngProvider};

    /// Replays a fixed list of values, failing loudly when it runs out
    #[derive(Debug, Clone)]
    pub struct ScriptedRng {
        values: Vec<u32>,
        index: usize,
    }

    impl ScriptedRng {
        pub fn new(values: Vec<u32>) -> Self {
            Self { values, index: 0 }
        }

        pub fn consumed(&self) -> usize {
            self.index
        }
    }

    impl RandomSource for ScriptedRng {
        fn next_below(&mut self, bound: u32) -> u32 {
            let Some(&value) = self.values.get(self.index) else {
                panic!(
                    "ScriptedRng exhausted after {} values. Need more random values.",
                    self.index
                );
            };
            assert!(
                value < bound,
                "scripted value {} at position {} is out of range [0, {})",
                value,
                self.index,
                bound
            );
            self.index += 1;
            value
        }
    }

    /// Gives every session its own copy of the same script
    #[derive(Debug, Clone)]
    pub struct ScriptedRngProvider {
        values: Vec<u32>,
    }

    impl ScriptedRngProvider {
        pub fn new(values: Vec<u32>) -> Self {
            Self { values }
        }
    }

    impl RngProvider for ScriptedRngProvider {
        fn session_rng(&self) -> Box<dyn RandomSource> {
            Box::new(ScriptedRng::new(self.values.clone()))
        }
    }
}
