//! Injectable randomness for the scoring pipeline.
//!
//! Every random draw in the engine (lexicon perturbation, simulator jitter,
//! the volatile classifier's label flip) goes through a [`NoiseSource`]
//! passed explicitly into the scoring functions. Production code uses
//! [`thread_noise`]; tests pin outputs with [`seeded_noise`] or a stub.
//!
//! # Examples
//!
//! ```
//! use sentilens::noise::{seeded_noise, NoiseSource};
//!
//! let mut noise = seeded_noise(42);
//! let r = noise.uniform(-0.15, 0.15);
//! assert!((-0.15..0.15).contains(&r));
//! ```

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniform random draws for the scoring pipeline.
pub trait NoiseSource {
    /// Uniform draw in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.uniform(0.0, 1.0)
    }

    /// Uniform choice among three options.
    fn pick3<T: Copy>(&mut self, options: [T; 3]) -> T {
        let idx = (self.unit() * 3.0) as usize;
        options[idx.min(2)]
    }
}

/// Adapter wrapping any [`rand::Rng`] as a [`NoiseSource`].
pub struct RngNoise<R: Rng>(R);

impl<R: Rng> RngNoise<R> {
    pub fn new(rng: R) -> Self {
        RngNoise(rng)
    }
}

impl<R: Rng> NoiseSource for RngNoise<R> {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.0.gen_range(lo..hi)
    }
}

/// Noise source backed by the thread-local generator.
pub fn thread_noise() -> RngNoise<ThreadRng> {
    RngNoise(rand::thread_rng())
}

/// Deterministic noise source for reproducible runs and tests.
pub fn seeded_noise(seed: u64) -> RngNoise<StdRng> {
    RngNoise(StdRng::seed_from_u64(seed))
}
