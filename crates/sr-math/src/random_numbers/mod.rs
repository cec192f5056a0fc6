//! Random number generation for Monte-Carlo simulation.
//!
//! Thin wrappers over `rand` and `rand_mt`: a seedable Mersenne Twister
//! uniform source and an inverse-CDF transform to standard normals.

use crate::distributions::normal_cdf_inverse;
use rand_mt::Mt19937GenRand64;
use sr_core::Real;

/// Uniform pseudo-random generator backed by the 64-bit Mersenne Twister.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Creates a generator from an explicit seed. The same seed always
    /// yields the same sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Creates a generator seeded from the operating system's entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Returns the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        let u: u64 = self.rng.next_u64();
        u as f64 / (u64::MAX as f64 + 1.0)
    }
}

/// Standard-normal generator obtained by pushing Mersenne Twister uniforms
/// through the inverse normal CDF.
pub struct InverseCumulativeNormalRng {
    uniform: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Creates a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            uniform: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Creates a generator seeded from the operating system's entropy.
    pub fn from_entropy() -> Self {
        Self {
            uniform: MersenneTwisterUniformRng::from_entropy(),
        }
    }

    /// Returns the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // u = 0 would map to -inf, so redraw until strictly inside (0, 1)
        let u = loop {
            let u = self.uniform.next_real();
            if u > 0.0 && u < 1.0 {
                break u;
            }
        };
        normal_cdf_inverse(u)
    }
}
