//! RNG oracle for reproducible combat rolls.
//!
//! The engine never owns ambient randomness. Every roll (currently only the
//! critical-strike check) derives a seed from the engine seed, a monotonically
//! increasing roll nonce and the rolling character, then asks the injected
//! oracle for a value. Given the same seed and the same sequence of pipeline
//! calls, a fight replays identically.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    ///
    /// Uses the top 24 bits so the result is exactly representable as `f32`
    /// and never rounds up to `1.0`.
    fn roll_unit(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: the caller supplies the state as the seed for every draw, which
/// keeps the oracle shareable behind an `Arc` without interior mutability.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Roll contexts, so two independent rolls made for the same character at the
/// same nonce never share a seed.
pub mod context {
    /// Critical strike check in `attack_target`.
    pub const CRIT: u32 = 0;
}

/// Compute a deterministic seed from the engine seed and roll coordinates.
///
/// * `engine_seed` - seed fixed when the engine is created
/// * `nonce` - roll counter, incremented by the engine after every roll
/// * `character` - raw id of the rolling character
/// * `context` - one of the [`context`] constants
pub fn compute_seed(engine_seed: u64, nonce: u64, character: u32, context: u32) -> u64 {
    let mut hash = engine_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (character as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix64-style avalanche.
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
