//! Host-supplied environment: the randomness oracle.
pub mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};
