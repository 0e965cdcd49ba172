//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации для движка;
//! - hash-derived seed для серии раундов.

pub mod rng;
pub mod rng_seed;

pub use rng::*;
pub use rng_seed::RngSeed;
