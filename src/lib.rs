mod cache;
mod error;
mod gcd;
mod primality;
mod sequence;
mod sieve;
mod tables;
mod traits;

pub mod nt_funcs;

pub use cache::{BaselineCache, IncrementalCache, Primes};
pub use error::{Error, Result};
pub use gcd::{Euclid, GcdAlgorithm, Stein};
pub use primality::{FermatTest, WilsonTest};
pub use sequence::MonotonicSequence;
pub use sieve::SieveCache;
pub use traits::{
    CacheConfig, Gcd, GrowthPolicy, GrowthTarget, Primality, PrimalityTestConfig, PrimeCache,
    PrimeTest,
};

pub mod detail {
    pub use super::tables::{SMALL_PRIMES, SMALL_PRIMES_BOUND};
}
