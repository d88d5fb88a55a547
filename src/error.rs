//! Error types for cache queries and primality tests.

use thiserror::Error;

/// Result type alias for cache and primality operations.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Primality is only defined for integers greater than one.
    #[error("invalid candidate {value}: primality is only defined for integers >= 2")]
    InvalidCandidate { value: u64 },

    /// The cache cannot certify the query because its watermark does not reach the
    /// square root of the value, and its growth policy does not allow extending it.
    #[error("{value} is out of range: needs primes up to {required}, cache tested up to {highest_tested}")]
    OutOfRange {
        value: u64,
        required: u64,
        highest_tested: u64,
    },

    /// gcd(0, 0) is undefined.
    #[error("gcd is undefined when both inputs are zero")]
    ZeroGcd,

    /// A witness that is a multiple of the candidate says nothing about its primality.
    #[error("invalid witness {witness} for {candidate}: it is a multiple of the candidate")]
    InvalidWitness { candidate: u64, witness: u64 },

    /// The residue sample space [2, n-2] is empty.
    #[error("no witness can be sampled for {candidate}: the sample space [2, n-2] is empty")]
    WitnessSpaceEmpty { candidate: u64 },
}
