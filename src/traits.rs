use crate::error::{Error, Result};
use crate::gcd::GcdAlgorithm;
use crate::sequence::MonotonicSequence;
use num_integer::Roots;
use rand::RngCore;
use std::fmt;
use std::iter::Sum;

/// How a [PrimeCache] extends its knowledge once constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Answers only up to a ceiling fixed at construction, without any computation
    FixedCeiling,
    /// Tests one candidate after another by trial division, on demand
    Incremental,
    /// Computes everything up to a ceiling in one sieve pass at construction
    BatchSieve,
}

/// How far an incremental cache grows to answer a query about `v`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthTarget {
    /// Test every candidate up to `v` itself, so that `v` ends up recorded when it's prime
    Candidate,
    /// Test only up to floor(sqrt(v)), the minimum needed for trial division
    SquareRoot,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// growth target of the incremental cache
    pub growth: GrowthTarget,

    /// ceiling of the batch sieve cache
    pub sieve_ceiling: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            growth: GrowthTarget::Candidate,
            sieve_ceiling: 1000,
        }
    }
}

impl CacheConfig {
    /// Create a configuration that grows the incremental cache as little as possible
    pub fn lazy() -> Self {
        Self {
            growth: GrowthTarget::SquareRoot,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrimalityTestConfig {
    /// number of Fermat rounds with random witnesses
    pub fermat_rounds: u32,

    /// run the (exact but O(n)) Wilson test only for candidates not above this limit
    pub wilson_limit: u64,

    /// gcd algorithm used to check witnesses for coprimality
    pub gcd: GcdAlgorithm,
}

impl Default for PrimalityTestConfig {
    fn default() -> Self {
        Self {
            fermat_rounds: 8,
            wilson_limit: 10_000,
            gcd: GcdAlgorithm::Stein,
        }
    }
}

impl PrimalityTestConfig {
    /// Create a configuration that runs only `rounds` Fermat tests
    pub fn fermat(rounds: u32) -> Self {
        Self {
            fermat_rounds: rounds,
            wilson_limit: 0,
            ..Self::default()
        }
    }
}

/// Reject candidates outside the domain of primality and return floor(sqrt(v))
#[inline]
pub(crate) fn candidate_root(v: u64) -> Result<u64> {
    if v < 2 {
        return Err(Error::InvalidCandidate { value: v });
    }
    Ok(Roots::sqrt(&v))
}

/// Whether `v` is a prime, given that `primes` holds every prime up to floor(sqrt(v))
#[inline]
pub(crate) fn passes_trial_division(primes: &MonotonicSequence, v: u64) -> bool {
    v >= 2
        && !primes
            .elements_at_most(Roots::sqrt(&v))
            .iter()
            .any(|p| v % p == 0)
}

/// A list of confirmed primes, complete up to a watermark ([PrimeCache::highest_tested]).
///
/// Every integer in `[2, highest_tested()]` has a known primality: the primes in this
/// range are all cached and nothing else is. Implementations differ only in how the
/// watermark is reached, see [GrowthPolicy].
pub trait PrimeCache {
    fn growth_policy(&self) -> GrowthPolicy;

    /// The largest integer whose primality is already known
    fn highest_tested(&self) -> u64;

    /// Number of primes cached so far
    fn count(&self) -> usize;

    /// Record `p` as a confirmed prime.
    ///
    /// Like [MonotonicSequence::append] this silently ignores a value that is not a new
    /// maximum. Values above [PrimeCache::highest_tested] are ignored too, since the cache
    /// cannot vouch for the gap below them, and so are values that are not primes.
    fn load_prime(&mut self, p: u64);

    /// Cached primes not larger than floor(sqrt(v)). These are the only primes that could
    /// divide `v` without `v` being that prime itself.
    fn possible_factors(&self, v: u64) -> Vec<u64>;

    /// Whether `p` is one of the cached primes
    fn contains(&self, p: u64) -> bool;

    /// Prepare the cache to answer a query about `v`, growing it if the policy allows.
    /// Returns the watermark afterwards.
    fn reserve(&self, _v: u64) -> u64 {
        self.highest_tested()
    }

    /// Return the smallest prime factor of `v`, or None if `v` is a prime
    fn first_factor(&self, v: u64) -> Result<Option<u64>> {
        let required = candidate_root(v)?;
        let highest_tested = self.reserve(v);
        if highest_tested < required {
            return Err(Error::OutOfRange {
                value: v,
                required,
                highest_tested,
            });
        }
        Ok(self.possible_factors(v).into_iter().find(|p| v % p == 0))
    }

    /// Return whether `v` is a prime, by trial division over [PrimeCache::possible_factors]
    fn is_prime(&self, v: u64) -> Result<bool> {
        Ok(self.first_factor(v)?.is_none())
    }
}

/// Result of a primality test on a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// Proven prime
    Prime,
    /// Survived this many independent rounds without being disproved
    ProbablePrime(u32),
    /// Proven composite, carrying the value that disproved it
    Composite(u64),
}

impl Primality {
    /// Check whether the result indicates that the number is (very) probably a prime
    #[inline]
    pub fn probably(self) -> bool {
        !matches!(self, Primality::Composite(_))
    }

    #[inline]
    pub fn is_composite(self) -> bool {
        matches!(self, Primality::Composite(_))
    }

    /// Combine the results of two tests on the same candidate. A composite verdict wins,
    /// then a proof of primality, otherwise the rounds are added up.
    pub fn combine(self, other: Primality) -> Primality {
        use Primality::*;
        match (self, other) {
            (Composite(w), _) | (_, Composite(w)) => Composite(w),
            (Prime, _) | (_, Prime) => Prime,
            (ProbablePrime(a), ProbablePrime(b)) => ProbablePrime(a.saturating_add(b)),
        }
    }
}

impl fmt::Display for Primality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primality::Prime => write!(f, "prime"),
            Primality::ProbablePrime(rounds) => {
                write!(f, "probable prime (passed {} rounds)", rounds)
            }
            Primality::Composite(witness) => write!(f, "composite (witness {})", witness),
        }
    }
}

/// Summing starts from `ProbablePrime(0)`, which is neutral under [Primality::combine]
impl Sum for Primality {
    fn sum<I: Iterator<Item = Primality>>(iter: I) -> Self {
        iter.fold(Primality::ProbablePrime(0), Primality::combine)
    }
}

/// A primality test that draws witnesses from the residues of the candidate
pub trait PrimeTest {
    /// Pick a witness for `candidate` from [2, candidate - 2]
    fn sample_witness(&self, candidate: u64, rng: &mut dyn RngCore) -> Result<u64>;

    /// Run one round of the test on `candidate`
    fn evaluate(&self, candidate: u64, rng: &mut dyn RngCore) -> Result<Primality>;
}

/// Greatest common divisor, as consumed by the primality tests
pub trait Gcd {
    /// Fails with [Error::ZeroGcd] if both inputs are zero
    fn gcd(&self, a: u64, b: u64) -> Result<u64>;

    fn is_coprime(&self, a: u64, b: u64) -> Result<bool> {
        Ok(self.gcd(a, b)? == 1)
    }
}
