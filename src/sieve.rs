//! Prime cache computed in one pass by the sieve of Eratosthenes

use crate::sequence::MonotonicSequence;
use crate::traits::{passes_trial_division, CacheConfig, GrowthPolicy, PrimeCache};
use bitvec::bitvec;
use num_integer::Roots;
use tracing::debug;

/// A cache holding every prime up to a ceiling fixed at construction.
///
/// The cache never grows after construction, so it can be shared freely. Queries on values
/// above `ceiling * ceiling` fail with [Error::OutOfRange][crate::Error::OutOfRange].
#[derive(Debug, Clone)]
pub struct SieveCache {
    primes: MonotonicSequence,
    ceiling: u64,
}

impl SieveCache {
    pub fn new(ceiling: u64) -> Self {
        SieveCache {
            primes: sieve(ceiling),
            ceiling,
        }
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::new(config.sieve_ceiling)
    }

    /// All primes found by the sieve
    #[inline]
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }
}

impl Default for SieveCache {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}

/// Mark composites up to `ceiling` and collect the unmarked integers.
///
/// Each candidate is visited once: an unmarked one is a prime and gets its multiples marked,
/// a marked one is cleared as the scan moves past it. The marks are dropped at the end.
fn sieve(ceiling: u64) -> MonotonicSequence {
    let mut primes = MonotonicSequence::new();
    if ceiling < 2 {
        return primes;
    }

    let mut composite = bitvec![0; ceiling as usize + 1];
    for c in 2..=ceiling {
        let idx = c as usize;
        if composite[idx] {
            composite.set(idx, false);
            continue;
        }

        primes.append(c);
        // multiples below c * c were already marked by smaller primes
        if let Some(start) = c.checked_mul(c).filter(|&s| s <= ceiling) {
            for multi in (start..=ceiling).step_by(idx) {
                composite.set(multi as usize, true);
            }
        }
    }

    debug!(ceiling, found = primes.len(), "sieved primes");
    primes
}

impl PrimeCache for SieveCache {
    fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy::BatchSieve
    }

    fn highest_tested(&self) -> u64 {
        self.ceiling
    }

    fn count(&self) -> usize {
        self.primes.len()
    }

    fn load_prime(&mut self, p: u64) {
        if p <= self.ceiling && passes_trial_division(&self.primes, p) {
            self.primes.append(p);
        }
    }

    fn possible_factors(&self, v: u64) -> Vec<u64> {
        self.primes.elements_at_most(Roots::sqrt(&v)).to_vec()
    }

    fn contains(&self, p: u64) -> bool {
        self.primes.contains(p)
    }
}
