//! Prime caches answering by trial division over a list of known primes.
//!
//! [BaselineCache] only knows the primes below 100. [IncrementalCache] starts from the same
//! table and extends it one candidate at a time whenever a query needs more primes.

use crate::error::Result;
use crate::sequence::MonotonicSequence;
use crate::tables::{SMALL_PRIMES, SMALL_PRIMES_BOUND};
use crate::traits::{
    candidate_root, passes_trial_division, CacheConfig, GrowthPolicy, GrowthTarget, PrimeCache,
};
use num_integer::Roots;
use parking_lot::Mutex;
use tracing::debug;

/// A cache holding the hard-coded primes below 100. It never computes anything, so values whose
/// square root exceeds 100 are out of its range.
#[derive(Debug, Clone)]
pub struct BaselineCache {
    primes: MonotonicSequence,
}

impl BaselineCache {
    #[inline]
    pub fn new() -> Self {
        BaselineCache {
            primes: SMALL_PRIMES.iter().copied().collect(),
        }
    }
}

impl Default for BaselineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimeCache for BaselineCache {
    fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy::FixedCeiling
    }

    fn highest_tested(&self) -> u64 {
        SMALL_PRIMES_BOUND
    }

    fn count(&self) -> usize {
        self.primes.len()
    }

    fn load_prime(&mut self, p: u64) {
        if p <= SMALL_PRIMES_BOUND && passes_trial_division(&self.primes, p) {
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

/// The state guarded by the lock of [IncrementalCache]. The list is always complete up to
/// `watermark`, both are only ever changed together.
#[derive(Debug)]
struct TrialState {
    primes: MonotonicSequence,
    watermark: u64,
}

impl TrialState {
    /// Move the watermark to the next candidate and return it
    #[inline]
    fn advance(&mut self) -> u64 {
        self.watermark += 1;
        self.watermark
    }

    fn load_prime(&mut self, p: u64) {
        if p <= self.watermark && passes_trial_division(&self.primes, p) {
            self.primes.append(p);
        }
    }

    /// Test the integer right above the watermark, by trial division with the primes known so far.
    /// Since sqrt(watermark + 1) <= watermark, all the required factors are already in the list.
    fn test_next(&mut self) -> bool {
        let candidate = self.advance();
        let is_prime = passes_trial_division(&self.primes, candidate);
        if is_prime {
            self.primes.append(candidate);
        }
        is_prime
    }

    /// Test candidates until the watermark reaches `target`, return the number of primes found
    fn grow_to(&mut self, target: u64) -> usize {
        let mut found = 0;
        while self.watermark < target {
            if self.test_next() {
                found += 1;
            }
        }
        found
    }
}

/// A cache that grows lazily by trial division. Each query only tests the candidates it needs,
/// and every later query reuses that work.
///
/// The cache can be shared between threads: growth and the reads following it are
/// serialized by an internal lock.
#[derive(Debug)]
pub struct IncrementalCache {
    state: Mutex<TrialState>,
    growth: GrowthTarget,
}

impl IncrementalCache {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        let state = TrialState {
            primes: SMALL_PRIMES.iter().copied().collect(),
            watermark: SMALL_PRIMES_BOUND,
        };
        IncrementalCache {
            state: Mutex::new(state),
            growth: config.growth,
        }
    }

    /// Test the next untested integer and return whether it's a prime
    pub fn test_next(&self) -> bool {
        self.state.lock().test_next()
    }

    /// Copy of all primes cached so far
    pub fn snapshot(&self) -> Vec<u64> {
        self.state.lock().primes.to_vec()
    }

    /// Iterate over all primes in order, extending the cache whenever the iteration runs past it
    pub fn primes(&self) -> Primes<'_> {
        Primes {
            cache: self,
            idx: 0,
        }
    }
}

impl Default for IncrementalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimeCache for IncrementalCache {
    fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy::Incremental
    }

    fn highest_tested(&self) -> u64 {
        self.state.lock().watermark
    }

    fn count(&self) -> usize {
        self.state.lock().primes.len()
    }

    fn load_prime(&mut self, p: u64) {
        self.state.get_mut().load_prime(p)
    }

    fn possible_factors(&self, v: u64) -> Vec<u64> {
        self.state
            .lock()
            .primes
            .elements_at_most(Roots::sqrt(&v))
            .to_vec()
    }

    fn contains(&self, p: u64) -> bool {
        self.state.lock().primes.contains(p)
    }

    fn reserve(&self, v: u64) -> u64 {
        let target = match self.growth {
            GrowthTarget::Candidate => v,
            GrowthTarget::SquareRoot => Roots::sqrt(&v),
        };

        let mut state = self.state.lock();
        if state.watermark < target {
            let from = state.watermark;
            let added = state.grow_to(target);
            debug!(from, to = state.watermark, added, "extended prime cache by trial division");
        }
        state.watermark
    }

    fn first_factor(&self, v: u64) -> Result<Option<u64>> {
        // growth always reaches the square root, so only the candidate check can fail
        let root = candidate_root(v)?;
        self.reserve(v);
        let state = self.state.lock();
        Ok(state
            .primes
            .elements_at_most(root)
            .iter()
            .copied()
            .find(|p| v % p == 0))
    }
}

/// Iterator over the primes of an [IncrementalCache], see [IncrementalCache::primes]
pub struct Primes<'a> {
    cache: &'a IncrementalCache,
    idx: usize,
}

impl<'a> Primes<'a> {
    /// Number of primes produced so far
    #[inline]
    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl<'a> Iterator for Primes<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let mut state = self.cache.state.lock();
        while state.primes.len() <= self.idx {
            if state.watermark == u64::MAX {
                return None;
            }
            state.test_next();
        }
        let p = state.primes[self.idx];
        self.idx += 1;
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const PRIME50: [u64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

    #[test]
    fn baseline_test() {
        let cache = BaselineCache::new();
        assert_eq!(cache.count(), 25);
        assert_eq!(cache.highest_tested(), 100);
        assert_eq!(cache.growth_policy(), GrowthPolicy::FixedCeiling);
        for x in 2..=100 {
            assert_eq!(cache.is_prime(x).unwrap(), SMALL_PRIMES.contains(&x), "{}", x);
        }
        assert!(cache.is_prime(10_193).unwrap()); // sqrt is 100
        assert_eq!(cache.first_factor(97 * 101), Ok(Some(97)));
        assert_eq!(
            cache.is_prime(101 * 101),
            Err(Error::OutOfRange {
                value: 10_201,
                required: 101,
                highest_tested: 100
            })
        );
    }

    #[test]
    fn baseline_load_prime_test() {
        let mut cache = BaselineCache::new();
        cache.load_prime(97);
        cache.load_prime(101);
        cache.load_prime(2);
        cache.load_prime(99); // composite below the watermark
        assert_eq!(cache.count(), 25);
        assert!(!cache.contains(101));
        assert!(!cache.contains(99));
    }

    #[test]
    fn possible_factors_test() {
        let cache = BaselineCache::new();
        assert!(cache.possible_factors(2).is_empty());
        assert!(cache.possible_factors(3).is_empty());
        assert_eq!(cache.possible_factors(4), vec![2]);
        assert_eq!(cache.possible_factors(50), vec![2, 3, 5, 7]);
        assert_eq!(cache.possible_factors(2209), PRIME50);
    }

    #[test]
    fn advance_test() {
        let cache = IncrementalCache::new();
        let mut state = cache.state.lock();
        assert_eq!(state.advance(), 101);
        assert_eq!(state.advance(), 102);
        assert!(state.test_next()); // 103
        assert!(!state.test_next()); // 104
        assert_eq!(state.watermark, 104);
        assert_eq!(state.primes.max(), Some(103));
    }

    #[test]
    fn incremental_one_step_test() {
        let cache = IncrementalCache::new();
        assert_eq!(cache.highest_tested(), 100);
        assert_eq!(cache.is_prime(101), Ok(true));
        assert_eq!(cache.highest_tested(), 101);
        assert_eq!(cache.count(), 26);
        assert!(cache.contains(101));
    }

    #[test]
    fn incremental_idempotent_test() {
        let cache = IncrementalCache::new();
        assert_eq!(cache.is_prime(1009), Ok(true));
        let (watermark, count) = (cache.highest_tested(), cache.count());
        assert_eq!(cache.is_prime(1009), Ok(true));
        assert_eq!(cache.highest_tested(), watermark);
        assert_eq!(cache.count(), count);

        // smaller queries never grow the cache
        assert_eq!(cache.first_factor(1001), Ok(Some(7)));
        assert_eq!(cache.highest_tested(), watermark);
    }

    #[test]
    fn incremental_square_root_growth_test() {
        let cache = IncrementalCache::with_config(CacheConfig::lazy());
        assert_eq!(cache.is_prime(101), Ok(true));
        assert_eq!(cache.highest_tested(), 100);

        // 10403 = 101 * 103 needs 101 in the list
        assert_eq!(cache.first_factor(10_403), Ok(Some(101)));
        assert_eq!(cache.highest_tested(), 101);
        assert!(!cache.contains(10_403));
    }

    #[test]
    fn incremental_load_prime_test() {
        let mut cache = IncrementalCache::new();
        cache.load_prime(1009); // above the watermark
        cache.load_prime(89); // already known
        cache.load_prime(100); // not a prime
        assert_eq!(cache.count(), 25);
        assert!(!cache.contains(100));
        assert_eq!(cache.is_prime(1009), Ok(true));
    }

    #[test]
    fn primes_iter_test() {
        let cache = IncrementalCache::new();
        let mut iter = cache.primes();
        let first: Vec<u64> = iter.by_ref().take(15).collect();
        assert_eq!(first, PRIME50);
        assert_eq!(iter.idx(), 15);

        // the 200th prime is 1223
        assert_eq!(cache.primes().nth(199), Some(1223));
        assert_eq!(cache.highest_tested(), 1223);
        assert_eq!(cache.count(), 200);
    }

    #[test]
    fn shared_growth_test() {
        let cache = IncrementalCache::new();
        std::thread::scope(|s| {
            for t in 0..4u64 {
                let cache = &cache;
                s.spawn(move || {
                    for v in (1000 + t..3000).step_by(4) {
                        cache.is_prime(v).unwrap();
                    }
                });
            }
        });

        let primes = cache.snapshot();
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(primes.len(), 430); // pi(2999)
        assert_eq!(cache.highest_tested(), 2999);
    }
}
