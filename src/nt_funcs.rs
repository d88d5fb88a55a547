//! Standalone functions over the caches and primality tests

use crate::error::Result;
use crate::gcd::Stein;
use crate::primality::{FermatTest, WilsonTest};
use crate::traits::{candidate_root, Gcd, PrimalityTestConfig, Primality, PrimeCache, PrimeTest};
use rand::{thread_rng, RngCore};
use tracing::trace;

/// Return whether `n` is a prime, using the given cache for trial division
#[inline]
pub fn is_prime<C: PrimeCache + ?Sized>(cache: &C, n: u64) -> Result<bool> {
    cache.is_prime(n)
}

/// Return the smallest prime factor of `n`, or None if `n` is a prime
#[inline]
pub fn first_factor<C: PrimeCache + ?Sized>(cache: &C, n: u64) -> Result<Option<u64>> {
    cache.first_factor(n)
}

/// Find a divisor by trying every integer from 2 up to floor(sqrt(n)) (and up to `limit` if given),
/// without any prime cache. Returns the first one that divides `n`.
pub fn first_divisor(n: u64, limit: Option<u64>) -> Result<Option<u64>> {
    let root = candidate_root(n)?;
    let bound = limit.map_or(root, |l| l.min(root));
    Ok((2..=bound).find(|d| n % d == 0))
}

/// Test `n` with `rounds` Fermat rounds using thread-local randomness. Small candidates are
/// decided exactly by Wilson's theorem, see [PrimalityTestConfig::wilson_limit].
pub fn evaluate_probabilistic(n: u64, rounds: u32) -> Result<Primality> {
    let config = PrimalityTestConfig {
        fermat_rounds: rounds,
        ..PrimalityTestConfig::default()
    };
    evaluate_with(n, config, &mut thread_rng())
}

/// Run the tests selected by `config` on `n`.
///
/// Fermat rounds stop at the first composite verdict, otherwise their round counts are added up.
pub fn evaluate_with(
    n: u64,
    config: PrimalityTestConfig,
    rng: &mut dyn RngCore,
) -> Result<Primality> {
    candidate_root(n)?;
    if n <= config.wilson_limit {
        return WilsonTest.evaluate(n, rng);
    }

    let fermat = FermatTest::with_gcd(config.gcd);
    let mut result = Primality::ProbablePrime(0);
    for round in 0..config.fermat_rounds {
        result = result.combine(fermat.evaluate(n, rng)?);
        if !matches!(result, Primality::ProbablePrime(_)) {
            trace!(n, round, ?result, "stopped fermat rounds early");
            break;
        }
    }
    Ok(result)
}

/// Greatest common divisor, fails if both inputs are zero
#[inline]
pub fn gcd(a: u64, b: u64) -> Result<u64> {
    Stein.gcd(a, b)
}

#[inline]
pub fn is_coprime(a: u64, b: u64) -> Result<bool> {
    Stein.is_coprime(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{BaselineCache, IncrementalCache};
    use crate::error::Error;
    use crate::sieve::SieveCache;

    #[test]
    fn first_divisor_test() {
        assert_eq!(first_divisor(2, None), Ok(None));
        assert_eq!(first_divisor(97, None), Ok(None));
        assert_eq!(first_divisor(91, None), Ok(Some(7)));
        assert_eq!(first_divisor(91, Some(5)), Ok(None));
        assert_eq!(first_divisor(123456789, None), Ok(Some(3)));
        assert_eq!(first_divisor(1, None), Err(Error::InvalidCandidate { value: 1 }));
    }

    #[test]
    fn first_factor_test() {
        let caches: [Box<dyn PrimeCache>; 3] = [
            Box::new(BaselineCache::new()),
            Box::new(IncrementalCache::new()),
            Box::new(SieveCache::new(200)),
        ];
        for cache in caches.iter() {
            assert_eq!(first_factor(cache.as_ref(), 2), Ok(None));
            assert_eq!(first_factor(cache.as_ref(), 4), Ok(Some(2)));
            assert_eq!(first_factor(cache.as_ref(), 3 * 37 * 89), Ok(Some(3)));
            assert_eq!(first_factor(cache.as_ref(), 89 * 97), Ok(Some(89)));
            assert_eq!(is_prime(cache.as_ref(), 9973), Ok(true));
            assert_eq!(is_prime(cache.as_ref(), 0), Err(Error::InvalidCandidate { value: 0 }));
        }
    }

    #[test]
    fn evaluate_probabilistic_test() {
        assert_eq!(evaluate_probabilistic(5, 4), Ok(Primality::Prime));
        assert_eq!(evaluate_probabilistic(6, 4), Ok(Primality::Composite(0)));
        assert_eq!(evaluate_probabilistic(561, 4), Ok(Primality::Composite(0)));
        assert_eq!(evaluate_probabilistic(1, 4), Err(Error::InvalidCandidate { value: 1 }));

        // 1000003 is a prime beyond the wilson limit
        assert_eq!(evaluate_probabilistic(1_000_003, 5), Ok(Primality::ProbablePrime(5)));
        assert_eq!(evaluate_probabilistic(1_000_003, 0), Ok(Primality::ProbablePrime(0)));
        // 1000001 = 101 * 9901, only 1% of the bases are fermat liars
        assert!(evaluate_probabilistic(1_000_001, 20).unwrap().is_composite());
    }

    #[test]
    fn evaluate_with_test() {
        let mut rng = thread_rng();
        let config = PrimalityTestConfig::fermat(3);
        assert_eq!(evaluate_with(2, config, &mut rng), Ok(Primality::Prime));
        assert_eq!(evaluate_with(97, config, &mut rng), Ok(Primality::ProbablePrime(3)));
        // 91 = 7 * 13 has 34 fermat liars among its 88 sampled bases
        let result = evaluate_with(91, PrimalityTestConfig::fermat(60), &mut rng).unwrap();
        assert!(result.is_composite());
        assert!(evaluate_with(4, config, &mut rng).unwrap().is_composite());
    }

    #[test]
    fn gcd_test() {
        assert_eq!(gcd(12, 18), Ok(6));
        assert_eq!(gcd(0, 0), Err(Error::ZeroGcd));
        assert_eq!(is_coprime(35, 64), Ok(true));
    }
}
