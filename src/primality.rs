//! Fermat and Wilson primality tests sharing the [PrimeTest] contract

use crate::error::{Error, Result};
use crate::gcd::GcdAlgorithm;
use crate::traits::{candidate_root, Gcd, PrimeTest, Primality};
use num_modular::{ModularCoreOps, ModularUnaryOps};
use rand::{Rng, RngCore};
use tracing::trace;

/// Return (base ^ exp) % m by binary exponentiation
pub(crate) fn powm(base: u64, exp: u64, m: &u64) -> u64 {
    let mut result = 1u64 % m;
    let mut base = base % m;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.mulm(&base, m);
        }
        base = base.sqm(m);
        exp >>= 1;
    }
    result
}

/// Draw a residue uniformly from [2, candidate - 2]
fn sample_residue(candidate: u64, rng: &mut dyn RngCore) -> Result<u64> {
    candidate_root(candidate)?;
    if candidate < 4 {
        return Err(Error::WitnessSpaceEmpty { candidate });
    }
    Ok(rng.gen_range(2..=candidate - 2))
}

/// Fermat probable prime test: a prime n satisfies a^(n-1) = 1 (mod n) for every a coprime to n.
///
/// A witness sharing a factor with the candidate proves it composite right away, which is
/// how repeated rounds eventually catch Carmichael numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FermatTest<G: Gcd = GcdAlgorithm> {
    gcd: G,
}

impl FermatTest {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: Gcd> FermatTest<G> {
    #[inline]
    pub fn with_gcd(gcd: G) -> Self {
        FermatTest { gcd }
    }

    /// Run one round with the given witness. The witness is reduced modulo the candidate
    /// first, and fails with [Error::InvalidWitness] if nothing is left.
    pub fn check(&self, candidate: u64, witness: u64) -> Result<Primality> {
        candidate_root(candidate)?;
        let residue = witness % candidate;
        if residue == 0 {
            return Err(Error::InvalidWitness { candidate, witness });
        }
        let witness = residue;

        // 0 < witness < candidate, so a common factor is a proper divisor
        if !self.gcd.is_coprime(witness, candidate)? {
            trace!(candidate, witness, "witness shares a factor with the candidate");
            return Ok(Primality::Composite(witness));
        }

        if powm(witness, candidate - 1, &candidate) == 1 {
            Ok(Primality::ProbablePrime(1))
        } else {
            trace!(candidate, witness, "found fermat witness");
            Ok(Primality::Composite(witness))
        }
    }
}

impl<G: Gcd> PrimeTest for FermatTest<G> {
    fn sample_witness(&self, candidate: u64, rng: &mut dyn RngCore) -> Result<u64> {
        sample_residue(candidate, rng)
    }

    fn evaluate(&self, candidate: u64, rng: &mut dyn RngCore) -> Result<Primality> {
        candidate_root(candidate)?;
        if candidate < 4 {
            // 2 and 3 have no witness to draw
            return Ok(Primality::Prime);
        }
        let witness = self.sample_witness(candidate, rng)?;
        self.check(candidate, witness)
    }
}

/// Wilson's theorem: n > 1 is a prime iff (n-1)! = -1 (mod n).
///
/// The test is exact but takes O(n) multiplications, so it is only practical for small
/// candidates. A composite result carries the residue of the factorial as the witness.
#[derive(Debug, Clone, Copy, Default)]
pub struct WilsonTest;

impl WilsonTest {
    /// Return (n-1)! mod n
    pub fn factorial_residue(n: u64) -> Result<u64> {
        candidate_root(n)?;
        let mut acc: u64 = 1;
        for k in 2..n {
            acc = acc.mulm(&k, &n);
            if acc == 0 {
                break;
            }
        }
        Ok(acc)
    }
}

impl PrimeTest for WilsonTest {
    fn sample_witness(&self, candidate: u64, rng: &mut dyn RngCore) -> Result<u64> {
        sample_residue(candidate, rng)
    }

    fn evaluate(&self, candidate: u64, _rng: &mut dyn RngCore) -> Result<Primality> {
        let residue = Self::factorial_residue(candidate)?;
        if residue == candidate - 1 {
            Ok(Primality::Prime)
        } else {
            Ok(Primality::Composite(residue))
        }
    }
}
