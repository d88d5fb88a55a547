//! Greatest common divisor strategies used to pick coprime witnesses.

use crate::error::{Error, Result};
use crate::traits::Gcd;
use num_integer::Integer;

/// Euclid's algorithm by repeated remainders
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclid;

impl Gcd for Euclid {
    fn gcd(&self, a: u64, b: u64) -> Result<u64> {
        if a == 0 && b == 0 {
            return Err(Error::ZeroGcd);
        }
        let (mut a, mut b) = (a, b);
        while b != 0 {
            (a, b) = (b, a % b);
        }
        Ok(a)
    }
}

/// Stein's binary gcd algorithm, as implemented for primitives by `num_integer`
#[derive(Debug, Clone, Copy, Default)]
pub struct Stein;

impl Gcd for Stein {
    #[inline]
    fn gcd(&self, a: u64, b: u64) -> Result<u64> {
        if a == 0 && b == 0 {
            return Err(Error::ZeroGcd);
        }
        Ok(Integer::gcd(&a, &b))
    }
}

/// Runtime selection of a [Gcd] strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GcdAlgorithm {
    Euclid,
    #[default]
    Stein,
}

impl Gcd for GcdAlgorithm {
    fn gcd(&self, a: u64, b: u64) -> Result<u64> {
        match self {
            GcdAlgorithm::Euclid => Euclid.gcd(a, b),
            GcdAlgorithm::Stein => Stein.gcd(a, b),
        }
    }
}
