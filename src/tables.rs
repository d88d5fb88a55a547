//! Precomputed tables

/// All primes below 100. A cache seeded with this table is complete up to [SMALL_PRIMES_BOUND].
pub const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Every integer up to (and including) this value has its primality decided by [SMALL_PRIMES].
pub const SMALL_PRIMES_BOUND: u64 = 100;
