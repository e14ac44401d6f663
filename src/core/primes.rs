//! Primality testing and bounded random prime sampling

use crate::error::{LedgerError, Result};
use rand::Rng;

/// Trial division up to `floor(sqrt(n))`. Nothing at or below 1 is prime.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i: u64 = 3;
    // i <= n / i  <=>  i*i <= n, without overflow
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Draw uniformly from `[low, high]` until a prime turns up, at most
/// `max_attempts` times.
pub fn random_prime<R: Rng>(
    rng: &mut R,
    low: u64,
    high: u64,
    max_attempts: u32,
) -> Result<u64> {
    if low > high {
        return Err(LedgerError::PrimeSearchExhausted {
            low,
            high,
            attempts: 0,
        });
    }
    for _ in 0..max_attempts {
        let candidate = rng.gen_range(low..=high);
        if is_prime(candidate) {
            return Ok(candidate);
        }
    }
    Err(LedgerError::PrimeSearchExhausted {
        low,
        high,
        attempts: max_attempts,
    })
}
