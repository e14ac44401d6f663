//! Modular arithmetic over `u64`
//!
//! Products are taken in `u128`, so every `u64` modulus is safe from overflow.

use crate::error::{LedgerError, Result};

/// Greatest common divisor (Euclid). `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// `base^exponent mod modulus` by square-and-multiply.
///
/// Returns 0 when `modulus == 1` and `1 mod modulus` when `exponent == 0`.
/// A zero modulus has no residues; it is treated like 1 and yields 0.
pub fn mod_pow(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    if modulus <= 1 {
        return 0;
    }
    let m = u128::from(modulus);
    let mut result: u128 = 1;
    let mut base = u128::from(base) % m;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % m;
        }
        exponent >>= 1;
        base = base * base % m;
    }

    // result < modulus, so the narrowing is lossless
    result as u64
}

/// The unique `x` in `[0, m)` with `a*x ≡ 1 (mod m)`, by extended Euclid.
pub fn mod_inverse(a: u64, m: u64) -> Result<u64> {
    if m == 0 || gcd(a % m, m) != 1 {
        return Err(LedgerError::NoInverseExists { a, m });
    }
    if m == 1 {
        return Ok(0);
    }

    let (mut old_r, mut r) = (i128::from(a % m), i128::from(m));
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    let inverse = old_s.rem_euclid(i128::from(m));
    Ok(inverse as u64)
}
