// Textbook RSA key material built from two small random primes.
// Keys are ephemeral: a fresh pair is minted per transaction and never stored
// as an identity.

use crate::config::KeyGenSettings;
use crate::core::arithmetic::{gcd, mod_inverse};
use crate::core::primes::random_prime;
use crate::error::{LedgerError, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct PublicKey {
    pub n: u64,
    pub e: u64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct PrivateKey {
    pub n: u64,
    pub d: u64,
}

impl PublicKey {
    /// Whether every character of `message` is below the modulus, i.e. the
    /// per-character encryption can be inverted.
    pub fn can_encode(&self, message: &str) -> bool {
        message.chars().all(|c| u64::from(c as u32) < self.n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl KeyPair {
    pub fn new(public_key: PublicKey, private_key: PrivateKey) -> KeyPair {
        KeyPair {
            public_key,
            private_key,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn modulus(&self) -> u64 {
        self.public_key.n
    }
}

/// Mints keypairs with `n = p*q` for distinct primes from the configured range.
pub struct KeyPairGenerator {
    settings: KeyGenSettings,
    rng: StdRng,
}

impl KeyPairGenerator {
    pub fn new(settings: KeyGenSettings) -> Result<KeyPairGenerator> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Generator with a caller-supplied RNG, e.g. a seeded one for tests.
    pub fn with_rng(settings: KeyGenSettings, rng: StdRng) -> Result<KeyPairGenerator> {
        settings.validate()?;
        Ok(KeyPairGenerator { settings, rng })
    }

    pub fn settings(&self) -> &KeyGenSettings {
        &self.settings
    }

    pub fn generate(&mut self) -> Result<KeyPair> {
        let KeyGenSettings {
            prime_low,
            prime_high,
            max_prime_attempts,
            max_keygen_attempts,
        } = self.settings;

        let p = random_prime(&mut self.rng, prime_low, prime_high, max_prime_attempts)?;

        let mut q = None;
        for _ in 0..max_keygen_attempts {
            let candidate =
                random_prime(&mut self.rng, prime_low, prime_high, max_prime_attempts)?;
            if candidate != p {
                q = Some(candidate);
                break;
            }
        }
        let q = q.ok_or_else(|| {
            LedgerError::KeyGenerationExhausted(format!(
                "no prime distinct from {p} in [{prime_low}, {prime_high}] after {max_keygen_attempts} attempts"
            ))
        })?;

        let n = p * q;
        let phi = (p - 1) * (q - 1);
        // e is drawn from [2, phi - 1), which is empty below 4
        if phi < 4 {
            return Err(LedgerError::KeyGenerationExhausted(format!(
                "totient {phi} of {p} * {q} leaves no room for a public exponent"
            )));
        }

        let mut e = None;
        for _ in 0..max_keygen_attempts {
            let candidate = self.rng.gen_range(2..phi - 1);
            if gcd(candidate, phi) == 1 {
                e = Some(candidate);
                break;
            }
        }
        let e = e.ok_or_else(|| {
            LedgerError::KeyGenerationExhausted(format!(
                "no exponent coprime with {phi} after {max_keygen_attempts} attempts"
            ))
        })?;

        let d = mod_inverse(e, phi)?;
        debug!("Generated keypair with modulus {n} (p = {p}, q = {q})");

        Ok(KeyPair::new(PublicKey { n, e }, PrivateKey { n, d }))
    }
}
