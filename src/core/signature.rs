//! Per-character textbook RSA signatures
//!
//! Signing is decrypt-shaped (`c^d mod n` with the signer's private key) and
//! verification is encrypt-shaped (`s^e mod n` with the signer's public key).

use crate::core::arithmetic::mod_pow;
use crate::core::cipher::code_to_char;
use crate::core::keys::{PrivateKey, PublicKey};

pub fn sign(message: &str, private_key: &PrivateKey) -> Vec<u64> {
    message
        .chars()
        .map(|c| mod_pow(u64::from(c as u32), private_key.d, private_key.n))
        .collect()
}

/// True iff the signature reconstructs `message` exactly, length included.
pub fn verify(message: &str, signature: &[u64], public_key: &PublicKey) -> bool {
    let mut expected = message.chars();
    for &value in signature {
        let recovered = code_to_char(mod_pow(value, public_key.e, public_key.n));
        match (recovered, expected.next()) {
            (Some(got), Some(want)) if got == want => {}
            _ => return false,
        }
    }
    expected.next().is_none()
}
