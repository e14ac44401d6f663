//! Per-character textbook RSA encryption
//!
//! Every character is its own RSA block: `c -> c^e mod n`. There is no padding
//! and no chaining, so the same character under the same key always yields the
//! same integer and the ciphertext leaks the plaintext's frequency structure.
//! This is NOT confidentiality-preserving. Characters whose code point is not
//! below `n` wrap around and cannot be recovered.

use crate::core::arithmetic::mod_pow;
use crate::core::keys::{PrivateKey, PublicKey};
use crate::error::{LedgerError, Result};

/// One ciphertext integer per input character
pub fn encrypt(message: &str, public_key: &PublicKey) -> Vec<u64> {
    message
        .chars()
        .map(|c| mod_pow(u64::from(c as u32), public_key.e, public_key.n))
        .collect()
}

pub fn decrypt(ciphertext: &[u64], private_key: &PrivateKey) -> Result<String> {
    ciphertext
        .iter()
        .map(|&value| {
            let code = mod_pow(value, private_key.d, private_key.n);
            code_to_char(code).ok_or_else(|| {
                LedgerError::Decoding(format!("{code} is not a valid character code"))
            })
        })
        .collect()
}

pub(crate) fn code_to_char(code: u64) -> Option<char> {
    u32::try_from(code).ok().and_then(char::from_u32)
}
