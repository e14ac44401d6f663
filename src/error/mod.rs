//! Error handling for the ledger
//!
//! Every failure the cryptographic core or the ledger boundary can produce is a
//! variant of [`LedgerError`], so callers can decide whether to prompt again,
//! retry key generation, or abort.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Missing or malformed transaction fields; nothing was mutated
    InvalidInput(String),
    /// The freshly produced signature did not verify under the sender's key
    SignatureVerificationFailed,
    /// No prime was drawn from `[low, high]` within the attempt budget
    PrimeSearchExhausted { low: u64, high: u64, attempts: u32 },
    /// A bounded retry inside keypair generation ran out of attempts
    KeyGenerationExhausted(String),
    /// `a` has no inverse modulo `m` (they are not coprime)
    NoInverseExists { a: u64, m: u64 },
    /// A decrypted integer is not a Unicode scalar value
    Decoding(String),
    /// Hash linkage, index order or a recomputed hash does not hold
    InvalidChain(String),
    /// Database-related errors
    Database(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
    /// Configuration errors
    Config(String),
    /// A lock guarding ledger state was poisoned
    Lock(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            LedgerError::SignatureVerificationFailed => {
                write!(f, "Signature verification failed, transaction not added")
            }
            LedgerError::PrimeSearchExhausted {
                low,
                high,
                attempts,
            } => write!(
                f,
                "No prime found in [{low}, {high}] after {attempts} attempts"
            ),
            LedgerError::KeyGenerationExhausted(msg) => {
                write!(f, "Key generation exhausted: {msg}")
            }
            LedgerError::NoInverseExists { a, m } => {
                write!(f, "No modular inverse of {a} modulo {m}")
            }
            LedgerError::Decoding(msg) => write!(f, "Decoding error: {msg}"),
            LedgerError::InvalidChain(msg) => write!(f, "Invalid chain: {msg}"),
            LedgerError::Database(msg) => write!(f, "Database error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Lock(msg) => write!(f, "Lock error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<sled::Error> for LedgerError {
    fn from(err: sled::Error) -> Self {
        LedgerError::Database(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for LedgerError {
    fn from(err: bincode::error::EncodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for LedgerError {
    fn from(err: bincode::error::DecodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_search_display_names_range() {
        let err = LedgerError::PrimeSearchExhausted {
            low: 24,
            high: 28,
            attempts: 50,
        };
        assert_eq!(
            err.to_string(),
            "No prime found in [24, 28] after 50 attempts"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LedgerError = io.into();
        assert!(matches!(err, LedgerError::Io(msg) if msg.contains("missing")));
    }
}
