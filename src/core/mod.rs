//! Core ledger functionality
//!
//! The cryptographic engine (modular arithmetic, primes, keypairs, per-character
//! textbook RSA encryption and signatures) and the block-sealing logic that
//! binds transactions into a hash-linked chain.

pub mod arithmetic;
pub mod block;
pub mod blockchain;
pub mod cipher;
pub mod keys;
pub mod merkle;
pub mod primes;
pub mod signature;
pub mod transaction;

pub use arithmetic::{gcd, mod_inverse, mod_pow};
pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use blockchain::Blockchain;
pub use cipher::{decrypt, encrypt};
pub use keys::{KeyPair, KeyPairGenerator, PrivateKey, PublicKey};
pub use merkle::MerkleDigest;
pub use primes::{is_prime, random_prime};
pub use signature::{sign, verify};
pub use transaction::{canonical_payload, extract_message, Transaction, TransactionFactory};
