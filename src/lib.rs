//! # RSA Ledger - a toy public-key ledger
//!
//! A small textbook-RSA cryptosystem used to encrypt, sign and verify ledger
//! transactions, which are then sealed into hash-linked blocks.
//!
//! ## What's in here
//! - **Crypto engine**: gcd, square-and-multiply, modular inverse, trial-division
//!   primes and keypairs from two random primes in a small range
//! - **Per-character RSA**: every character is encrypted and signed on its own
//! - **Transactions**: `sender:receiver:amount:message` encrypted for the
//!   receiver, signed by the sender, self-checked before acceptance
//! - **Chain**: blocks hash `index || timestamp || digest || previous hash`,
//!   with a flat SHA-256 digest over the pending transactions
//! - **Ledger**: one lock around chain and pool, optional sled persistence
//!
//! ## Not secure
//! Primes come from `[100, 500]` by default and there is no padding. The same
//! character under the same key always encrypts to the same integer, which
//! leaks the plaintext's frequency structure. Use this to learn, never to
//! protect anything.
//!
//! ## Layout
//! - `core/`: arithmetic, primes, keys, cipher, signatures, transactions, blocks, chain
//! - `storage/`: pending pool and the sled chain store
//! - `ledger/`: the boundary a UI or CLI talks to
//! - `wallet/`: demo key tables for display
//! - `config/`, `error/`, `utils/`, `cli/`: the usual supporting pieces

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, KeyGenSettings, GLOBAL_CONFIG};
pub use crate::core::{
    canonical_payload, decrypt, encrypt, extract_message, gcd, is_prime, mod_inverse, mod_pow,
    random_prime, sign, verify, Block, Blockchain, KeyPair, KeyPairGenerator, MerkleDigest,
    PrivateKey, PublicKey, Transaction, TransactionFactory, GENESIS_PREVIOUS_HASH,
};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use storage::{ChainStore, LedgerPool};
pub use utils::{current_timestamp, sha256_digest, sha256_hex};
pub use wallet::{DemoKeyRow, DemoKeyTable};
