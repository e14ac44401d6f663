//! Utility functions and helpers
//!
//! Hashing, wall-clock formatting and the binary record codec used by storage.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, sha256_digest, sha256_hex};
pub use serialization::{decode_record, encode_record};
