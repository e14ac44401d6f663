//! The ledger boundary
//!
//! What a UI or the CLI talks to: submit transactions, look at what is pending,
//! mine, and read the chain.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::Ledger;
