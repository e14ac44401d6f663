//! Data storage and persistence
//!
//! The pending transaction pool and the sled database the ledger writes
//! through to.

pub mod chain_store;
pub mod ledger_pool;

pub use chain_store::ChainStore;
pub use ledger_pool::LedgerPool;
