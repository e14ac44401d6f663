// The single entry point for mutating ledger state. The chain and the pending
// pool live behind one lock, so a transaction read out of the pool during
// mining is sealed into exactly one block.

use crate::config::{KeyGenSettings, GLOBAL_CONFIG};
use crate::core::{Block, Blockchain, KeyPair, KeyPairGenerator, Transaction, TransactionFactory};
use crate::error::{LedgerError, Result};
use crate::storage::{ChainStore, LedgerPool};
use crate::utils::current_timestamp;
use log::{error, info};
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct LedgerState {
    chain: Blockchain,
    pool: LedgerPool,
}

pub struct Ledger {
    state: RwLock<LedgerState>,
    generator: Mutex<KeyPairGenerator>,
    store: Option<ChainStore>,
}

impl Ledger {
    /// An in-memory ledger using the globally configured key settings
    pub fn new() -> Result<Ledger> {
        Ok(Self::with_generator(KeyPairGenerator::new(
            GLOBAL_CONFIG.get_keygen_settings(),
        )?))
    }

    pub fn with_settings(settings: KeyGenSettings) -> Result<Ledger> {
        Ok(Self::with_generator(KeyPairGenerator::new(settings)?))
    }

    pub fn with_generator(generator: KeyPairGenerator) -> Ledger {
        Ledger {
            state: RwLock::new(LedgerState::default()),
            generator: Mutex::new(generator),
            store: None,
        }
    }

    /// Open (or create) a persistent ledger at `path`. The stored chain is
    /// verified block by block before the ledger is handed out.
    pub fn open(path: &Path, generator: KeyPairGenerator) -> Result<Ledger> {
        let store = ChainStore::open(path)?;
        let chain = Blockchain::from_blocks(store.load_blocks()?)?;
        let pool = LedgerPool::from_transactions(store.load_pending()?);
        info!(
            "Opened ledger at {} with {} blocks and {} pending transactions",
            path.display(),
            chain.len(),
            pool.len()
        );
        Ok(Ledger {
            state: RwLock::new(LedgerState { chain, pool }),
            generator: Mutex::new(generator),
            store: Some(store),
        })
    }

    /// Mint fresh sender and receiver keypairs and submit the transaction.
    pub fn submit_transaction(
        &self,
        sender: &str,
        receiver: &str,
        amount: &str,
        message: &str,
    ) -> Result<Transaction> {
        TransactionFactory::validate(sender, receiver, amount)?;
        let (sender_keys, receiver_keys) = {
            let mut generator = self.lock_generator()?;
            (generator.generate()?, generator.generate()?)
        };
        self.submit_with_keys(sender, receiver, amount, message, sender_keys, receiver_keys)
    }

    /// Submit with caller-supplied keypairs. On any failure the pool is
    /// left untouched.
    pub fn submit_with_keys(
        &self,
        sender: &str,
        receiver: &str,
        amount: &str,
        message: &str,
        sender_key_pair: KeyPair,
        receiver_key_pair: KeyPair,
    ) -> Result<Transaction> {
        let tx = TransactionFactory::create(
            sender,
            receiver,
            amount,
            message,
            sender_key_pair,
            receiver_key_pair,
        )?;

        // I write to disk first and only then touch the in-memory pool, so a
        // failed write leaves the pool as it was.
        let mut state = self.write_state()?;
        if let Some(store) = &self.store {
            store.push_pending(&tx)?;
        }
        state.pool.add(tx.clone());
        info!(
            "Transaction {} -> {} added, {} pending",
            tx.get_sender(),
            tx.get_receiver(),
            state.pool.len()
        );
        Ok(tx)
    }

    pub fn list_pending(&self) -> Result<Vec<Transaction>> {
        Ok(self.read_state()?.pool.get_all())
    }

    /// Seal every pending transaction into a new block and clear the pool.
    pub fn mine(&self) -> Result<Block> {
        let mut state = self.write_state()?;
        let LedgerState { chain, pool } = &mut *state;

        // The store commit runs inside the sealing step; if it fails the chain
        // and the pool keep their previous contents.
        chain.mine_block_with(pool, current_timestamp(), |block| match &self.store {
            Some(store) => store.commit_block(block),
            None => Ok(()),
        })
    }

    pub fn get_chain(&self) -> Result<Vec<Block>> {
        Ok(self.read_state()?.chain.get_blocks().to_vec())
    }

    pub fn verify_chain(&self) -> Result<()> {
        self.read_state()?.chain.verify()
    }

    /// The chain in its interchange shape, pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        let state = self.read_state()?;
        Ok(serde_json::to_string_pretty(&ChainExport {
            chain: state.chain.get_blocks(),
        })?)
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>> {
        self.state.read().map_err(|_| {
            error!("Failed to acquire read lock on ledger state");
            LedgerError::Lock("ledger state".to_string())
        })
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>> {
        self.state.write().map_err(|_| {
            error!("Failed to acquire write lock on ledger state");
            LedgerError::Lock("ledger state".to_string())
        })
    }

    fn lock_generator(&self) -> Result<MutexGuard<'_, KeyPairGenerator>> {
        self.generator.lock().map_err(|_| {
            error!("Failed to acquire key generator lock");
            LedgerError::Lock("key generator".to_string())
        })
    }
}

#[derive(Serialize)]
struct ChainExport<'a> {
    chain: &'a [Block],
}
