// Sled-backed persistence for the chain and the pending pool, so the ledger
// survives between CLI invocations. Values are bincode records.

use crate::core::{Block, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::{decode_record, encode_record};
use sled::transaction::TransactionError;
use sled::{Db, Transactional, Tree};
use std::path::Path;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

const BLOCKS_TREE: &str = "blocks"; // block index (big-endian) -> Block
const PENDING_TREE: &str = "pending"; // insertion sequence (big-endian) -> Transaction

pub struct ChainStore {
    db: Db,
    blocks: Tree,
    pending: Tree,
    #[cfg(test)]
    fail_writes: AtomicBool,
}

impl ChainStore {
    pub fn open(path: &Path) -> Result<ChainStore> {
        // Every write flushes explicitly, so there is no background flusher
        // thread left holding the file lock after the store is dropped.
        let db = sled::Config::new()
            .path(path)
            .flush_every_ms(None)
            .open()
            .map_err(|e| LedgerError::Database(format!("Failed to open database: {e}")))?;
        let blocks = db
            .open_tree(BLOCKS_TREE)
            .map_err(|e| LedgerError::Database(format!("Failed to open blocks tree: {e}")))?;
        let pending = db
            .open_tree(PENDING_TREE)
            .map_err(|e| LedgerError::Database(format!("Failed to open pending tree: {e}")))?;
        Ok(ChainStore {
            db,
            blocks,
            pending,
            #[cfg(test)]
            fail_writes: AtomicBool::new(false),
        })
    }

    /// Make every later write fail with a database error until reset.
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[cfg(test)]
    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Database("writes disabled".to_string()));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_writable(&self) -> Result<()> {
        Ok(())
    }

    /// All stored blocks in index order
    pub fn load_blocks(&self) -> Result<Vec<Block>> {
        self.blocks
            .iter()
            .values()
            .map(|value| decode_record::<Block>(value?.as_ref()))
            .collect()
    }

    /// All pending transactions in submission order
    pub fn load_pending(&self) -> Result<Vec<Transaction>> {
        self.pending
            .iter()
            .values()
            .map(|value| decode_record::<Transaction>(value?.as_ref()))
            .collect()
    }

    pub fn push_pending(&self, tx: &Transaction) -> Result<()> {
        self.check_writable()?;
        let key = self.db.generate_id()?.to_be_bytes();
        self.pending.insert(key.as_slice(), encode_record(tx)?)?;
        self.db.flush()?;
        Ok(())
    }

    /// Store a sealed block and drop every pending entry in one transaction.
    pub fn commit_block(&self, block: &Block) -> Result<()> {
        self.check_writable()?;
        let key = block.get_index().to_be_bytes();
        let value = encode_record(block)?;
        let pending_keys = self
            .pending
            .iter()
            .keys()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        (&self.blocks, &self.pending)
            .transaction(|(tx_blocks, tx_pending)| {
                tx_blocks.insert(key.as_slice(), value.as_slice())?;
                for pending_key in &pending_keys {
                    tx_pending.remove(pending_key.clone())?;
                }
                Ok(())
            })
            .map_err(|e: TransactionError| {
                LedgerError::Database(format!("Failed to commit block: {e}"))
            })?;

        self.db.flush()?;
        Ok(())
    }
}
