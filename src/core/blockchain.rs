// The chain itself: an append-only, hash-linked sequence of locally sealed
// blocks. No proof-of-work and no consensus; sealing a block is immediate.

use crate::core::block::GENESIS_PREVIOUS_HASH;
use crate::core::{Block, Transaction};
use crate::error::{LedgerError, Result};
use crate::storage::LedgerPool;
use crate::utils::current_timestamp;
use log::info;

#[derive(Debug, Clone, Default)]
pub struct Blockchain {
    blocks: Vec<Block>,
}

impl Blockchain {
    pub fn new() -> Blockchain {
        Blockchain { blocks: Vec::new() }
    }

    /// Rebuild a chain from stored blocks, checking every link on the way.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Blockchain> {
        let mut chain = Blockchain::new();
        for block in blocks {
            chain.append_block(block)?;
        }
        Ok(chain)
    }

    /// Seal everything pending into a new block stamped with the current time
    /// and clear the pool. An empty pool yields an empty block.
    pub fn mine_block(&mut self, pool: &mut LedgerPool) -> Result<Block> {
        self.mine_block_at(pool, current_timestamp())
    }

    pub fn mine_block_at(&mut self, pool: &mut LedgerPool, timestamp: String) -> Result<Block> {
        self.mine_block_with(pool, timestamp, |_| Ok(()))
    }

    // This is the one sealing path. I build the next block from a snapshot of the
    // pool, hand it to `commit` (the ledger writes it to disk there), and only if
    // that succeeds do I append it and clear the pool. A failed commit leaves
    // both the chain and the pool exactly as they were.
    pub fn mine_block_with<F>(
        &mut self,
        pool: &mut LedgerPool,
        timestamp: String,
        commit: F,
    ) -> Result<Block>
    where
        F: FnOnce(&Block) -> Result<()>,
    {
        let block = self.prepare_block(pool.get_all(), timestamp);
        commit(&block)?;

        // append_block re-checks index, link and hash before the block goes in
        self.append_block(block.clone())?;
        pool.clear();

        info!(
            "Sealed block {} with {} transactions: {}",
            block.get_index(),
            block.get_transactions().len(),
            block.get_hash()
        );
        Ok(block)
    }

    /// The block that would be sealed next, without appending it.
    pub fn prepare_block(&self, transactions: Vec<Transaction>, timestamp: String) -> Block {
        Block::new_block(self.next_index(), timestamp, transactions, self.tip_hash())
    }

    /// Append an already sealed block after checking index, linkage and hash.
    pub fn append_block(&mut self, block: Block) -> Result<()> {
        let expected_index = self.next_index();
        if block.get_index() != expected_index {
            return Err(LedgerError::InvalidChain(format!(
                "expected block index {expected_index}, got {}",
                block.get_index()
            )));
        }
        let expected_previous = self.tip_hash();
        if block.get_previous_hash() != expected_previous {
            return Err(LedgerError::InvalidChain(format!(
                "block {} links to {} instead of {expected_previous}",
                block.get_index(),
                block.get_previous_hash()
            )));
        }
        if !block.verify_hash() {
            return Err(LedgerError::InvalidChain(format!(
                "block {} hash does not match its contents",
                block.get_index()
            )));
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Walk the whole chain and re-check every invariant.
    pub fn verify(&self) -> Result<()> {
        Blockchain::from_blocks(self.blocks.clone()).map(|_| ())
    }

    /// Hash of the last block, or the genesis marker when the chain is empty
    pub fn tip_hash(&self) -> String {
        self.blocks
            .last()
            .map(|block| block.get_hash().to_string())
            .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string())
    }

    fn next_index(&self) -> u64 {
        self.blocks.len() as u64 + 1
    }

    pub fn get_blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyPair, PrivateKey, PublicKey, TransactionFactory};

    fn sample_tx(amount: &str) -> Transaction {
        let keys = KeyPair::new(PublicKey { n: 3233, e: 17 }, PrivateKey { n: 3233, d: 2753 });
        TransactionFactory::create("alice", "bob", amount, "hi", keys.clone(), keys).unwrap()
    }

    #[test]
    fn test_genesis_block_links_to_zero() {
        let mut chain = Blockchain::new();
        let mut pool = LedgerPool::new();
        pool.add(sample_tx("10"));

        let block = chain.mine_block(&mut pool).unwrap();
        assert_eq!(block.get_index(), 1);
        assert_eq!(block.get_previous_hash(), "0");
        assert_eq!(block.get_transactions().len(), 1);
        assert!(pool.is_empty());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_blocks_link_to_previous_hash() {
        let mut chain = Blockchain::new();
        let mut pool = LedgerPool::new();
        for amount in ["1", "2", "3", "4"] {
            pool.add(sample_tx(amount));
            chain.mine_block(&mut pool).unwrap();
        }

        let blocks = chain.get_blocks();
        assert_eq!(blocks[0].get_previous_hash(), "0");
        for i in 1..blocks.len() {
            assert_eq!(blocks[i].get_previous_hash(), blocks[i - 1].get_hash());
            assert_eq!(blocks[i].get_index(), blocks[i - 1].get_index() + 1);
        }
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn test_mining_empty_pool() {
        let mut chain = Blockchain::new();
        let mut pool = LedgerPool::new();
        let block = chain.mine_block_at(&mut pool, "now".to_string()).unwrap();
        assert!(block.get_transactions().is_empty());
        assert_eq!(
            block.merkle_root(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            block.get_hash(),
            Block::calculate_hash(1, "now", &block.merkle_root(), "0")
        );
    }

    #[test]
    fn test_append_rejects_broken_link() {
        let mut source = Blockchain::new();
        let mut pool = LedgerPool::new();
        let first = source.mine_block_at(&mut pool, "a".to_string()).unwrap();
        let second = source.mine_block_at(&mut pool, "b".to_string()).unwrap();

        let mut chain = Blockchain::new();
        let err = chain.append_block(second.clone()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidChain(_)));

        chain.append_block(first).unwrap();
        chain.append_block(second).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_append_rejects_forged_link() {
        let mut chain = Blockchain::new();
        let mut pool = LedgerPool::new();
        chain.mine_block_at(&mut pool, "a".to_string()).unwrap();

        let forged = Block::new_block(2, "b".to_string(), vec![], "deadbeef".to_string());
        assert!(chain.append_block(forged).is_err());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_failed_commit_leaves_chain_and_pool() {
        let mut chain = Blockchain::new();
        let mut pool = LedgerPool::new();
        pool.add(sample_tx("7"));

        let err = chain
            .mine_block_with(&mut pool, "a".to_string(), |_| {
                Err(LedgerError::Database("disk full".to_string()))
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::Database(_)));
        assert!(chain.is_empty());
        assert_eq!(pool.len(), 1);

        let mut committed = None;
        let block = chain
            .mine_block_with(&mut pool, "b".to_string(), |block| {
                committed = Some(block.get_hash().to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(committed.as_deref(), Some(block.get_hash()));
        assert_eq!(block.get_index(), 1);
        assert_eq!(chain.len(), 1);
        assert!(pool.is_empty());
    }
}
