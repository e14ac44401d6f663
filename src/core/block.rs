use crate::core::{MerkleDigest, Transaction};
use crate::utils::sha256_hex;
use serde::{Deserialize, Serialize};

/// `previous_hash` of the first block in every chain
pub const GENESIS_PREVIOUS_HASH: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    index: u64, // 1-based position in the chain
    timestamp: String,
    transactions: Vec<Transaction>,
    previous_hash: String,
    hash: String,
}

impl Block {
    /// Seal `transactions` into a block, computing its hash from
    /// `index || timestamp || merkle root || previous hash`.
    pub fn new_block(
        index: u64,
        timestamp: String,
        transactions: Vec<Transaction>,
        previous_hash: String,
    ) -> Block {
        let merkle_root = MerkleDigest::root_of(&transactions);
        let hash = Self::calculate_hash(index, &timestamp, &merkle_root, &previous_hash);
        Block {
            index,
            timestamp,
            transactions,
            previous_hash,
            hash,
        }
    }

    pub fn calculate_hash(
        index: u64,
        timestamp: &str,
        merkle_root: &str,
        previous_hash: &str,
    ) -> String {
        sha256_hex(&format!("{index}{timestamp}{merkle_root}{previous_hash}"))
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn merkle_root(&self) -> String {
        MerkleDigest::root_of(&self.transactions)
    }

    /// Recompute the hash from the block's contents and compare.
    pub fn verify_hash(&self) -> bool {
        Self::calculate_hash(
            self.index,
            &self.timestamp,
            &self.merkle_root(),
            &self.previous_hash,
        ) == self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_block_hash() {
        let block = Block::new_block(
            1,
            "1/2/2026, 3:04:05 PM".to_string(),
            vec![],
            GENESIS_PREVIOUS_HASH.to_string(),
        );
        let empty_root = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(block.merkle_root(), empty_root);
        assert_eq!(
            block.get_hash(),
            sha256_hex(&format!("11/2/2026, 3:04:05 PM{empty_root}0"))
        );
        assert!(block.verify_hash());
    }

    #[test]
    fn test_tampering_breaks_hash() {
        let mut block = Block::new_block(1, "t".to_string(), vec![], "0".to_string());
        block.timestamp = "t2".to_string();
        assert!(!block.verify_hash());
    }
}
