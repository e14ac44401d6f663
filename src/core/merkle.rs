use crate::core::Transaction;
use crate::utils::sha256_hex;

/// Aggregate digest over a batch of transactions.
///
/// Despite the name this is a flat digest, not a binary Merkle tree: every
/// transaction contributes `sender + receiver + amount + ciphertext` (the
/// ciphertext as comma-joined integers), the contributions are concatenated in
/// pool order, and the result is hashed once with SHA-256. It is used only as
/// an input to the block hash, so there are no inclusion proofs.
pub struct MerkleDigest;

impl MerkleDigest {
    /// Lowercase hex digest; an empty batch hashes the empty string.
    pub fn root_of(transactions: &[Transaction]) -> String {
        let concatenated: String = transactions
            .iter()
            .map(|tx| {
                format!(
                    "{}{}{}{}",
                    tx.get_sender(),
                    tx.get_receiver(),
                    tx.get_amount(),
                    tx.ciphertext_repr()
                )
            })
            .collect();
        sha256_hex(&concatenated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyPair, PrivateKey, PublicKey, TransactionFactory};

    fn keys() -> KeyPair {
        KeyPair::new(PublicKey { n: 3233, e: 17 }, PrivateKey { n: 3233, d: 2753 })
    }

    fn tx(sender: &str, receiver: &str, amount: &str, message: &str) -> Transaction {
        TransactionFactory::create(sender, receiver, amount, message, keys(), keys()).unwrap()
    }

    #[test]
    fn test_empty_batch_hashes_empty_string() {
        assert_eq!(
            MerkleDigest::root_of(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_is_flat_concatenation() {
        let first = tx("alice", "bob", "10", "hi");
        let second = tx("bob", "carol", "3", "");
        let expected = sha256_hex(&format!(
            "alicebob10{}bobcarol3{}",
            first.ciphertext_repr(),
            second.ciphertext_repr()
        ));
        assert_eq!(MerkleDigest::root_of(&[first, second]), expected);
    }

    #[test]
    fn test_digest_depends_on_order() {
        let first = tx("alice", "bob", "10", "hi");
        let second = tx("bob", "carol", "3", "yo");
        assert_ne!(
            MerkleDigest::root_of(&[first.clone(), second.clone()]),
            MerkleDigest::root_of(&[second, first])
        );
    }
}
