use crate::core::Transaction;

/// Pending transactions in submission order, waiting to be sealed.
///
/// The pool holds no lock of its own: the ledger guards it together with the
/// chain so that reading, sealing and clearing happen as one step.
#[derive(Debug, Clone, Default)]
pub struct LedgerPool {
    inner: Vec<Transaction>,
}

impl LedgerPool {
    pub fn new() -> LedgerPool {
        LedgerPool { inner: Vec::new() }
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> LedgerPool {
        LedgerPool {
            inner: transactions,
        }
    }

    pub fn add(&mut self, tx: Transaction) {
        self.inner.push(tx);
    }

    pub fn get_all(&self) -> Vec<Transaction> {
        self.inner.clone()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        self.inner.as_slice()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyPair, PrivateKey, PublicKey, TransactionFactory};

    fn tx(sender: &str) -> Transaction {
        let keys = KeyPair::new(PublicKey { n: 3233, e: 17 }, PrivateKey { n: 3233, d: 2753 });
        TransactionFactory::create(sender, "bob", "1", "", keys.clone(), keys).unwrap()
    }

    #[test]
    fn test_pool_keeps_submission_order() {
        let mut pool = LedgerPool::new();
        pool.add(tx("carol"));
        pool.add(tx("alice"));
        pool.add(tx("bob"));
        let senders: Vec<_> = pool
            .as_slice()
            .iter()
            .map(|t| t.get_sender().to_string())
            .collect();
        assert_eq!(senders, ["carol", "alice", "bob"]);
    }

    #[test]
    fn test_get_all_copies_until_cleared() {
        let mut pool = LedgerPool::new();
        pool.add(tx("alice"));
        pool.add(tx("dave"));
        let snapshot = pool.get_all();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(pool.len(), 2);

        pool.clear();
        assert!(pool.is_empty());
        assert!(pool.get_all().is_empty());
    }
}
