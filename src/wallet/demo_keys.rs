// Display-only key material. A fresh keypair is minted for every party shown,
// exactly like a key table that is re-rendered from scratch; none of these
// keys take part in encrypting, signing or verifying anything.

use crate::core::{KeyPairGenerator, Transaction};
use crate::error::Result;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoKeyRow {
    pub party: String,
    pub modulus: u64,
    pub private_exponent: u64,
}

#[derive(Debug, Clone, Default)]
pub struct DemoKeyTable {
    rows: Vec<DemoKeyRow>,
}

impl DemoKeyTable {
    /// One row for the sender and one for the receiver of every transaction,
    /// in order, each with a newly generated keypair.
    pub fn materialize(
        transactions: &[Transaction],
        generator: &mut KeyPairGenerator,
    ) -> Result<DemoKeyTable> {
        let mut rows = Vec::with_capacity(transactions.len() * 2);
        for tx in transactions {
            for party in [tx.get_sender(), tx.get_receiver()] {
                let pair = generator.generate()?;
                rows.push(DemoKeyRow {
                    party: party.to_string(),
                    modulus: pair.public_key().n,
                    private_exponent: pair.private_key().d,
                });
            }
        }
        Ok(DemoKeyTable { rows })
    }

    pub fn get_rows(&self) -> &[DemoKeyRow] {
        self.rows.as_slice()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for DemoKeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16} {:>12} {:>12}", "Party", "n", "d")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<16} {:>12} {:>12}",
                row.party, row.modulus, row.private_exponent
            )?;
        }
        Ok(())
    }
}
