// A ledger transaction: the canonical payload encrypted for the receiver and
// signed by the sender, together with both (ephemeral) keypairs.

use crate::core::cipher::{decrypt, encrypt};
use crate::core::keys::{KeyPair, PrivateKey};
use crate::core::signature::{sign, verify};
use crate::error::{LedgerError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const PAYLOAD_SEPARATOR: &str = ":";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    sender: String,
    receiver: String,
    amount: String,         // decimal text exactly as submitted
    ciphertext: Vec<u64>,   // payload encrypted under the receiver's public key
    sender_key_pair: KeyPair,
    receiver_key_pair: KeyPair,
    signature: Vec<u64>,    // payload signed with the sender's private key
}

impl Transaction {
    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_receiver(&self) -> &str {
        self.receiver.as_str()
    }

    pub fn get_amount(&self) -> &str {
        self.amount.as_str()
    }

    pub fn get_ciphertext(&self) -> &[u64] {
        self.ciphertext.as_slice()
    }

    pub fn get_signature(&self) -> &[u64] {
        self.signature.as_slice()
    }

    pub fn get_sender_key_pair(&self) -> &KeyPair {
        &self.sender_key_pair
    }

    pub fn get_receiver_key_pair(&self) -> &KeyPair {
        &self.receiver_key_pair
    }

    /// Ciphertext integers joined with `,`; empty for an empty ciphertext.
    /// This is the message's contribution to the block digest.
    pub fn ciphertext_repr(&self) -> String {
        self.ciphertext
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decrypt the canonical payload with the receiver's private key.
    pub fn open(&self, receiver_private_key: &PrivateKey) -> Result<String> {
        decrypt(&self.ciphertext, receiver_private_key)
    }

    /// Decrypt with the receiver keypair stored on the transaction and return
    /// only the free-text message.
    pub fn decrypted_message(&self) -> Result<String> {
        let payload = self.open(self.receiver_key_pair.private_key())?;
        Ok(extract_message(&payload))
    }

    /// Re-check the stored signature against the sender's public key.
    pub fn verify_signature(&self) -> Result<bool> {
        let payload = self.open(self.receiver_key_pair.private_key())?;
        Ok(verify(
            &payload,
            &self.signature,
            self.sender_key_pair.public_key(),
        ))
    }
}

/// `sender:receiver:amount:message`
pub fn canonical_payload(sender: &str, receiver: &str, amount: &str, message: &str) -> String {
    [sender, receiver, amount, message].join(PAYLOAD_SEPARATOR)
}

/// Everything after the third separator; empty if the payload has fewer than
/// four parts.
pub fn extract_message(payload: &str) -> String {
    payload
        .splitn(4, PAYLOAD_SEPARATOR)
        .nth(3)
        .unwrap_or_default()
        .to_string()
}

pub struct TransactionFactory;

impl TransactionFactory {
    /// Build a transaction, rejecting missing fields and self-checking the
    /// signature before handing it back. Nothing is mutated on failure.
    pub fn create(
        sender: &str,
        receiver: &str,
        amount: &str,
        message: &str,
        sender_key_pair: KeyPair,
        receiver_key_pair: KeyPair,
    ) -> Result<Transaction> {
        Self::validate(sender, receiver, amount)?;

        let payload = canonical_payload(sender, receiver, amount, message);
        if !receiver_key_pair.public_key().can_encode(&payload) {
            warn!(
                "Payload has characters at or above receiver modulus {}; they will not decrypt",
                receiver_key_pair.modulus()
            );
        }

        // I encrypt for the receiver and sign with the sender's private key
        let ciphertext = encrypt(&payload, receiver_key_pair.public_key());
        let signature = sign(&payload, sender_key_pair.private_key());

        // I check my own signature before returning, so a mismatched keypair
        // never reaches the pool
        if !verify(&payload, &signature, sender_key_pair.public_key()) {
            return Err(LedgerError::SignatureVerificationFailed);
        }

        debug!("Built transaction {sender} -> {receiver}: {amount}");
        Ok(Transaction {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount: amount.to_string(),
            ciphertext,
            sender_key_pair,
            receiver_key_pair,
            signature,
        })
    }

    /// Required-field check, usable before any keys are minted.
    ///
    /// Only empty strings are missing. The amount is opaque text, so "-5",
    /// "ten" and a lone space all pass.
    pub fn validate(sender: &str, receiver: &str, amount: &str) -> Result<()> {
        if sender.is_empty() {
            return Err(LedgerError::InvalidInput("sender is required".to_string()));
        }
        if receiver.is_empty() {
            return Err(LedgerError::InvalidInput(
                "receiver is required".to_string(),
            ));
        }
        if amount.is_empty() {
            return Err(LedgerError::InvalidInput("amount is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::PublicKey;

    fn sender_keys() -> KeyPair {
        // 61 * 53
        KeyPair::new(PublicKey { n: 3233, e: 17 }, PrivateKey { n: 3233, d: 2753 })
    }

    fn receiver_keys() -> KeyPair {
        // 101 * 113, phi = 11200
        KeyPair::new(PublicKey { n: 11413, e: 3 }, PrivateKey { n: 11413, d: 7467 })
    }

    fn build(sender: &str, receiver: &str, amount: &str, message: &str) -> Result<Transaction> {
        TransactionFactory::create(
            sender,
            receiver,
            amount,
            message,
            sender_keys(),
            receiver_keys(),
        )
    }

    #[test]
    fn test_canonical_payload() {
        assert_eq!(canonical_payload("alice", "bob", "10", "hi"), "alice:bob:10:hi");
        assert_eq!(canonical_payload("alice", "bob", "10", ""), "alice:bob:10:");
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(extract_message("alice:bob:10:hi"), "hi");
        assert_eq!(extract_message("alice:bob:10:a:b:c"), "a:b:c");
        assert_eq!(extract_message("alice:bob:10:"), "");
        assert_eq!(extract_message("alice:bob"), "");
    }

    #[test]
    fn test_create_encrypts_and_signs_payload() {
        let tx = build("alice", "bob", "10", "hi").unwrap();
        assert_eq!(tx.get_sender(), "alice");
        assert_eq!(tx.get_receiver(), "bob");
        assert_eq!(tx.get_amount(), "10");
        assert_eq!(tx.get_ciphertext().len(), "alice:bob:10:hi".len());
        assert_eq!(tx.get_signature().len(), "alice:bob:10:hi".len());
        assert_eq!(
            tx.open(receiver_keys().private_key()).unwrap(),
            "alice:bob:10:hi"
        );
        assert_eq!(tx.decrypted_message().unwrap(), "hi");
        assert!(tx.verify_signature().unwrap());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let cases = [
            ("", "bob", "10"),
            ("alice", "", "10"),
            ("alice", "bob", ""),
            ("", "", ""),
        ];
        for (sender, receiver, amount) in cases {
            let err = build(sender, receiver, amount, "hi").unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_non_empty_fields_are_accepted_verbatim() {
        for amount in ["ten", "-5", "NaN", " ", "10.50"] {
            let tx = build("alice", "bob", amount, "").unwrap();
            assert_eq!(tx.get_amount(), amount);
        }
        let tx = build(" ", "\t", "1", "").unwrap();
        assert_eq!(tx.get_sender(), " ");
        assert_eq!(tx.get_receiver(), "\t");
        assert!(tx.verify_signature().unwrap());
    }

    #[test]
    fn test_mismatched_sender_keys_fail_self_check() {
        let broken = KeyPair::new(PublicKey { n: 3233, e: 7 }, PrivateKey { n: 3233, d: 2753 });
        let err = TransactionFactory::create("alice", "bob", "10", "hi", broken, receiver_keys())
            .unwrap_err();
        assert_eq!(err, LedgerError::SignatureVerificationFailed);
    }

    #[test]
    fn test_ciphertext_repr() {
        let tx = build("a", "b", "1", "").unwrap();
        let expected = tx
            .get_ciphertext()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(tx.ciphertext_repr(), expected);
        assert!(!tx.ciphertext_repr().ends_with(','));
    }
}
