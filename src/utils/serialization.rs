// Binary record codec for everything the chain store writes to sled
use crate::error::{LedgerError, Result};

/// Encode a record with bincode's standard configuration
pub fn encode_record<T: bincode::Encode>(record: &T) -> Result<Vec<u8>> {
    bincode::encode_to_vec(record, bincode::config::standard())
        .map_err(|e| LedgerError::Serialization(format!("Failed to encode record: {e}")))
}

/// Decode a record previously written by [`encode_record`]
pub fn decode_record<T: bincode::Decode<()>>(bytes: &[u8]) -> Result<T> {
    let (record, read) = bincode::decode_from_slice(bytes, bincode::config::standard())
        .map_err(|e| LedgerError::Serialization(format!("Failed to decode record: {e}")))?;
    if read != bytes.len() {
        return Err(LedgerError::Serialization(format!(
            "Trailing bytes after record: read {read} of {}",
            bytes.len()
        )));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyPair, PrivateKey, PublicKey};

    #[test]
    fn test_keypair_record_survives_encoding() {
        let pair = KeyPair::new(PublicKey { n: 3233, e: 17 }, PrivateKey { n: 3233, d: 2753 });
        let bytes = encode_record(&pair).expect("encoding should work");
        let decoded: KeyPair = decode_record(&bytes).expect("decoding should work");
        assert_eq!(pair, decoded);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result: Result<KeyPair> = decode_record(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode_record(&7u64).unwrap();
        bytes.push(0);
        let result: Result<u64> = decode_record(&bytes);
        assert!(matches!(result, Err(LedgerError::Serialization(_))));
    }
}
