use chrono::Local;
use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA256};

// Month/day/year, 12-hour clock
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Current local wall-clock time, e.g. `3/14/2026, 9:05:02 PM`
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// Lowercase hex SHA-256 of a UTF-8 string
pub fn sha256_hex(data: &str) -> String {
    HEXLOWER.encode(sha256_digest(data.as_bytes()).as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_of_empty_string() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = current_timestamp();
        assert!(ts.contains(", "));
        assert!(ts.ends_with("AM") || ts.ends_with("PM"));
        assert_eq!(ts.split('/').count(), 3);
    }
}
