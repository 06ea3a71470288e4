//! Checksum string parsing: `ALGORITHM: hexdigest`.

use crate::model::{Checksum, ChecksumAlgorithm};

/// Parse a checksum string such as `SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759`.
pub fn parse_checksum(value: &str) -> Result<Checksum, String> {
    let (algorithm_token, digest) = value
        .split_once(':')
        .ok_or_else(|| format!("Invalid checksum: {}", value))?;
    let algorithm = ChecksumAlgorithm::from_token(algorithm_token)
        .ok_or_else(|| format!("Invalid checksum algorithm: {}", algorithm_token.trim()))?;
    let digest = digest.trim();
    if digest.is_empty() || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid checksum value: {}", digest));
    }
    Ok(Checksum::new(algorithm, digest))
}
