//! Checksums over files, packages and external document references.

use serde::{Deserialize, Serialize};

/// Hash algorithms accepted by SPDX 2.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Adler32,
}

impl ChecksumAlgorithm {
    /// Look up an algorithm by its serialized token (`SHA1`, `SHA3-256`,
    /// `BLAKE2b-512`, ...). Case and hyphen/underscore spelling are
    /// normalized before matching.
    pub fn from_token(token: &str) -> Option<Self> {
        // Digit-bearing names resist generic case conversion; fold by hand.
        let normalized = token.trim().to_uppercase().replace('-', "_");
        match normalized.as_str() {
            "SHA1" => Some(ChecksumAlgorithm::Sha1),
            "SHA224" => Some(ChecksumAlgorithm::Sha224),
            "SHA256" => Some(ChecksumAlgorithm::Sha256),
            "SHA384" => Some(ChecksumAlgorithm::Sha384),
            "SHA512" => Some(ChecksumAlgorithm::Sha512),
            "SHA3_256" => Some(ChecksumAlgorithm::Sha3_256),
            "SHA3_384" => Some(ChecksumAlgorithm::Sha3_384),
            "SHA3_512" => Some(ChecksumAlgorithm::Sha3_512),
            "BLAKE2B_256" => Some(ChecksumAlgorithm::Blake2b256),
            "BLAKE2B_384" => Some(ChecksumAlgorithm::Blake2b384),
            "BLAKE2B_512" => Some(ChecksumAlgorithm::Blake2b512),
            "BLAKE3" => Some(ChecksumAlgorithm::Blake3),
            "MD2" => Some(ChecksumAlgorithm::Md2),
            "MD4" => Some(ChecksumAlgorithm::Md4),
            "MD5" => Some(ChecksumAlgorithm::Md5),
            "MD6" => Some(ChecksumAlgorithm::Md6),
            "ADLER32" => Some(ChecksumAlgorithm::Adler32),
            _ => None,
        }
    }
}

/// An algorithm/digest pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

impl Checksum {
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_token() {
        assert_eq!(ChecksumAlgorithm::from_token("SHA1"), Some(ChecksumAlgorithm::Sha1));
        assert_eq!(
            ChecksumAlgorithm::from_token("SHA3-256"),
            Some(ChecksumAlgorithm::Sha3_256)
        );
        assert_eq!(
            ChecksumAlgorithm::from_token("BLAKE2b-384"),
            Some(ChecksumAlgorithm::Blake2b384)
        );
        assert_eq!(ChecksumAlgorithm::from_token("CRC32"), None);
    }
}
