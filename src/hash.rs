//! Hash verification (MD5, SHA1, CRC32).
//!
//! The supported algorithm set is a closed enum: an algorithm name outside
//! the table is a verification failure, never a silent skip.

use byteorder::{BigEndian, ByteOrder};
use crc::{Crc, CRC_32_ISO_HDLC};
use sha1::Digest;

use crate::error::HashError;

/// CRC-32 with the IEEE 802.3 polynomial, as U-Boot writes `crc32` records.
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// A supported digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Md5,
    Crc32,
}

impl HashAlgorithm {
    /// Looks up an algorithm by its FIT `algo` property name.
    pub fn from_name(name: &str) -> Result<Self, HashError> {
        match name {
            "sha1" => Ok(Self::Sha1),
            "md5" => Ok(Self::Md5),
            "crc32" => Ok(Self::Crc32),
            _ => Err(HashError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// The FIT `algo` property name of this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::Crc32 => "crc32",
        }
    }

    /// Digest size in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Md5 => 16,
            Self::Crc32 => 4,
        }
    }

    /// Computes the digest of `data`, big-endian encoded for crc32.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1 => sha1::Sha1::digest(data).to_vec(),
            Self::Md5 => md5::compute(data).0.to_vec(),
            Self::Crc32 => CRC32.checksum(data).to_be_bytes().to_vec(),
        }
    }
}

/// Verifies `data` against a stored digest.
///
/// `sha1` and `md5` compare byte-exact. `crc32` compares by value: the
/// stored bytes are decoded as a big-endian u32 and compared numerically
/// against the computed checksum.
pub fn verify(algorithm: &str, expected: &[u8], data: &[u8]) -> Result<(), HashError> {
    let algo = HashAlgorithm::from_name(algorithm)?;

    let matches = match algo {
        HashAlgorithm::Crc32 => {
            expected.len() == 4 && BigEndian::read_u32(expected) == CRC32.checksum(data)
        }
        _ => algo.digest(data) == expected,
    };

    if matches {
        Ok(())
    } else {
        Err(HashError::DigestMismatch {
            algorithm: algo.name(),
            expected: hex::encode(expected),
            computed: hex::encode(algo.digest(data)),
        })
    }
}
