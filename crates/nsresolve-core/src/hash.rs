//! Keyed hash service over a fixed set of algorithms.
//!
//! Algorithms are an explicit enum rather than a runtime registry, so the
//! capability query ([`HashAlgorithm::is_supported`]) is answered from the
//! same table the service dispatches on.
//!
//! # Examples
//!
//! ```
//! use nsresolve_core::hash::{HashAlgorithm, Hasher};
//!
//! assert!(HashAlgorithm::is_supported("sha1"));
//! assert!(!HashAlgorithm::is_supported("md2"));
//!
//! let mut hasher = Hasher::new("sha1").unwrap();
//! hasher.set("ab").append("c");
//! assert_eq!(hasher.digest(), "a9993e364706816aba3e25717850c26c9cd0d89d");
//! ```

use std::fmt;
use std::str::FromStr;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use xxhash_rust::xxh3::xxh3_64;
use xxhash_rust::xxh32::xxh32;
use xxhash_rust::xxh64::xxh64;

use crate::HashError;

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// 32-bit XXH32 checksum.
    Xxh32,
    /// 64-bit XXH64 checksum.
    Xxh64,
    /// 64-bit XXH3 checksum.
    Xxh3,
    /// Legacy 160-bit SHA-1 digest.
    Sha1,
    /// 256-bit SHA-2 digest.
    Sha256,
    /// 512-bit SHA-2 digest.
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Xxh32,
        HashAlgorithm::Xxh64,
        HashAlgorithm::Xxh3,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    /// The canonical identifier of this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Xxh32 => "xxh32",
            HashAlgorithm::Xxh64 => "xxh64",
            HashAlgorithm::Xxh3 => "xxh3",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Look up an algorithm by identifier, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
    }

    /// Whether `name` identifies a supported algorithm.
    pub fn is_supported(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Identifiers of every supported algorithm.
    pub fn supported_names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(HashAlgorithm::name)
    }

    /// Size of the raw digest in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Xxh32 => 4,
            HashAlgorithm::Xxh64 | HashAlgorithm::Xxh3 => 8,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Hash `data` and return the lowercase hex digest.
    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            HashAlgorithm::Xxh32 => format!("{:08x}", xxh32(data, 0)),
            HashAlgorithm::Xxh64 => format!("{:016x}", xxh64(data, 0)),
            HashAlgorithm::Xxh3 => format!("{:016x}", xxh3_64(data)),
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(data)),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
            HashAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| HashError::UnsupportedAlgorithm {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accumulates input and produces a digest on demand.
///
/// `set` replaces the buffered input and `append` extends it; `digest` can be
/// called any number of times without consuming the hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    data: Vec<u8>,
}

impl Hasher {
    /// Create a hasher for the named algorithm.
    ///
    /// Fails before any data is processed when the name is not supported.
    pub fn new(algorithm: &str) -> Result<Self, HashError> {
        Ok(Self::with_algorithm(algorithm.parse()?))
    }

    /// Create a hasher for a known algorithm.
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            data: Vec::new(),
        }
    }

    /// The algorithm this hasher uses.
    #[inline]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Replace the buffered input.
    pub fn set(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.data.clear();
        self.data.extend_from_slice(data.as_ref());
        self
    }

    /// Append to the buffered input.
    pub fn append(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.data.extend_from_slice(data.as_ref());
        self
    }

    /// The input buffered so far.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Lowercase hex digest of the buffered input.
    pub fn digest(&self) -> String {
        self.algorithm.hex_digest(&self.data)
    }
}
