//! Content hashing for structural fingerprints.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit XXH3 content hash.
///
/// Two multiplexer graphs with the same `ContentHash` are treated as
/// structurally identical, which lets the driver reuse one decomposition for
/// every library entry that shares a topology.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Incremental builder for a [`ContentHash`].
///
/// Values are fed as fixed-width little-endian words so that two different
/// sequences of fields can never collide by concatenation.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Starts a new hash.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds a `u32`.
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.state.update(&value.to_le_bytes());
        self
    }

    /// Feeds a `bool` as a single byte.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.state.update(&[value as u8]);
        self
    }

    /// Finishes the hash.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}
