//! Content hashing with domain separation.
//!
//! Every digest in the audit trail is produced here: SHA-256 over
//! `domain_prefix || data`, rendered as `"sha256:<hex>"`.

use sha2::{Digest, Sha256};

/// Domain prefix for `(position, collected keys)` state fingerprints.
pub const DOMAIN_SEARCH_STATE: &[u8] = b"WAYPOINT::SEARCH_STATE::V1\0";

/// Domain prefix for search graph content hashing.
pub const DOMAIN_SEARCH_GRAPH: &[u8] = b"WAYPOINT::SEARCH_GRAPH::V1\0";

/// Domain prefix for search policy digests.
pub const DOMAIN_SEARCH_POLICY: &[u8] = b"WAYPOINT::SEARCH_POLICY::V1\0";

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Compute the canonical hash of a byte slice with domain separation.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    let colon = "sha256".len();
    ContentHash {
        full: format!("sha256:{hex_digest}"),
        colon,
    }
}
