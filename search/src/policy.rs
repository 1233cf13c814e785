//! Search policy types.

use crate::canon::{canonical_json_bytes, CanonError};
use crate::digest::{canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY};
use crate::error::SearchError;

/// Search budget and audit configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions. `u64::MAX` means unbounded.
    pub max_expansions: u64,
    /// Whether every frontier pop is recorded for the audit graph.
    pub expansion_log: ExpansionLogV1,
}

impl SearchPolicyV1 {
    /// Validate the policy before any search step is taken.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is 0: the
    /// root could never be expanded, so no verdict is reachable.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Whether the expansion budget is finite.
    #[must_use]
    pub fn is_budgeted(&self) -> bool {
        self.max_expansions != u64::MAX
    }

    /// Canonical digest of this policy, bound into graph metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let value = serde_json::json!({
            "expansion_log": self.expansion_log.as_str(),
            "max_expansions": self.max_expansions,
        });
        let bytes = canonical_json_bytes(&value)?;
        Ok(canonical_hash(DOMAIN_SEARCH_POLICY, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: u64::MAX,
            expansion_log: ExpansionLogV1::Off,
        }
    }
}

/// How much of the pop sequence is retained in the search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionLogV1 {
    /// Counters only.
    Off,
    /// One `ExpandEventV1` per frontier pop.
    Full,
}

impl ExpansionLogV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Full => "full",
        }
    }
}
