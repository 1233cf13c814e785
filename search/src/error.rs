//! Typed search errors.
//!
//! "No solution" is not an error: it is
//! [`TerminationReasonV1::FrontierExhausted`](crate::graph::TerminationReasonV1::FrontierExhausted)
//! in a [`SearchResult`](crate::search::SearchResult), and `None` from
//! [`solve`](crate::search::solve). `SearchError` covers the cases where the
//! search could not reach a verdict.

/// Typed failure for search execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Pre-flight policy validation failed. No search steps were taken.
    InvalidPolicy { detail: String },
    /// The expansion budget stopped the search before a goal was popped
    /// or the frontier emptied.
    ExpansionBudgetExceeded { expansions: u64 },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::ExpansionBudgetExceeded { expansions } => {
                write!(f, "expansion budget exceeded after {expansions} expansions")
            }
        }
    }
}

impl std::error::Error for SearchError {}
