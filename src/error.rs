//! Error types for sbom-graph.
//!
//! The graph algebra is almost entirely total: canonicalization repairs
//! invalid references instead of reporting them, and absent lookups return
//! empty results. The only fallible operation is node matching, which fails
//! when a probe positively identifies more than one node.

use thiserror::Error;

/// Main error type for sbom-graph operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomGraphError {
    /// A matching probe identified more than one node and no evidence
    /// axis could break the tie.
    #[error("probe matches {} nodes ({}) and cannot be disambiguated", .candidates.len(), .candidates.join(", "))]
    AmbiguousMatch {
        /// Ids of the nodes that survived every disambiguation step.
        candidates: Vec<String>,
    },
}

impl SbomGraphError {
    /// Create an ambiguity error from the surviving candidate ids.
    pub fn ambiguous<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AmbiguousMatch {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Convenient Result type for sbom-graph operations.
pub type Result<T> = std::result::Result<T, SbomGraphError>;
