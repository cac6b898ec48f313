//! Search-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::TreeError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("start node unset")]
    StartNodeUnset,

    #[error("max search levels must be greater than 0, got {0}")]
    SetMaxSearchLevels(i64),
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
