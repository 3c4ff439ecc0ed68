//! Error types for parkrank
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Identifier type used in error payloads
pub type ItemKey = String;

/// Error type for ranking engine operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankingError {
    /// A choice was submitted while no comparison was on screen
    #[error("No comparison is pending")]
    NoPendingComparison,

    /// The engine already produced its final ranking
    #[error("Ranking is already complete")]
    AlreadyComplete,

    /// The selector exhausted its attempt budget without finding a comparison
    #[error("No presentable comparison after {attempts} attempts ({pending} jobs pending)")]
    Stuck {
        /// Number of random draws performed
        attempts: usize,
        /// Number of jobs still pending
        pending: usize,
    },

    /// Two input items share an identifier
    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemKey),

    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Error type for building a selection of items to rank
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Item is already part of the selection
    #[error("Item already selected: {0}")]
    Duplicate(ItemKey),

    /// Item is not part of the selection
    #[error("Item not selected: {0}")]
    NotSelected(ItemKey),

    /// Not enough items to start ranking
    #[error("Need at least {required} items to rank, have {actual}")]
    TooFew { required: usize, actual: usize },
}

/// Error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Lookup by id failed
    #[error("Unknown item id: {0}")]
    UnknownId(ItemKey),

    /// Catalog contains the same id twice
    #[error("Duplicate catalog id: {0}")]
    DuplicateId(ItemKey),

    /// Catalog JSON could not be parsed
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Top-level error type for a ranking flow
#[derive(Debug, Error)]
pub enum FlowError {
    /// Engine error
    #[error("Ranking error: {0}")]
    Ranking(#[from] RankingError),

    /// Selection error
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Operation is not valid in the current step
    #[error("Operation not allowed in step {step}: {operation}")]
    WrongStep {
        /// Current step name
        step: &'static str,
        /// Attempted operation
        operation: &'static str,
    },
}

/// Result type alias for ranking operations
pub type RankResult<T> = Result<T, RankingError>;
