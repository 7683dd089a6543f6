//! Error types for record extraction, graph traversal, validation and configuration.

use thiserror::Error;

/// Stable error codes surfaced in messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// X001: Key absent in source
    NotFound,
    /// X002: Record span never closes
    UnbalancedDelimiters,
    /// X003: Evolution edges loop back into the current path
    CycleDetected,
    /// X004: Chain reached the configured depth cap
    DepthLimitExceeded,
    /// X005: Evolution edge points at a key with no readable record
    DanglingEdge,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "X001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "X001",
            ErrorCode::UnbalancedDelimiters => "X002",
            ErrorCode::CycleDetected => "X003",
            ErrorCode::DepthLimitExceeded => "X004",
            ErrorCode::DanglingEdge => "X005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error while locating a record in a source text.
///
/// Both variants are scoped to a single key: callers skip the entity and
/// carry on with the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("[X001] no record for key {key:?}")]
    NotFound { key: String },

    #[error("[X002] record {key:?} opened at offset {open_at} is never closed (depth {depth} at end of text)")]
    UnbalancedDelimiters {
        key: String,
        open_at: usize,
        depth: usize,
    },
}

impl ExtractError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExtractError::NotFound { .. } => ErrorCode::NotFound,
            ExtractError::UnbalancedDelimiters { .. } => ErrorCode::UnbalancedDelimiters,
        }
    }

    /// The key the failed lookup was for.
    pub fn key(&self) -> &str {
        match self {
            ExtractError::NotFound { key } | ExtractError::UnbalancedDelimiters { key, .. } => key,
        }
    }
}

/// A guard that stopped one branch of an evolution traversal.
///
/// These never abort a forest build; the partial chain up to the guard point
/// is kept and the interrupt is recorded on the forest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalInterrupt {
    #[error("[X003] cycle at {at:?}: {revisited:?} already on the current path")]
    CycleDetected { at: String, revisited: String },

    #[error("[X004] chain through {at:?} reached the depth limit of {depth}")]
    DepthLimitExceeded { at: String, depth: usize },

    #[error("[X005] edge from {from:?} to {target:?} has no readable record ({cause})")]
    DanglingEdge {
        from: String,
        target: String,
        cause: ErrorCode,
    },
}

impl TraversalInterrupt {
    /// Returns the error code for this interrupt.
    pub fn code(&self) -> ErrorCode {
        match self {
            TraversalInterrupt::CycleDetected { .. } => ErrorCode::CycleDetected,
            TraversalInterrupt::DepthLimitExceeded { .. } => ErrorCode::DepthLimitExceeded,
            TraversalInterrupt::DanglingEdge { .. } => ErrorCode::DanglingEdge,
        }
    }
}

/// Error during caller-level record validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("stat total {declared} for {species:?} does not match the sum of its stats ({computed})")]
    StatTotalMismatch {
        species: String,
        declared: u32,
        computed: u32,
    },

    #[error("{species:?} has {count} types (expected 1 or 2)")]
    TypeCount { species: String, count: usize },

    #[error("gender ratio for {species:?} sums to {sum} (expected 1)")]
    GenderRatioSum { species: String, sum: f64 },
}

/// Error while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
