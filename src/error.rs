// src/error.rs
//! Error types for table extraction.
//!
//! Two tiers: [`ExtractError`] is fatal and crosses the `extract` boundary;
//! [`SkipReason`] is recoverable and is collected into the warning log of an
//! extraction result instead of being propagated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal precondition violations reported to the caller.
///
/// Recoverable conditions (malformed blocks, unreconcilable rows) never take
/// this path; they are downgraded to [`SkipReason`] warnings so that partial
/// extraction is always preferred to total failure.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input bytes are not valid UTF-8 text (or contain interior NULs,
    /// which indicates binary content).
    #[error("invalid input encoding: {0}")]
    InvalidInputEncoding(String),
}

/// Why a block, row, or cell token could not be used as-is.
///
/// Each variant maps to a documented recovery action:
/// - `MalformedRange`: the owning cell is retained as literal text.
/// - `ColumnCountMismatch`: the offending row is dropped.
/// - `UnsupportedTableSyntax`: the whole block is skipped.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// A range token did not match any supported grammar.
    #[error("malformed range token: {token}")]
    MalformedRange { token: String },

    /// A body row's cell count could not be reconciled with the header,
    /// even by padding or truncation of empty cells.
    #[error("row has {found} cells, expected {expected}")]
    ColumnCountMismatch { expected: usize, found: usize },

    /// A segmented block did not match any recognized table grammar
    /// after best-effort repair.
    #[error("unsupported table syntax: {detail}")]
    UnsupportedTableSyntax { detail: String },
}

/// Classification of a warning entry in an extraction result.
///
/// Most warnings wrap a [`SkipReason`]; orientation ambiguity is non-fatal
/// and drops nothing, so it gets its own variant.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WarningKind {
    #[error(transparent)]
    Skipped(#[from] SkipReason),

    #[error("ambiguous pivot orientation, defaulted to row-major: {detail}")]
    AmbiguousOrientation { detail: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::ColumnCountMismatch {
            expected: 3,
            found: 5,
        };
        assert_eq!(reason.to_string(), "row has 5 cells, expected 3");
    }

    #[test]
    fn test_extract_error_display() {
        let err = ExtractError::InvalidInputEncoding("interior NUL byte".to_string());
        assert!(err.to_string().contains("invalid input encoding"));
    }
}
