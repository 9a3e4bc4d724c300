//! Error types for pg-deparse

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for deparse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pg-deparse
///
/// Every variant is fatal: an error anywhere in the tree aborts the whole
/// deparse call with no partial output.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// The input tree contained a discriminant with no registered formatter.
    #[error("{kind} is not implemented: {payload}")]
    #[diagnostic(code(pg_deparse::unknown_node_kind))]
    UnknownNodeKind { kind: String, payload: String },

    /// A formatter recognized the node kind but met a sub-case code outside
    /// its known enumeration (join type, sub-link type, grouping-set kind...).
    #[error("unhandled {formatter} node: {payload}")]
    #[diagnostic(code(pg_deparse::unhandled_variant))]
    UnhandledVariant {
        formatter: &'static str,
        payload: String,
    },

    /// A recognized node kind whose payload does not have the expected shape.
    #[error("malformed {kind} node: {message}")]
    #[diagnostic(code(pg_deparse::malformed_node))]
    MalformedNode {
        kind: &'static str,
        message: String,
    },

    /// The input text is not valid JSON.
    #[error("invalid parse tree JSON: {0}")]
    #[diagnostic(code(pg_deparse::invalid_json))]
    InvalidJson(#[from] serde_json::Error),
}

/// Serialize a node payload for an error message.
///
/// Falls back to the `Debug` form if JSON serialization fails, so error
/// construction itself can never fail.
pub(crate) fn payload_json<T: serde::Serialize + std::fmt::Debug>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|_| format!("{payload:?}"))
}

/// Build an `UnhandledVariant` error for the given formatter and payload.
pub(crate) fn unhandled<T: serde::Serialize + std::fmt::Debug>(
    formatter: &'static str,
    payload: &T,
) -> Error {
    Error::UnhandledVariant {
        formatter,
        payload: payload_json(payload),
    }
}
