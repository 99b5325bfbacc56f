//! Error types for dispatch infrastructure failures.
//!
//! JSON-RPC level problems are never errors in this sense: they become
//! [`Fault`](crate::Fault)s inside result envelopes. The variants here cover
//! the few ways the pipeline itself can fail to produce response bytes.

use thiserror::Error;

/// Errors surfaced while producing a response body.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Response body to send when the real one could not be produced.
    ///
    /// The bytes encode an internal error envelope with a null id so clients
    /// still receive well-formed JSON.
    #[must_use]
    pub fn fallback_body(&self) -> &'static [u8] {
        match self {
            Self::SerializeResponse(_) => FALLBACK_BODY,
        }
    }
}

const FALLBACK_BODY: &[u8] =
    br#"{"jsonrpc":"2.0","error":{"code":-32604,"message":"Internal JSON-RPC error."},"id":null}"#;
