//! Pass/fail structural validation.
//!
//! Validation is applied twice per call: to the raw envelope before routing,
//! and to the handler once its parameters are bound. Callers translate a
//! failure into the matching fault code, so no detail is carried here.

use crate::envelope::{CallEnvelope, JSONRPC_VERSION};

/// Structural validity check.
pub trait Validate {
    /// Returns `true` when the value satisfies its structural contract.
    fn is_valid(&self) -> bool;
}

impl Validate for CallEnvelope {
    fn is_valid(&self) -> bool {
        self.jsonrpc() == JSONRPC_VERSION && !self.method().is_empty()
    }
}
