//! JSON-RPC fault taxonomy.
//!
//! Every failure that a client can observe is encoded as a [`Fault`] inside a
//! result envelope. The code is drawn from the fixed [`FaultCode`]
//! enumeration; the message is free text, though the constructors here use
//! the canonical wording for each code.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used for the synthetic envelope emitted when a batch times out.
pub const TIMEOUT_MESSAGE: &str = "Request timeout was reached";

/// Fixed enumeration of fault codes understood by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum FaultCode {
    /// The request body is not valid JSON.
    ParseRequest,
    /// The JSON does not satisfy the envelope contract.
    InvalidRequest,
    /// The method name does not resolve to a handler.
    MethodNotFound,
    /// Parameters are missing or malformed for the resolved handler.
    InvalidParams,
    /// The handler failed unexpectedly, or the request deadline elapsed.
    InternalError,
}

impl FaultCode {
    /// Returns the integer code written to the wire.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseRequest => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32604,
        }
    }

    /// Returns the canonical human-readable message for this code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ParseRequest => "Invalid JSON was received by the server.",
            Self::InvalidRequest => "The JSON sent is not a valid Request object.",
            Self::MethodNotFound => "The method does not exist / is not available.",
            Self::InvalidParams => "Invalid method parameter(s).",
            Self::InternalError => "Internal JSON-RPC error.",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.code())
    }
}

impl From<FaultCode> for i32 {
    fn from(code: FaultCode) -> Self {
        code.code()
    }
}

impl TryFrom<i32> for FaultCode {
    type Error = UnknownFaultCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -32700 => Ok(Self::ParseRequest),
            -32600 => Ok(Self::InvalidRequest),
            -32601 => Ok(Self::MethodNotFound),
            -32602 => Ok(Self::InvalidParams),
            -32604 => Ok(Self::InternalError),
            other => Err(UnknownFaultCode(other)),
        }
    }
}

/// Integer that does not belong to the [`FaultCode`] enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown fault code {0}")]
pub struct UnknownFaultCode(pub i32);

/// Coded, message-bearing error embedded in a result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct Fault {
    code: FaultCode,
    message: String,
}

impl Fault {
    /// Creates a fault with a custom message.
    pub fn new(code: FaultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a fault carrying the canonical message for `code`.
    #[must_use]
    pub fn from_code(code: FaultCode) -> Self {
        Self::new(code, code.message())
    }

    /// Creates a parse error fault (-32700).
    #[must_use]
    pub fn parse_request() -> Self {
        Self::from_code(FaultCode::ParseRequest)
    }

    /// Creates an invalid request fault (-32600).
    #[must_use]
    pub fn invalid_request() -> Self {
        Self::from_code(FaultCode::InvalidRequest)
    }

    /// Creates a method not found fault (-32601).
    #[must_use]
    pub fn method_not_found() -> Self {
        Self::from_code(FaultCode::MethodNotFound)
    }

    /// Creates an invalid params fault (-32602).
    #[must_use]
    pub fn invalid_params() -> Self {
        Self::from_code(FaultCode::InvalidParams)
    }

    /// Creates an internal error fault (-32604).
    #[must_use]
    pub fn internal() -> Self {
        Self::from_code(FaultCode::InternalError)
    }

    /// Creates the fault reported when the request deadline elapses.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(FaultCode::InternalError, TIMEOUT_MESSAGE)
    }

    /// Fault code.
    #[must_use]
    pub fn code(&self) -> FaultCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
