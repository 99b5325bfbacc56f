//! Inbound and outbound envelope types.
//!
//! A [`CallEnvelope`] mirrors one request object from the wire. Missing or
//! `null` `jsonrpc` and `method` fields decode as empty strings, leaving
//! structural validation to decide whether the call is acceptable. A
//! [`ResultEnvelope`] carries either a result or a fault, never both, and
//! always echoes the call's id.
//!
//! Ids are held as raw JSON text ([`CallId`]) so they are written back exactly
//! as received: `1e3` stays `1e3` and long integers keep every digit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::fault::Fault;

/// Protocol version tag accepted on requests and written on responses.
pub const JSONRPC_VERSION: &str = "2.0";

/// Correlation id of a call, kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(Box<RawValue>);

impl CallId {
    /// Raw JSON text of the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.get()
    }
}

impl FromStr for CallId {
    type Err = serde_json::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        RawValue::from_string(text.to_owned()).map(Self)
    }
}

impl PartialEq for CallId {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for CallId {}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed inbound call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    jsonrpc: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<CallId>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl CallEnvelope {
    /// Builds a protocol-conformant call.
    pub fn new(method: impl Into<String>, params: Option<Value>, id: Option<CallId>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Builds a call with an arbitrary version tag.
    ///
    /// Used when salvaging fields from a body that failed to decode, and by
    /// tests exercising structural validation.
    pub fn with_version(
        jsonrpc: impl Into<String>,
        method: impl Into<String>,
        params: Option<Value>,
        id: Option<CallId>,
    ) -> Self {
        Self {
            jsonrpc: jsonrpc.into(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Version tag as received.
    #[must_use]
    pub fn jsonrpc(&self) -> &str {
        &self.jsonrpc
    }

    /// Method name as received.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Opaque parameter payload, if any.
    #[must_use]
    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Correlation id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&CallId> {
        self.id.as_ref()
    }

    /// Splits the call into its method name, parameters and id.
    #[must_use]
    pub fn into_parts(self) -> (String, Option<Value>, Option<CallId>) {
        (self.method, self.params, self.id)
    }
}

/// Payload of a result envelope: exactly one of result or error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Successful handler output.
    Result(Value),
    /// Fault describing why the call failed.
    Error(Fault),
}

/// One outbound response unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    jsonrpc: &'static str,
    #[serde(flatten)]
    outcome: Outcome,
    id: Option<CallId>,
}

impl ResultEnvelope {
    /// Creates a success envelope.
    #[must_use]
    pub fn success(result: Value, id: Option<CallId>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: Outcome::Result(result),
            id,
        }
    }

    /// Creates a failure envelope.
    #[must_use]
    pub fn failure(fault: Fault, id: Option<CallId>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: Outcome::Error(fault),
            id,
        }
    }

    /// Result or fault carried by the envelope.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Fault carried by the envelope, if the call failed.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        match &self.outcome {
            Outcome::Error(fault) => Some(fault),
            Outcome::Result(_) => None,
        }
    }

    /// Result payload, if the call succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    /// Correlation id echoed from the call.
    #[must_use]
    pub fn id(&self) -> Option<&CallId> {
        self.id.as_ref()
    }
}
