//! Envelope codec: request bytes in, response bytes out.
//!
//! The framing of a request is decided by its first non-whitespace byte: `{`
//! introduces a single call and `[` a batch. Anything else, including an empty
//! body, is a parse error. Responses are framed by their own cardinality: one
//! envelope renders as an object, any other count as an array.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::DISPATCH_TARGET;
use crate::envelope::{CallEnvelope, CallId, ResultEnvelope};
use crate::errors::DispatchError;
use crate::fault::Fault;

/// Outcome of decoding a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBatch {
    calls: Vec<CallEnvelope>,
    fault: Option<Fault>,
}

impl ParsedBatch {
    fn accepted(calls: Vec<CallEnvelope>) -> Self {
        Self { calls, fault: None }
    }

    fn rejected(calls: Vec<CallEnvelope>) -> Self {
        Self {
            calls,
            fault: Some(Fault::parse_request()),
        }
    }

    /// Calls decoded from the body.
    ///
    /// When [`ParsedBatch::fault`] is set this holds at most one best-effort
    /// envelope salvaged from a malformed single-object body.
    #[must_use]
    pub fn calls(&self) -> &[CallEnvelope] {
        &self.calls
    }

    /// Top-level parse fault, if the body could not be decoded.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Consumes the batch, yielding its calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<CallEnvelope> {
        self.calls
    }
}

/// Decodes a request body into call envelopes.
#[must_use]
pub fn parse(bytes: &[u8]) -> ParsedBatch {
    let body = trim_leading_whitespace(bytes);
    match body.first() {
        Some(b'{') => parse_single(body),
        Some(b'[') => parse_many(body),
        Some(_) => {
            debug!(target: DISPATCH_TARGET, "request body is neither an object nor an array");
            ParsedBatch::rejected(Vec::new())
        }
        None => {
            debug!(target: DISPATCH_TARGET, "empty request body");
            ParsedBatch::rejected(Vec::new())
        }
    }
}

/// Renders result envelopes, choosing framing from their count.
///
/// # Errors
///
/// Returns [`DispatchError::SerializeResponse`] if serialization fails.
pub fn render(envelopes: &[ResultEnvelope]) -> Result<Vec<u8>, DispatchError> {
    let bytes = match envelopes {
        [single] => serde_json::to_vec(single)?,
        many => serde_json::to_vec(many)?,
    };
    Ok(bytes)
}

fn parse_single(body: &[u8]) -> ParsedBatch {
    match serde_json::from_slice::<CallEnvelope>(body) {
        Ok(call) => ParsedBatch::accepted(vec![call]),
        Err(error) => {
            debug!(target: DISPATCH_TARGET, %error, "malformed request object");
            ParsedBatch::rejected(vec![salvage(body)])
        }
    }
}

fn parse_many(body: &[u8]) -> ParsedBatch {
    match serde_json::from_slice::<Vec<CallEnvelope>>(body) {
        Ok(calls) => ParsedBatch::accepted(calls),
        Err(error) => {
            debug!(target: DISPATCH_TARGET, %error, "malformed request batch");
            ParsedBatch::rejected(Vec::new())
        }
    }
}

/// Envelope fields accepted at any JSON type.
#[derive(Deserialize)]
struct LooseCall {
    #[serde(default)]
    jsonrpc: Option<Value>,
    #[serde(default)]
    method: Option<Value>,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default)]
    id: Option<CallId>,
}

/// Recovers whichever envelope fields are well-typed in a body that failed to
/// decode as a whole.
fn salvage(body: &[u8]) -> CallEnvelope {
    let Ok(loose) = serde_json::from_slice::<LooseCall>(body) else {
        return CallEnvelope::default();
    };

    CallEnvelope::with_version(
        string_field(loose.jsonrpc.as_ref()),
        string_field(loose.method.as_ref()),
        loose.params,
        loose.id,
    )
}

fn string_field(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_owned()
}

fn trim_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes.get(start..).unwrap_or_default()
}
