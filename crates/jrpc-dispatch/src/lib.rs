//! JSON-RPC 2.0 batch dispatch.
//!
//! A request body carrying one call or a batch of calls is decoded into
//! [`CallEnvelope`]s, each call is executed concurrently against a caller
//! supplied [`Router`], and the results are rendered back into a response
//! body. The pipeline never fails at the protocol level: malformed input,
//! unknown methods, bad parameters, handler faults and handler panics all
//! become [`Fault`]s inside result envelopes.
//!
//! ## Framing
//!
//! A request whose first non-whitespace byte is `{` is a single call; `[`
//! introduces a batch. The response is a bare object when exactly one result
//! envelope is produced and an array otherwise, regardless of how the request
//! was framed.
//!
//! ## Deadline
//!
//! Each batch runs under a global deadline. If it elapses before every call
//! finishes, the whole response is replaced with a single timeout envelope
//! with a null id, and outstanding calls are abandoned rather than cancelled.
//!
//! ## Wiring
//!
//! Implement [`Router`] over a closed set of [`Method`]s, each producing a
//! [`Handler`] bound to its typed parameters, then hand the router and the
//! execution context to a [`Dispatcher`].

mod codec;
mod dispatcher;
mod envelope;
mod errors;
mod executor;
mod fault;
mod handler;
mod response;
mod scheduler;
mod validate;

pub use codec::{ParsedBatch, parse, render};
pub use dispatcher::Dispatcher;
pub use envelope::{CallEnvelope, CallId, JSONRPC_VERSION, Outcome, ResultEnvelope};
pub use errors::DispatchError;
pub use executor::CallExecutor;
pub use fault::{Fault, FaultCode, TIMEOUT_MESSAGE, UnknownFaultCode};
pub use handler::{Handler, Method, Router, bind_params};
pub use response::assemble;
pub use scheduler::{BatchOutcome, BatchScheduler};
pub use validate::Validate;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = "jrpc_dispatch::dispatch";

#[cfg(test)]
mod tests;
