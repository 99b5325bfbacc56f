//! Contracts for resolving and running handlers.
//!
//! A [`Router`] maps a method name onto a [`Method`]: a value identifying one
//! entry in a closed set of handler kinds. The method knows how to build its
//! [`Handler`], either with default parameters or by binding the call's
//! opaque parameter payload onto a typed structure. Handlers then run against
//! a read-only execution context chosen by the router.
//!
//! Routers are expected to build their route table once and share it across
//! requests; nothing here caches handler instances.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::fault::Fault;
use crate::validate::Validate;

/// One method's business logic, with its parameters already bound.
pub trait Handler<C>: Validate + Send {
    /// Runs the method against the shared execution context.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] that should be reported to the caller verbatim.
    fn execute(&self, context: &C) -> Result<Value, Fault>;
}

/// A resolved method: a constructor for one handler kind.
pub trait Method: Send + 'static {
    /// Execution context handed to the handler.
    type Context: Send + Sync + 'static;
    /// Handler produced by this method.
    type Handler: Handler<Self::Context>;

    /// Builds the handler with default parameters.
    ///
    /// Used when the call carries no parameters; the result is not
    /// validated.
    fn instantiate(self) -> Self::Handler;

    /// Binds the call's parameter payload onto the handler.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the payload does not fit the handler's
    /// parameter shape.
    fn bind(self, params: Value) -> Result<Self::Handler, serde_json::Error>;
}

/// Maps method names to methods.
pub trait Router: Send + Sync + 'static {
    /// Execution context shared by every handler this router produces.
    type Context: Send + Sync + 'static;
    /// Closed set of methods known to the router.
    type Method: Method<Context = Self::Context>;

    /// Looks up a method by name.
    ///
    /// # Errors
    ///
    /// Returns the fault to report when the name is unknown, conventionally
    /// [`Fault::method_not_found`].
    fn resolve(&self, method: &str) -> Result<Self::Method, Fault>;
}

/// Decodes a parameter payload into a typed parameter structure.
///
/// Convenience for [`Method::bind`] implementations.
///
/// # Errors
///
/// Returns the decoder error when the payload does not fit `P`.
pub fn bind_params<P>(params: Value) -> Result<P, serde_json::Error>
where
    P: DeserializeOwned,
{
    serde_json::from_value(params)
}
