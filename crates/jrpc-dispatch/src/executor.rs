//! Single-call execution pipeline.
//!
//! Each call is checked structurally, resolved through the router, bound to
//! its parameters, validated, and finally executed. Every outcome, including a
//! panic anywhere in that sequence, is folded into a [`ResultEnvelope`]
//! carrying the call's id.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::DISPATCH_TARGET;
use crate::envelope::{CallEnvelope, ResultEnvelope};
use crate::fault::Fault;
use crate::handler::{Handler, Method, Router};
use crate::validate::Validate;

/// Runs individual calls against a router and shared context.
pub struct CallExecutor<R: Router> {
    router: Arc<R>,
    context: Arc<R::Context>,
}

impl<R: Router> CallExecutor<R> {
    /// Creates an executor over the given router and execution context.
    pub fn new(router: Arc<R>, context: Arc<R::Context>) -> Self {
        Self { router, context }
    }

    /// Executes one call, always producing an envelope.
    ///
    /// The returned envelope's id is the call's id, whatever the outcome.
    #[must_use]
    pub fn execute(&self, call: CallEnvelope) -> ResultEnvelope {
        let id = call.id().cloned();
        let method = call.method().to_owned();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(call)));
        match outcome {
            Ok(Ok(result)) => ResultEnvelope::success(result, id),
            Ok(Err(fault)) => ResultEnvelope::failure(fault, id),
            Err(payload) => {
                error!(
                    target: DISPATCH_TARGET,
                    method = %method,
                    panic = panic_message(payload.as_ref()),
                    "handler panicked"
                );
                ResultEnvelope::failure(Fault::internal(), id)
            }
        }
    }

    fn run(&self, call: CallEnvelope) -> Result<Value, Fault> {
        if !call.is_valid() {
            debug!(
                target: DISPATCH_TARGET,
                jsonrpc = call.jsonrpc(),
                method = call.method(),
                "rejected invalid call envelope"
            );
            return Err(Fault::invalid_request());
        }

        let (name, params, _) = call.into_parts();
        let method = self.router.resolve(&name).inspect_err(|fault| {
            debug!(
                target: DISPATCH_TARGET,
                method = %name,
                code = %fault.code(),
                "resolution failed"
            );
        })?;

        let handler = match params {
            Some(params) => bind_and_validate(method, params, &name)?,
            None => method.instantiate(),
        };

        debug!(target: DISPATCH_TARGET, method = %name, "executing handler");
        handler.execute(&self.context)
    }
}

fn bind_and_validate<M: Method>(method: M, params: Value, name: &str) -> Result<M::Handler, Fault> {
    let handler = method.bind(params).map_err(|error| {
        debug!(target: DISPATCH_TARGET, method = %name, %error, "parameter binding failed");
        Fault::invalid_params()
    })?;
    if handler.is_valid() {
        Ok(handler)
    } else {
        debug!(target: DISPATCH_TARGET, method = %name, "bound parameters failed validation");
        Err(Fault::invalid_params())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
