//! Request-level entry point tying the pipeline together.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::DISPATCH_TARGET;
use crate::codec;
use crate::envelope::ResultEnvelope;
use crate::errors::DispatchError;
use crate::executor::CallExecutor;
use crate::fault::Fault;
use crate::handler::Router;
use crate::response;
use crate::scheduler::BatchScheduler;

/// Processes raw request bodies into raw response bodies.
///
/// A dispatcher is built once at startup and shared between connections.
pub struct Dispatcher<R: Router> {
    executor: Arc<CallExecutor<R>>,
    scheduler: BatchScheduler,
}

impl<R: Router> Dispatcher<R> {
    /// Creates a dispatcher. A zero `timeout` disables the batch deadline.
    pub fn new(router: Arc<R>, context: Arc<R::Context>, timeout: Duration) -> Self {
        Self {
            executor: Arc::new(CallExecutor::new(router, context)),
            scheduler: BatchScheduler::new(timeout),
        }
    }

    /// Handles one request body.
    ///
    /// JSON-RPC failures are encoded in the returned bytes; an error is only
    /// returned when the response itself cannot be serialized.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::SerializeResponse`] if serialization fails.
    pub async fn process(&self, body: &[u8]) -> Result<Vec<u8>, DispatchError> {
        let parsed = codec::parse(body);
        if let Some(fault) = parsed.fault() {
            debug!(target: DISPATCH_TARGET, bytes = body.len(), "request body rejected");
            return codec::render(&[ResultEnvelope::failure(fault.clone(), None)]);
        }

        let calls = parsed.into_calls();
        if calls.is_empty() {
            debug!(target: DISPATCH_TARGET, "empty batch rejected");
            return codec::render(&[ResultEnvelope::failure(Fault::invalid_request(), None)]);
        }

        let outcome = self.scheduler.run(&self.executor, calls).await;
        response::assemble(&outcome)
    }
}
