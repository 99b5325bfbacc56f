//! Concurrent batch execution under a global deadline.
//!
//! Every call in a batch runs on its own blocking task. Results accumulate in a
//! shared collection in completion order. The scheduler races completion of
//! the whole batch against the deadline: if the deadline wins, the partial
//! collection is discarded and the outstanding tasks are left to finish on
//! their own.

use std::mem;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::DISPATCH_TARGET;
use crate::envelope::{CallEnvelope, ResultEnvelope};
use crate::executor::CallExecutor;
use crate::handler::Router;

/// Results of one batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    results: Vec<ResultEnvelope>,
    timed_out: bool,
}

impl BatchOutcome {
    /// Outcome for a batch whose every call finished in time.
    #[must_use]
    pub fn completed(results: Vec<ResultEnvelope>) -> Self {
        Self {
            results,
            timed_out: false,
        }
    }

    /// Outcome for a batch that overran its deadline.
    #[must_use]
    pub fn timed_out() -> Self {
        Self {
            results: Vec::new(),
            timed_out: true,
        }
    }

    /// Envelopes in completion order; empty when the batch timed out.
    #[must_use]
    pub fn results(&self) -> &[ResultEnvelope] {
        &self.results
    }

    /// Whether the deadline elapsed before every call finished.
    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }
}

/// Fans a batch out to concurrent tasks and gathers the results.
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    deadline: Option<Duration>,
}

impl BatchScheduler {
    /// Creates a scheduler with the given deadline. Zero waits indefinitely.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let deadline = (!timeout.is_zero()).then_some(timeout);
        Self { deadline }
    }

    /// Deadline applied to each batch, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Runs every call concurrently and waits for all of them or the deadline.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn run<R: Router>(
        &self,
        executor: &Arc<CallExecutor<R>>,
        batch: Vec<CallEnvelope>,
    ) -> BatchOutcome {
        let size = batch.len();
        let results = Arc::new(Mutex::new(Vec::with_capacity(size)));
        let handles: Vec<JoinHandle<()>> = batch
            .into_iter()
            .map(|call| {
                let executor = Arc::clone(executor);
                let results = Arc::clone(&results);
                tokio::task::spawn_blocking(move || {
                    let envelope = executor.execute(call);
                    results
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(envelope);
                })
            })
            .collect();
        debug!(target: DISPATCH_TARGET, calls = size, "batch launched");

        match self.deadline {
            Some(deadline) => {
                if tokio::time::timeout(deadline, wait_all(handles)).await.is_err() {
                    warn!(
                        target: DISPATCH_TARGET,
                        calls = size,
                        timeout_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                        "batch deadline elapsed; abandoning outstanding calls"
                    );
                    return BatchOutcome::timed_out();
                }
            }
            None => wait_all(handles).await,
        }

        let collected = mem::take(&mut *results.lock().unwrap_or_else(PoisonError::into_inner));
        BatchOutcome::completed(collected)
    }
}

async fn wait_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if let Err(join_error) = handle.await {
            error!(target: DISPATCH_TARGET, error = %join_error, "call task failed to complete");
        }
    }
}
