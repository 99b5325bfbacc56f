//! `echo`: returns the caller's message unchanged.

use serde::Deserialize;
use serde_json::Value;

use jrpc_dispatch::{Fault, Handler, Validate};

use crate::context::AppContext;

/// Parameters: `{"message": string}`, or `[message]` positionally.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct EchoWorker {
    #[serde(default)]
    message: String,
}

impl EchoWorker {
    /// Builds a worker echoing `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validate for EchoWorker {
    fn is_valid(&self) -> bool {
        !self.message.is_empty()
    }
}

impl Handler<AppContext> for EchoWorker {
    fn execute(&self, _context: &AppContext) -> Result<Value, Fault> {
        Ok(Value::String(self.message.clone()))
    }
}
