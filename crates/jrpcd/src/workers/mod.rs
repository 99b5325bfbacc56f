//! Built-in workers and the route table that resolves them.
//!
//! The table is built once at startup and never mutated afterwards. Each entry
//! maps a method name onto a [`BuiltinMethod`], which in turn knows how to
//! produce its [`Worker`] either from defaults or from the call's parameters.

mod echo;
mod status;
mod version;

use std::collections::HashMap;

use serde_json::Value;

use jrpc_dispatch::{Fault, FaultCode, Handler, Method, Router, Validate, bind_params};

use crate::context::AppContext;

pub use echo::EchoWorker;
pub use status::StatusWorker;
pub use version::VersionWorker;

/// Message reported when a method name is not in the table.
pub const METHOD_NOT_FOUND_MESSAGE: &str = "The method does not exist or it's not available.";

/// Closed set of methods served by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMethod {
    /// `version`
    Version,
    /// `echo`
    Echo,
    /// `status`
    Status,
}

impl BuiltinMethod {
    /// All methods, in registration order.
    pub const ALL: [Self; 3] = [Self::Version, Self::Echo, Self::Status];

    /// Wire name of the method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Echo => "echo",
            Self::Status => "status",
        }
    }
}

/// A worker with its parameters bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Worker {
    /// Reports the application version.
    Version(VersionWorker),
    /// Echoes its message.
    Echo(EchoWorker),
    /// Reports version and uptime.
    Status(StatusWorker),
}

impl Validate for Worker {
    fn is_valid(&self) -> bool {
        match self {
            Self::Version(worker) => worker.is_valid(),
            Self::Echo(worker) => worker.is_valid(),
            Self::Status(worker) => worker.is_valid(),
        }
    }
}

impl Handler<AppContext> for Worker {
    fn execute(&self, context: &AppContext) -> Result<Value, Fault> {
        match self {
            Self::Version(worker) => worker.execute(context),
            Self::Echo(worker) => worker.execute(context),
            Self::Status(worker) => worker.execute(context),
        }
    }
}

impl Method for BuiltinMethod {
    type Context = AppContext;
    type Handler = Worker;

    fn instantiate(self) -> Self::Handler {
        match self {
            Self::Version => Worker::Version(VersionWorker::default()),
            Self::Echo => Worker::Echo(EchoWorker::default()),
            Self::Status => Worker::Status(StatusWorker::default()),
        }
    }

    fn bind(self, params: Value) -> Result<Self::Handler, serde_json::Error> {
        Ok(match self {
            Self::Version => Worker::Version(bind_params(params)?),
            Self::Echo => Worker::Echo(bind_params(params)?),
            Self::Status => Worker::Status(bind_params(params)?),
        })
    }
}

/// Immutable name-to-method route table.
#[derive(Debug, Clone)]
pub struct MethodTable {
    routes: HashMap<&'static str, BuiltinMethod>,
}

impl MethodTable {
    /// Table holding every built-in method.
    #[must_use]
    pub fn builtin() -> Self {
        let routes = BuiltinMethod::ALL
            .into_iter()
            .map(|method| (method.name(), method))
            .collect();
        Self { routes }
    }

    /// Registered method names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }
}

impl Router for MethodTable {
    type Context = AppContext;
    type Method = BuiltinMethod;

    fn resolve(&self, method: &str) -> Result<Self::Method, Fault> {
        self.routes
            .get(method)
            .copied()
            .ok_or_else(|| Fault::new(FaultCode::MethodNotFound, METHOD_NOT_FOUND_MESSAGE))
    }
}
