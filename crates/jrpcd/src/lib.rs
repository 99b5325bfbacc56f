//! JSON-RPC 2.0 dispatcher daemon.
//!
//! The daemon loads its configuration through [`jrpc_config`], installs
//! structured telemetry, and serves a single HTTP endpoint backed by a
//! [`jrpc_dispatch::Dispatcher`]. Every request body, whatever the path or
//! method, is treated as a JSON-RPC call or batch and answered with `200 OK`.
//!
//! The methods served are a fixed table of built-in workers (`version`,
//! `echo`, `status`) resolved by [`MethodTable`]. Workers receive a shared,
//! read-only [`AppContext`].
//!
//! Health reporting hooks emit structured events at each lifecycle stage so
//! operators can see when bootstrap fails or the listener goes away.

mod bootstrap;
mod context;
mod health;
mod http;
mod server;
mod telemetry;
mod workers;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use context::AppContext;
pub use health::{HealthReporter, StructuredHealthReporter};
pub use http::build_router;
pub use server::{LaunchError, ServeError, bind, run_daemon};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use workers::{
    BuiltinMethod, EchoWorker, METHOD_NOT_FOUND_MESSAGE, MethodTable, StatusWorker, VersionWorker,
    Worker,
};

#[cfg(test)]
mod tests;
