//! Router and handlers used across the dispatch test suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::{CallId, Fault, FaultCode, Handler, Method, Router, Validate, bind_params};

/// Read-only context shared by test handlers.
pub(super) struct TestContext {
    pub(super) version: String,
}

impl TestContext {
    pub(super) fn new(version: &str) -> Self {
        Self {
            version: version.to_owned(),
        }
    }
}

/// Counts how often each pipeline stage touched the router.
#[derive(Debug, Default)]
pub(super) struct Probe {
    resolves: AtomicUsize,
    binds: AtomicUsize,
}

impl Probe {
    pub(super) fn resolves(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub(super) fn binds(&self) -> usize {
        self.binds.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy)]
enum TestKind {
    Version,
    Greet,
    Sleep,
    Panic,
    Fail,
}

pub(super) struct TestMethod {
    kind: TestKind,
    probe: Arc<Probe>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GreetParams {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SleepParams {
    millis: u64,
}

pub(super) enum TestHandler {
    Version,
    Greet(GreetParams),
    Sleep(SleepParams),
    Panic,
    Fail,
}

impl Validate for TestHandler {
    fn is_valid(&self) -> bool {
        match self {
            Self::Greet(params) => !params.name.is_empty(),
            _ => true,
        }
    }
}

impl Handler<TestContext> for TestHandler {
    fn execute(&self, context: &TestContext) -> Result<Value, Fault> {
        match self {
            Self::Version => Ok(Value::String(context.version.clone())),
            Self::Greet(params) => Ok(json!(format!("hello, {}", params.name))),
            Self::Sleep(params) => {
                thread::sleep(Duration::from_millis(params.millis));
                Ok(json!(params.millis))
            }
            Self::Panic => panic!("handler exploded"),
            Self::Fail => Err(Fault::new(FaultCode::InternalError, "backend unavailable")),
        }
    }
}

impl Method for TestMethod {
    type Context = TestContext;
    type Handler = TestHandler;

    fn instantiate(self) -> Self::Handler {
        match self.kind {
            TestKind::Version => TestHandler::Version,
            TestKind::Greet => TestHandler::Greet(GreetParams::default()),
            TestKind::Sleep => TestHandler::Sleep(SleepParams::default()),
            TestKind::Panic => TestHandler::Panic,
            TestKind::Fail => TestHandler::Fail,
        }
    }

    fn bind(self, params: Value) -> Result<Self::Handler, serde_json::Error> {
        self.probe.binds.fetch_add(1, Ordering::SeqCst);
        Ok(match self.kind {
            TestKind::Greet => TestHandler::Greet(bind_params(params)?),
            TestKind::Sleep => TestHandler::Sleep(bind_params(params)?),
            _ => self.instantiate(),
        })
    }
}

/// Router over the fixed test method set.
#[derive(Debug, Default)]
pub(super) struct TestRouter {
    probe: Arc<Probe>,
}

impl TestRouter {
    pub(super) fn probe(&self) -> Arc<Probe> {
        Arc::clone(&self.probe)
    }
}

impl Router for TestRouter {
    type Context = TestContext;
    type Method = TestMethod;

    fn resolve(&self, method: &str) -> Result<Self::Method, Fault> {
        self.probe.resolves.fetch_add(1, Ordering::SeqCst);
        let kind = match method {
            "version" => TestKind::Version,
            "greet" => TestKind::Greet,
            "sleep" => TestKind::Sleep,
            "panic" => TestKind::Panic,
            "fail" => TestKind::Fail,
            _ => return Err(Fault::method_not_found()),
        };
        Ok(TestMethod {
            kind,
            probe: Arc::clone(&self.probe),
        })
    }
}

/// Builds a call id from raw JSON text.
pub(super) fn call_id(text: &str) -> Option<CallId> {
    Some(text.parse().expect("valid id"))
}

/// Parses a response body and finds the envelope carrying `id`.
pub(super) fn envelope_with_id(response: &Value, id: &Value) -> Option<Value> {
    match response {
        Value::Array(envelopes) => envelopes
            .iter()
            .find(|envelope| envelope.get("id") == Some(id))
            .cloned(),
        Value::Object(_) if response.get("id") == Some(id) => Some(response.clone()),
        _ => None,
    }
}
