//! BDD test world: loader, reporter, daemon and running server state for step functions.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, bootstrap_with};
use crate::server::{ServeError, bind};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::reporter::RecordingHealthReporter;

struct RunningServer {
    address: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<(), ServeError>>,
}

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    runtime: Runtime,
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    daemon: Option<Daemon>,
    bootstrap_error: Option<BootstrapError>,
    server: Option<RunningServer>,
    serve_result: Option<Result<(), ServeError>>,
    response: Option<Value>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("build runtime");
        Self {
            runtime,
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            daemon: None,
            bootstrap_error: None,
            server: None,
            serve_result: None,
            response: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
    }

    /// Installs a loader that succeeds.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::new());
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.daemon.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        match bootstrap_with(&*self.loader, self.reporter.clone()) {
            Ok(daemon) => self.daemon = Some(daemon),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Binds the configured address and serves in the background.
    pub fn start_server(&mut self) {
        self.bootstrap();
        let daemon = self.daemon.take().expect("daemon bootstrapped");
        let (shutdown, signal) = oneshot::channel::<()>();
        let (address, task) = self.runtime.block_on(async move {
            let listener = bind(daemon.config().listen_address())
                .await
                .expect("bind listener");
            let address = listener.local_addr().expect("local address");
            let task = tokio::spawn(daemon.serve(listener, async move {
                let _ = signal.await;
            }));
            (address, task)
        });
        self.server = Some(RunningServer {
            address,
            shutdown,
            task,
        });
    }

    /// Posts `body` to the running server and keeps the decoded response.
    pub fn post(&mut self, body: &str) {
        let address = self.server.as_ref().expect("server running").address;
        let request = format!(
            "POST / HTTP/1.1\r\nHost: {address}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let raw = self.runtime.block_on(async move {
            let mut stream = TcpStream::connect(address).await.expect("connect");
            stream.write_all(request.as_bytes()).await.expect("write request");
            let mut raw = Vec::new();
            stream.read_to_end(&mut raw).await.expect("read response");
            raw
        });
        let text = String::from_utf8(raw).expect("utf-8 response");
        let (head, payload) = text.split_once("\r\n\r\n").expect("http response");
        assert!(head.starts_with("HTTP/1.1 200"), "unexpected status line: {head}");
        self.response = Some(serde_json::from_str(payload).expect("json body"));
    }

    /// Signals shutdown and waits for the server task to finish.
    pub fn stop_server(&mut self) {
        let server = self.server.take().expect("server running");
        let _ = server.shutdown.send(());
        let result = self.runtime.block_on(server.task).expect("server task joined");
        self.serve_result = Some(result);
    }

    /// Returns whether bootstrap produced an error.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns true when the daemon handle is available.
    #[must_use]
    pub fn daemon_started(&self) -> bool {
        self.daemon.is_some()
    }

    /// Decoded body of the last response.
    #[must_use]
    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    /// Result returned by the server once stopped.
    #[must_use]
    pub fn serve_result(&self) -> Option<&Result<(), ServeError>> {
        self.serve_result.as_ref()
    }
}

impl Drop for TestWorld {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            let _ = server.shutdown.send(());
            let _ = self.runtime.block_on(server.task);
        }
    }
}

/// Builds the default world.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
