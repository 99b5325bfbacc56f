//! HTTP surface: one endpoint answering every path and method.
//!
//! The body is handed to the dispatcher as raw bytes and the dispatcher's
//! output is returned verbatim. Protocol failures travel inside the JSON body,
//! so the status is always `200 OK`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use jrpc_dispatch::{Dispatcher, Fault, ResultEnvelope, Router, render};

const HTTP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::http");

/// Builds the axum application serving `dispatcher`.
pub fn build_router<R: Router>(
    dispatcher: Arc<Dispatcher<R>>,
    max_body_bytes: usize,
) -> axum::Router {
    axum::Router::new()
        .fallback(handle_rpc::<R>)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(dispatcher)
}

async fn handle_rpc<R: Router>(
    State(dispatcher): State<Arc<Dispatcher<R>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let payload = match body {
        Ok(bytes) => dispatch(&dispatcher, &bytes).await,
        Err(rejection) => {
            tracing::debug!(target: HTTP_TARGET, error = %rejection, "request body rejected");
            unreadable_body()
        }
    };
    json_response(payload)
}

async fn dispatch<R: Router>(dispatcher: &Dispatcher<R>, body: &[u8]) -> Vec<u8> {
    match dispatcher.process(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(
                target: HTTP_TARGET,
                error = %error,
                "failed to produce response body"
            );
            error.fallback_body().to_vec()
        }
    }
}

fn unreadable_body() -> Vec<u8> {
    match render(&[ResultEnvelope::failure(Fault::parse_request(), None)]) {
        Ok(bytes) => bytes,
        Err(error) => error.fallback_body().to_vec(),
    }
}

fn json_response(payload: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], payload).into_response()
}
