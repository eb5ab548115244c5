//! Purpose: HTTP boundary for the echo transform.
//! Exports: `ServeConfig`, `serve`, `router`, `error_envelope`, `init_tracing`.
//! Role: Axum server with one echo handler parameterized by the variant route segment.
//! Invariants: Transform failures map to 400 with a JSON error envelope; unknown variants to 404.
//! Invariants: Successful echoes carry the render policy's content type verbatim.
//! Invariants: Loopback-only unless explicitly allowed.

use std::future::IntoFuture;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{DefaultBodyLimit, Path as AxumPath};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use serde::Serialize;
use serde_json::json;
use tokio::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::core::error::{Error, ErrorKind};
use crate::echo::EchoOutput;
use crate::variant::Variant;

pub const DEFAULT_MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    pub max_body_bytes: u64,
    pub allow_non_loopback: bool,
}

pub async fn serve(config: ServeConfig) -> Result<(), Error> {
    validate_config(&config)?;

    init_tracing("info");

    let max_body_bytes: usize = config
        .max_body_bytes
        .try_into()
        .map_err(|_| Error::new(ErrorKind::Usage).with_message("--max-body-bytes is too large"))?;

    let app = router(max_body_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to bind server")
                .with_source(err)
        })?;
    tracing::info!(bind = %config.bind, max_body_bytes, "echo server listening");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("server failed")
                    .with_source(err)
            })?;
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown requested");
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(Duration::from_secs(10), &mut server).await {
                Ok(result) => result.map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("server failed")
                        .with_source(err)
                })?,
                Err(_) => {
                    return Err(Error::new(ErrorKind::Io).with_message("server shutdown timed out"));
                }
            }
        }
    };
    Ok(())
}

/// Routes without binding a socket; tests drive this directly.
pub fn router(max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/variants", get(list_variants))
        .route("/:variant", post(echo))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

fn is_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(addr) => addr.is_loopback(),
        IpAddr::V6(addr) => addr.is_loopback(),
    }
}

fn validate_config(config: &ServeConfig) -> Result<(), Error> {
    if !is_loopback(config.bind.ip()) && !config.allow_non_loopback {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("non-loopback bind requires --allow-non-loopback"));
    }

    if config.max_body_bytes == 0 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("--max-body-bytes must be greater than zero"));
    }

    Ok(())
}

/// Install the global subscriber once; `RUST_LOG` overrides `default_filter`.
/// Logs go to stderr so CLI output on stdout stays byte-exact.
pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}

async fn healthz() -> Response {
    Json(json!({ "ok": true })).into_response()
}

async fn list_variants() -> Response {
    let variants: Vec<serde_json::Value> = Variant::all().iter().map(Variant::describe).collect();
    Json(json!({ "variants": variants })).into_response()
}

async fn echo(AxumPath(name): AxumPath<String>, body: Bytes) -> Response {
    let Some(variant) = Variant::lookup(&name) else {
        return error_response(
            Error::new(ErrorKind::NotFound).with_message(format!("unknown echo variant '{name}'")),
        );
    };
    match variant.echo(&body) {
        Ok(output) => {
            tracing::info!(
                variant = variant.name,
                input_bytes = body.len(),
                output_bytes = output.body.len(),
                "echo ok"
            );
            echo_response(output)
        }
        Err(err) => {
            tracing::info!(
                variant = variant.name,
                input_bytes = body.len(),
                kind = ?err.kind(),
                "echo rejected"
            );
            error_response(err)
        }
    }
}

fn echo_response(output: EchoOutput) -> Response {
    let mut response = output.body.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(output.content_type),
    );
    response
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u64>,
}

pub fn error_envelope(err: &Error) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorBody {
            kind: format!("{:?}", err.kind()),
            message: err.message().unwrap_or("error").to_string(),
            key: err.key().map(str::to_string),
            offset: err.offset(),
            line: err.line(),
            column: err.column(),
        },
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        kind if kind.is_transform_failure() => StatusCode::BAD_REQUEST,
        ErrorKind::Usage => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: Error) -> Response {
    (status_for(err.kind()), Json(error_envelope(&err))).into_response()
}
