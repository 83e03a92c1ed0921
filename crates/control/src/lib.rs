//! # Control
//!
//! Admin HTTP server for live configuration and health introspection:
//! - `GET  /api/config` - current batch-size threshold
//! - `POST /api/config` - replace the threshold (rejects values < 1)
//! - `GET  /api/health` - processed count and last flush time
//!
//! Handlers touch nothing but the shared [`RuntimeState`]; pipeline errors
//! are never visible here, only through logs and metrics.

use std::net::SocketAddr;
use std::sync::Arc;

use contracts::RuntimeState;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Threshold payload for both directions of /api/config
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigPayload {
    batch_size: i64,
}

/// Response body of /api/health
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthPayload {
    processed_count: u64,
    last_processed: Option<String>,
}

/// Start the control server; runs until the pipeline is cancelled.
pub async fn serve(
    addr: SocketAddr,
    state: Arc<RuntimeState>,
    cancel: CancellationToken,
) -> Result<(), hyper::Error> {
    let make_svc = make_service_fn(move |_| {
        let state = state.clone();
        async move {
            Ok::<_, hyper::Error>(service_fn(move |req: Request<Body>| {
                handle(req, state.clone())
            }))
        }
    });

    info!("Control server listening on {}", addr);
    Server::try_bind(&addr)?
        .serve(make_svc)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
}

async fn handle(
    req: Request<Body>,
    state: Arc<RuntimeState>,
) -> Result<Response<Body>, hyper::Error> {
    let response = match (req.method(), req.uri().path()) {
        (&Method::GET, "/api/config") => get_config(&state),
        (&Method::POST, "/api/config") => update_config(req, &state).await?,
        (_, "/api/config") => text_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
        (&Method::GET, "/api/health") => get_health(&state),
        _ => text_response(StatusCode::NOT_FOUND, "not found"),
    };
    Ok(response)
}

fn get_config(state: &RuntimeState) -> Response<Body> {
    json_response(
        StatusCode::OK,
        &ConfigPayload {
            batch_size: state.batch_size() as i64,
        },
    )
}

async fn update_config(
    req: Request<Body>,
    state: &RuntimeState,
) -> Result<Response<Body>, hyper::Error> {
    let body = hyper::body::to_bytes(req.into_body()).await?;

    let payload: ConfigPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(text_response(
                StatusCode::BAD_REQUEST,
                format!("invalid JSON: {e}"),
            ));
        }
    };

    if payload.batch_size < 1 {
        return Ok(text_response(
            StatusCode::BAD_REQUEST,
            "batchSize must be >= 1",
        ));
    }

    // Validated above; the state-level check guards other callers
    match state.set_batch_size(payload.batch_size as usize) {
        Ok(()) => {
            debug!(batch_size = payload.batch_size, "Threshold updated");
            Ok(empty_response(StatusCode::NO_CONTENT))
        }
        Err(e) => Ok(text_response(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

fn get_health(state: &RuntimeState) -> Response<Body> {
    let health = state.health();
    json_response(
        StatusCode::OK,
        &HealthPayload {
            processed_count: health.processed_count,
            last_processed: health.last_processed.map(|t| t.to_rfc3339()),
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response<Body> {
    let body = serde_json::to_vec(payload).unwrap_or_default();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn text_response(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::from(format!("{}\n", message.into())))
        .unwrap()
}

fn empty_response(status: StatusCode) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::empty())
        .unwrap()
}
