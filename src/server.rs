// src/server.rs

use crate::config::Config;
use crate::runner::{self, ExecutionResult};
use crate::substitute::TypedInput;

use axum::debug_handler;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

/* ---------------- server ---------------- */

pub async fn serve(cfg: Config, addr: &str) -> anyhow::Result<()> {
    let socket: SocketAddr = addr.parse()?;
    let listener = TcpListener::bind(socket).await?;

    tracing::info!(
        interpreter = %cfg.interpreter.command,
        "jacpad listening on http://{}",
        socket
    );

    axum::serve(listener, app(Arc::new(cfg))).await?;
    Ok(())
}

/// Build the router. Split out of `serve` so tests can drive it in-process.
pub fn app(cfg: Arc<Config>) -> Router {
    // The playground frontend is served from arbitrary origins, so every
    // route is fully open to cross-origin calls.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/run", post(run))
        .route("/debug", get(debug))
        .route("/health", get(health))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        path = %req.uri().path(),
                    )
                })
                .on_response(|res: &Response, latency: Duration, _span: &Span| {
                    tracing::info!(
                        status = res.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "request completed"
                    );
                }),
        )
        .with_state(cfg)
}

/* ---------------- request models ---------------- */

#[derive(Debug, Deserialize)]
struct RunRequest {
    code: String,
    inputs: Vec<TypedInput>,
}

/// Response shape for `/run`.
///
/// One flat error boundary: any pipeline failure collapses into a bare
/// `error` payload with no `output` field, always with HTTP 200. The
/// `Completed` variant carries interpreter stderr as `error` even when the
/// run went fine.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RunResponse {
    Completed { output: String, error: String },
    Failed { error: String },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum DebugResponse {
    Packages { installed_packages: String },
    Failed { error: String },
}

/* ---------------- endpoints ---------------- */

async fn health() -> &'static str {
    "ok"
}

#[debug_handler]
async fn run(
    State(cfg): State<Arc<Config>>,
    Json(req): Json<RunRequest>,
) -> Json<RunResponse> {
    let response = match runner::run_source(&cfg, &req.code, &req.inputs).await {
        Ok(ExecutionResult { output, error }) => RunResponse::Completed { output, error },

        Err(e) => {
            tracing::warn!(error = %e, "run request failed");
            RunResponse::Failed {
                error: e.to_string(),
            }
        }
    };

    Json(response)
}

#[debug_handler]
async fn debug(State(cfg): State<Arc<Config>>) -> Json<DebugResponse> {
    let response = match runner::list_packages(&cfg).await {
        Ok(installed_packages) => DebugResponse::Packages { installed_packages },

        Err(e) => {
            tracing::warn!(error = %e, "package listing failed");
            DebugResponse::Failed {
                error: e.to_string(),
            }
        }
    };

    Json(response)
}
