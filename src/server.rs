//! HTTP endpoint for workflow execution
//!
//! One inbound route, `POST /run`, takes a raw YAML document body and
//! executes a single dispatcher run with a fresh output store, returning
//! the run report as JSON. `GET /ops` lists registered operation names so
//! document editors can offer completion.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::TabulaError;
use crate::registry::Registry;
use crate::runner::Runner;

pub fn router() -> Router {
    Router::new()
        .route("/run", post(handle_run))
        .route("/ops", get(handle_ops))
        // the endpoint fronts a browser-based document editor
        .layer(CorsLayer::permissive())
}

pub async fn serve(port: u16) -> std::io::Result<()> {
    let address = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(address).await?;

    info!(url = %format!("http://localhost:{port}/"), "starting workflow endpoint");

    axum::serve(listener, router()).await
}

async fn handle_run(body: String) -> Response {
    // polars operations are blocking; keep them off the async workers
    let result = tokio::task::spawn_blocking(move || Runner::new().run_str(&body)).await;

    match result {
        Ok(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(Err(e @ (TabulaError::Yaml(_) | TabulaError::Format(_)))) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Ok(Err(e)) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn handle_ops() -> Json<Vec<&'static str>> {
    Json(Registry::names())
}
