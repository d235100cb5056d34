mod formats;
mod help;
mod predict;

pub use formats::get_formats;
pub use help::{get_help, help_document};
pub use predict::post_predict;

use crate::cpg::CpgEngine;
use crate::{ContentCodec, Error, Result};
use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderMap, StatusCode, header},
    response::Response,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub engine: CpgEngine,
    pub help: Arc<serde_json::Value>,
    pub max_payload: usize,
}

pub fn create_router(state: AppState) -> Router {
    let max_payload = state.max_payload;
    Router::new()
        .route("/help", get(get_help))
        .route("/formats", get(get_formats))
        .route("/predict", post(post_predict))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_payload))
        .layer(TraceLayer::new_for_http())
}

/// Encode a successful payload with the codec the client accepts
fn encoded_response<T: Serialize>(headers: &HeaderMap, payload: &T) -> Result<Response> {
    let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
    let codec = ContentCodec::from_accept(accept);
    tracing::debug!("encoding response as {}", codec.content_type());

    let bytes = codec.encode(payload)?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, codec.content_type())
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| Error::Internal(format!("failed to build response: {}", e)))
}
