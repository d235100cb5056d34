use super::{AppState, encoded_response};
use crate::{
    ContentCodec, Error, Result,
    predict::predict,
    validate::{parse_request, validate},
};
use axum::{
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, header},
    response::Response,
};
use bytes::Bytes;

pub async fn post_predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let body = body?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let codec = ContentCodec::from_content_type(content_type)?;
    tracing::debug!("decoding {} byte request as {}", body.len(), codec.content_type());

    let decoded: serde_json::Value = codec.decode(&body)?;

    // Density computation is CPU-bound; keep it off the async workers
    let engine = state.engine;
    let response = tokio::task::spawn_blocking(move || {
        let validated = validate(parse_request(decoded)?)?;
        Ok::<_, Error>(predict(&validated, &engine))
    })
    .await
    .map_err(|e| Error::Internal(format!("prediction task failed: {}", e)))??;

    encoded_response(&headers, &response)
}
