use super::encoded_response;
use crate::{ContentCodec, PREDICTOR_NAME, Result, types::SupportedFormats};
use axum::{http::HeaderMap, response::Response};

pub async fn get_formats(headers: HeaderMap) -> Result<Response> {
    let formats = SupportedFormats {
        predictor_name: PREDICTOR_NAME.to_string(),
        predictor_supported_request_formats: ContentCodec::supported_content_types(),
        predictor_supported_response_formats: ContentCodec::supported_content_types(),
    };
    encoded_response(&headers, &formats)
}
