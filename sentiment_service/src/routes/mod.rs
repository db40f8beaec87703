pub mod analyze_text;
pub mod dashboard;
pub mod health_check;
pub mod sentiment_graph;
pub mod welcome;

pub use analyze_text::*;
pub use dashboard::*;
pub use health_check::*;
pub use sentiment_graph::*;
pub use welcome::*;

use actix_web::{
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    http::{header::ContentType, StatusCode},
    HttpRequest, HttpResponse,
};
use serde_json::json;
use tracing::warn;

/// JSON body `{"error": message}` sent with every error response
pub(crate) fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ContentType::json())
        .json(json!({ "error": message }))
}

/// Answers malformed JSON bodies with the same error format as the handlers
pub fn json_error_handler(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    warn!(%error, "Rejected request body");
    let response = error_response(
        StatusCode::BAD_REQUEST,
        &format!("Invalid request body: {}", error),
    );
    InternalError::from_response(error, response).into()
}

/// Answers malformed query strings with the same error format as the handlers
pub fn query_error_handler(error: QueryPayloadError, _request: &HttpRequest) -> actix_web::Error {
    warn!(%error, "Rejected query string");
    let response = error_response(
        StatusCode::BAD_REQUEST,
        &format!("Invalid query string: {}", error),
    );
    InternalError::from_response(error, response).into()
}
