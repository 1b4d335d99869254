//! JSON error bodies for the status endpoints.

use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "RESULT_PENDING").
/// - `message`: Human-readable error message.
/// - `context`: Optional context, such as the game id.
/// - `status`: HTTP status code.
pub fn http_error_response(code: &str, message: &str, context: Option<&str>, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    }))
}
