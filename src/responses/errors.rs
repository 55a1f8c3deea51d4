use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::error;

/// Convert a ServerError into a JSON error response.
///
/// Storage and internal failures are logged here and answered with a
/// generic message.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, message) = match &err {
        ServerError::NotFound => (404, err.to_string()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::PayloadTooLarge { .. } => (413, err.to_string()),
        ServerError::DbError(_) | ServerError::InternalError => {
            error!(error = %err, "request failed");
            (500, ServerError::InternalError.to_string())
        }
    };

    let body = json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
