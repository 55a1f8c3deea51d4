use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;
use tracing::error;

/// Serialize `data` as the JSON body of a response.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> ResultResp {
    let body = serde_json::to_vec(data).map_err(|e| {
        error!(error = %e, "failed to serialize response");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
