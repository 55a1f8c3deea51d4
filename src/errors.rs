use astra::Response;
use thiserror::Error;

use crate::importer::ImportError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Payload Too Large: limit is {limit} bytes")]
    PayloadTooLarge { limit: u64 },
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl From<rusqlite::Error> for ServerError {
    fn from(err: rusqlite::Error) -> Self {
        ServerError::DbError(err.to_string())
    }
}

impl From<ImportError> for ServerError {
    fn from(err: ImportError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}
