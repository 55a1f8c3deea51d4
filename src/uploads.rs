// uploads.rs
use astra::Request;
use multipart::server::Multipart;
use std::io::{Cursor, Read};

use crate::errors::ServerError;

/// Name of the form field carrying the CSV document.
pub const FILE_FIELD: &str = "file";

/// Reads a `multipart/form-data` body of at most `limit` bytes and hands the
/// `file` field to `f` as a byte stream. The stream is dropped when `f`
/// returns.
pub fn with_uploaded_file<T, F>(req: &mut Request, limit: u64, f: F) -> Result<T, ServerError>
where
    F: FnOnce(&mut dyn Read) -> Result<T, ServerError>,
{
    let boundary = multipart_boundary(req)?;
    let body = read_body(req, limit)?;

    let mut multipart = Multipart::with_body(Cursor::new(body), boundary);
    while let Some(mut field) = multipart
        .read_entry()
        .map_err(|e| ServerError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if &*field.headers.name == FILE_FIELD {
            return f(&mut field.data);
        }
    }

    Err(ServerError::BadRequest(format!(
        "missing form field `{FILE_FIELD}`"
    )))
}

fn multipart_boundary(req: &Request) -> Result<String, ServerError> {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("missing Content-Type header".into()))?;

    let mime: mime::Mime = content_type
        .parse()
        .map_err(|e| ServerError::BadRequest(format!("invalid Content-Type: {e}")))?;

    if mime.type_() != mime::MULTIPART || mime.subtype() != mime::FORM_DATA {
        return Err(ServerError::BadRequest(format!(
            "expected multipart/form-data, got {}",
            mime.essence_str()
        )));
    }

    mime.get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
        .ok_or_else(|| ServerError::BadRequest("multipart boundary is missing".into()))
}

fn read_body(req: &mut Request, limit: u64) -> Result<Vec<u8>, ServerError> {
    let declared = req
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(ServerError::PayloadTooLarge { limit });
    }

    // One byte past the limit tells an exact fit from an oversized body.
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(limit + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("failed to read request body: {e}")))?;

    if body.len() as u64 > limit {
        return Err(ServerError::PayloadTooLarge { limit });
    }
    Ok(body)
}
