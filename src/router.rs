use crate::domain::repository::PropertyRepository;
use crate::errors::{ResultResp, ServerError};
use crate::importer::{ImporterService, RowParser};
use crate::lister::ListerService;
use crate::responses::json_response;
use crate::uploads::with_uploaded_file;
use astra::Request;
use tracing::debug;

/// Everything a request handler needs, shared by all astra workers.
pub struct AppState<R> {
    pub importer: ImporterService<R>,
    pub lister: ListerService<R>,
    pub max_import_bytes: u64,
}

impl<R: PropertyRepository + Clone> AppState<R> {
    pub fn new(repo: R, parser: RowParser, max_import_bytes: u64) -> Self {
        Self {
            importer: ImporterService::new(repo.clone()).with_parser(parser),
            lister: ListerService::new(repo),
            max_import_bytes,
        }
    }
}

pub fn handle<R: PropertyRepository>(mut req: Request, state: &AppState<R>) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    debug!(%method, %path, "request");

    // A known path with the wrong method is a 404 as well.
    match (method.as_str(), path.as_str()) {
        ("POST", "/property/import") => import(&mut req, state),
        ("GET", "/property") => json_response(200, &state.lister.list()?),
        _ => Err(ServerError::NotFound),
    }
}

fn import<R: PropertyRepository>(req: &mut Request, state: &AppState<R>) -> ResultResp {
    let summary = with_uploaded_file(req, state.max_import_bytes, |file| {
        Ok(state.importer.import(file)?)
    })?;

    json_response(200, &summary)
}
