// src/lister.rs
use serde::Serialize;
use tracing::error;

use crate::domain::property::{full_address, PropertyRecord, StoredProperty};
use crate::domain::repository::PropertyRepository;
use crate::errors::ServerError;

/// One property as returned by the list endpoint.
#[derive(Debug, Serialize)]
pub struct PropertyView {
    pub id: i64,
    pub full_address: String,
    #[serde(flatten)]
    pub record: PropertyRecord,
}

impl From<StoredProperty> for PropertyView {
    fn from(stored: StoredProperty) -> Self {
        Self {
            id: stored.id,
            full_address: full_address(&stored.record),
            record: stored.record,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub message: String,
    pub properties: Vec<PropertyView>,
}

pub struct ListerService<R> {
    repo: R,
}

impl<R: PropertyRepository> ListerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Result<ListResponse, ServerError> {
        let stored = self.repo.list_all().map_err(|e| {
            // storage detail stays in the log
            error!(error = %e, "failed to list properties");
            ServerError::InternalError
        })?;

        let properties: Vec<PropertyView> = stored.into_iter().map(PropertyView::from).collect();

        Ok(ListResponse {
            message: format!("Got {} properties data.", properties.len()),
            properties,
        })
    }
}
