// src/domain/repository.rs

use crate::domain::property::{PropertyRecord, StoredProperty};
use crate::errors::ServerError;

/// The storage capability the import and list services depend on.
///
/// Implementations assign the surrogate id on insert and must make each
/// insert atomic on its own; callers never group inserts into a transaction.
pub trait PropertyRepository {
    fn insert(&self, property: &PropertyRecord) -> Result<(), ServerError>;
    fn list_all(&self) -> Result<Vec<StoredProperty>, ServerError>;
}

impl<R: PropertyRepository + ?Sized> PropertyRepository for &R {
    fn insert(&self, property: &PropertyRecord) -> Result<(), ServerError> {
        (**self).insert(property)
    }

    fn list_all(&self) -> Result<Vec<StoredProperty>, ServerError> {
        (**self).list_all()
    }
}
