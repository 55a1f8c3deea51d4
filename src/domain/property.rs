// src/domain/property.rs

use serde::Serialize;

/// A single property listing as read from an import row.
///
/// Either every field was parsed or the record doesn't exist; the importer
/// never builds a partial one. Identity is assigned by storage on insert.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct PropertyRecord {
    pub prefecture: String,
    pub city: String,
    pub town: String,
    pub chome: u32,  // 丁目
    pub banchi: u32, // 番地
    pub go: u32,     // 号
    pub building: String,
    pub price: i64,
    pub nearest_station: String,
    pub property_type: String,
    /// Kept verbatim; the source doesn't say which unit it uses.
    pub land_area: String,
}

/// A record as it lives in the `properties` table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StoredProperty {
    pub id: i64,
    pub record: PropertyRecord,
}

/// Formats a property's address into one contiguous string.
/// Used for import logs and for the `full_address` field of the list view.
pub fn full_address(p: &PropertyRecord) -> String {
    format!(
        "{} {} {}, {} {} {}, {}",
        p.prefecture, p.city, p.town, p.chome, p.banchi, p.go, p.building
    )
}
