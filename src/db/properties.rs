use crate::db::connection::Database;
use crate::domain::property::{PropertyRecord, StoredProperty};
use crate::domain::repository::PropertyRepository;
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::params;

/// SQLite-backed storage for imported properties.
#[derive(Clone)]
pub struct SqlitePropertyRepo {
    db: Database,
}

impl SqlitePropertyRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PropertyRepository for SqlitePropertyRepo {
    /// Inserts one row. A single statement, so SQLite makes it atomic
    /// without an explicit transaction.
    fn insert(&self, property: &PropertyRecord) -> Result<(), ServerError> {
        let now = Utc::now().naive_utc();

        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO properties (
                    prefecture, city, town, chome, banchi, go, building,
                    price, nearest_station, property_type, land_area, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
                params![
                    &property.prefecture,
                    &property.city,
                    &property.town,
                    property.chome,
                    property.banchi,
                    property.go,
                    &property.building,
                    property.price,
                    &property.nearest_station,
                    &property.property_type,
                    &property.land_area,
                    now,
                ],
            )
            .map_err(|e| ServerError::DbError(format!("insert property failed: {e}")))?;
            Ok(())
        })
    }

    fn list_all(&self) -> Result<Vec<StoredProperty>, ServerError> {
        self.db.with_conn(|conn| {
            // at a later date, we might need filters and/or sorting options here
            let mut stmt = conn.prepare(
                r#"
                SELECT
                    property_id, prefecture, city, town, chome, banchi, go, building,
                    price, nearest_station, property_type, land_area
                FROM properties
                ORDER BY property_id
                "#,
            )?;

            let rows = stmt.query_map([], |row| {
                Ok(StoredProperty {
                    id: row.get(0)?,
                    record: PropertyRecord {
                        prefecture: row.get(1)?,
                        city: row.get(2)?,
                        town: row.get(3)?,
                        chome: row.get(4)?,
                        banchi: row.get(5)?,
                        go: row.get(6)?,
                        building: row.get(7)?,
                        price: row.get(8)?,
                        nearest_station: row.get(9)?,
                        property_type: row.get(10)?,
                        land_area: row.get(11)?,
                    },
                })
            })?;

            let mut properties = Vec::new();
            for r in rows {
                properties.push(r?);
            }
            Ok(properties)
        })
    }
}
