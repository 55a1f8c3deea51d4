//! Turns one tokenized CSV row into a [`PropertyRecord`].
//!
//! Expected columns, in order:
//!
//! | idx | field           |
//! |-----|-----------------|
//! | 0   | prefecture      |
//! | 1   | city            |
//! | 2   | town            |
//! | 3   | chome           |
//! | 4   | banchi          |
//! | 5   | go              |
//! | 6   | building        |
//! | 7   | price           |
//! | 8   | nearest_station |
//! | 9   | property_type   |
//! | 10  | land_area       |

use csv::StringRecord;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

use super::digits::parse_with_fallback;
use crate::domain::property::PropertyRecord;

pub const FIELD_COUNT: usize = 11;

/// The numeric columns, named for rejection messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Chome,
    Banchi,
    Go,
    Price,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumericField::Chome => "chome",
            NumericField::Banchi => "banchi",
            NumericField::Go => "go",
            NumericField::Price => "price",
        };
        f.write_str(name)
    }
}

/// Why a row was not turned into a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowRejection {
    #[error("expected 11 fields, found {found}")]
    MalformedRow { found: usize },

    #[error("failed to parse {field} from {value:?}: {source}")]
    InvalidNumber {
        field: NumericField,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RowParser {
    widen_price: bool,
}

impl RowParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also apply the full-width fallback to `price`. Off by default, in
    /// which case price must already be ASCII.
    pub fn widen_price(mut self, enabled: bool) -> Self {
        self.widen_price = enabled;
        self
    }

    /// Validates shape first, then the numeric columns in column order.
    /// Text columns are taken verbatim, empty strings included.
    pub fn parse(&self, row: &StringRecord) -> Result<PropertyRecord, RowRejection> {
        if row.len() != FIELD_COUNT {
            return Err(RowRejection::MalformedRow { found: row.len() });
        }

        let chome = sub_address(row, 3, NumericField::Chome)?;
        let banchi = sub_address(row, 4, NumericField::Banchi)?;
        let go = sub_address(row, 5, NumericField::Go)?;
        let price = self.price(&row[7])?;

        Ok(PropertyRecord {
            prefecture: row[0].to_string(),
            city: row[1].to_string(),
            town: row[2].to_string(),
            chome,
            banchi,
            go,
            building: row[6].to_string(),
            price,
            nearest_station: row[8].to_string(),
            property_type: row[9].to_string(),
            land_area: row[10].to_string(),
        })
    }

    fn price(&self, value: &str) -> Result<i64, RowRejection> {
        let parsed = if self.widen_price {
            parse_with_fallback::<i64>(value)
        } else {
            value.parse::<i64>()
        };

        parsed.map_err(|source| RowRejection::InvalidNumber {
            field: NumericField::Price,
            value: value.to_string(),
            source,
        })
    }
}

fn sub_address(row: &StringRecord, idx: usize, field: NumericField) -> Result<u32, RowRejection> {
    let value = &row[idx];
    parse_with_fallback::<u32>(value).map_err(|source| RowRejection::InvalidNumber {
        field,
        value: value.to_string(),
        source,
    })
}
