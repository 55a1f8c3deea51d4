mod digits;
mod outcome;
mod row_parser;
mod service;

pub use outcome::ImportSummary;
pub use row_parser::RowParser;
pub use service::{ImportError, ImporterService};
