use csv::{ByteRecord, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::outcome::{ImportOutcome, ImportSummary};
use super::row_parser::RowParser;
use crate::domain::property::full_address;
use crate::domain::repository::PropertyRepository;

/// The input could not be opened or read at all. Row-level problems never
/// surface here; they are logged and counted in [`ImportOutcome`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read uploaded file: {0}")]
    Unreadable(#[source] csv::Error),
}

/// Drives a CSV upload into storage, one row at a time.
///
/// Best effort: a bad row or a refused insert is logged and skipped,
/// earlier inserts are never undone, and nothing is retried.
pub struct ImporterService<R> {
    repo: R,
    parser: RowParser,
}

impl<R: PropertyRepository> ImporterService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            parser: RowParser::new(),
        }
    }

    pub fn with_parser(mut self, parser: RowParser) -> Self {
        self.parser = parser;
        self
    }

    /// Opens `path` and imports it. The file is closed when this returns.
    pub fn import_path(&self, path: &Path) -> Result<ImportSummary, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        self.import(file)
    }

    /// Imports every row after the header from a single-pass byte source.
    ///
    /// The source is consumed and dropped before returning, on every path.
    pub fn import<S: Read>(&self, source: S) -> Result<ImportSummary, ImportError> {
        // Row width is checked by the parser, not the tokenizer, so a short
        // row is a skip and not a stream error.
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut outcome = ImportOutcome::default();

        // The header is discarded unread; raw bytes so even a non-UTF-8
        // header doesn't count as a decode failure.
        let mut header = ByteRecord::new();
        if !reader
            .read_byte_record(&mut header)
            .map_err(ImportError::Unreadable)?
        {
            info!("upload is empty, nothing to import");
            return Ok(outcome.into());
        }

        loop {
            let mut raw = ByteRecord::new();
            match reader.read_byte_record(&mut raw) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => {
                    warn!(error = %e, "failed to read next row, stopping import");
                    outcome.stopped_early = true;
                    break;
                }
                Err(e) => {
                    // The reader has already moved past the bad record.
                    warn!(error = %e, "row skipped");
                    outcome.rejected += 1;
                    continue;
                }
            }

            let line = raw.position().map(|p| p.line()).unwrap_or_default();

            // Decoding is per row: a field that isn't UTF-8 rejects its own
            // row and nothing else.
            let row = match StringRecord::from_byte_record(raw) {
                Ok(row) => row,
                Err(e) => {
                    let reason = e.utf8_error().to_string();
                    let raw = lossy_row(&e.into_byte_record());
                    warn!(line, row = %raw, %reason, "row skipped");
                    outcome.rejected += 1;
                    continue;
                }
            };

            self.import_row(&row, line, &mut outcome);
        }

        info!(
            imported = outcome.imported,
            rejected = outcome.rejected,
            write_failed = outcome.write_failed,
            stopped_early = outcome.stopped_early,
            "import finished"
        );

        Ok(outcome.into())
    }

    fn import_row(&self, row: &StringRecord, line: u64, outcome: &mut ImportOutcome) {
        let property = match self.parser.parse(row) {
            Ok(property) => property,
            Err(reason) => {
                let raw = row.iter().collect::<Vec<_>>().join(",");
                warn!(line, row = %raw, %reason, "row skipped");
                outcome.rejected += 1;
                return;
            }
        };

        let address = full_address(&property);

        // TODO: retry with backoff once storage errors are classified as transient or not.
        if let Err(e) = self.repo.insert(&property) {
            warn!(line, %address, error = %e, "failed to insert property, row skipped");
            outcome.write_failed += 1;
            return;
        }

        info!(line, %address, "inserted property");
        outcome.imported += 1;
    }
}

fn lossy_row(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}
