use serde::Serialize;

/// Per-import counters. Lives only for the duration of one import call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows parsed and stored.
    pub imported: usize,
    /// Rows skipped because they were not UTF-8 or failed shape or numeric
    /// validation.
    pub rejected: usize,
    /// Rows that parsed but that storage refused.
    pub write_failed: usize,
    /// The byte stream failed before the end of the file.
    pub stopped_early: bool,
}

/// What the caller of an import gets back.
///
/// Only `message` goes over the wire; per-row detail is in the logs.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub message: String,
    #[serde(skip)]
    pub outcome: ImportOutcome,
}

impl From<ImportOutcome> for ImportSummary {
    fn from(outcome: ImportOutcome) -> Self {
        Self {
            message: format!("Processed {} properties.", outcome.imported),
            outcome,
        }
    }
}
