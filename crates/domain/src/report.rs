use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Written { path: PathBuf },
    Skipped { raw_date: String, reason: String },
    TaggingFailed { path: PathBuf, reason: String },
}

impl RecordOutcome {
    /// Path of the file left on disk, if the record produced one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Written { path } | Self::TaggingFailed { path, .. } => Some(path),
            Self::Skipped { .. } => None,
        }
    }
}

/// Per-record outcomes of one run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl ImportReport {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn written_files(&self) -> Vec<&PathBuf> {
        self.outcomes.iter().filter_map(RecordOutcome::path).collect()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RecordOutcome::Skipped { .. }))
            .count()
    }

    pub fn tagging_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RecordOutcome::TaggingFailed { .. }))
            .count()
    }
}
