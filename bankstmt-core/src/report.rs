//! Structured progress/warning events, delivered to an injected sink.
//!
//! The pipeline never writes to a global logger; every stage takes a
//! `&dyn Reporter` so callers decide what (if anything) reaches the user,
//! and tests can assert on events instead of capturing output.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Field;

/// Extraction stage that produced (or declined to produce) rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Native table grids handed over by the document backend.
    NativeGrid,
    /// Horizontal-rule band extraction.
    RuledBands,
    /// Date+amount pattern matching over raw text lines.
    PatternRows,
    /// Fixed-offset column slicing of OCR candidate lines.
    OcrColumns,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::NativeGrid => "native table grid",
            Stage::RuledBands => "ruled bands",
            Stage::PatternRows => "pattern rows",
            Stage::OcrColumns => "ocr columns",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// Everything the pipeline has to say while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Scan classifier verdict for the whole document.
    DocumentClassified { scanned: bool, probe_chars: usize },
    /// A stage produced rows for a page.
    PageExtracted { page: usize, stage: Stage, rows: usize },
    /// A stage yielded nothing; the cascade moves on.
    StageSkipped {
        page: usize,
        stage: Stage,
        reason: String,
    },
    /// Every strategy came up empty for this page.
    PageEmpty { page: usize },
    /// A page failed outright but the rest of the document continues.
    PageFailed { page: usize, reason: String },
    /// A source column label matched no synonym set and was dropped.
    ColumnUnmapped { label: String },
    /// No source column mapped onto this canonical field.
    ColumnMissing { field: Field },
    /// A date survived no format pattern and no component salvage.
    DateUnparsed { raw: String },
    /// An amount cell did not parse even after scrubbing; emitted as 0.0.
    AmountUnparsed { raw: String },
    /// Records were written to the sink.
    Exported { path: PathBuf, rows: usize },
}

impl Event {
    pub fn severity(&self) -> Severity {
        match self {
            Event::DocumentClassified { .. }
            | Event::PageExtracted { .. }
            | Event::Exported { .. } => Severity::Info,
            Event::StageSkipped { .. }
            | Event::PageEmpty { .. }
            | Event::PageFailed { .. }
            | Event::ColumnUnmapped { .. }
            | Event::ColumnMissing { .. }
            | Event::DateUnparsed { .. }
            | Event::AmountUnparsed { .. } => Severity::Warning,
        }
    }
}

/// Sink for pipeline events. Implementations must not panic.
pub trait Reporter {
    fn event(&self, event: Event);
}

/// Discards everything. The default for library callers and tests.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn event(&self, _event: Event) {}
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;

    use super::{Event, Reporter};

    /// Collects events so tests can assert on them.
    pub struct RecordingReporter {
        pub events: RefCell<Vec<Event>>,
    }

    impl RecordingReporter {
        pub fn new() -> Self {
            Self {
                events: RefCell::new(Vec::new()),
            }
        }
    }

    impl Reporter for RecordingReporter {
        fn event(&self, event: Event) {
            self.events.borrow_mut().push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        let info = Event::PageExtracted {
            page: 1,
            stage: Stage::NativeGrid,
            rows: 4,
        };
        assert_eq!(info.severity(), Severity::Info);

        let warn = Event::DateUnparsed {
            raw: "??".to_string(),
        };
        assert_eq!(warn.severity(), Severity::Warning);
    }
}
