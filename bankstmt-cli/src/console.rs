//! Terminal reporter: warnings on stderr, progress on stdout when asked.

use bankstmt_core::{Event, Reporter, Severity};

pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn event(&self, event: Event) {
        match event.severity() {
            Severity::Info => {
                if self.verbose {
                    println!("{}", describe(&event));
                }
            }
            Severity::Warning => eprintln!("warning: {}", describe(&event)),
        }
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::DocumentClassified {
            scanned,
            probe_chars,
        } => {
            let kind = if *scanned { "scanned" } else { "text-based" };
            format!("document looks {kind} ({probe_chars} chars on page 1)")
        }
        Event::PageExtracted { page, stage, rows } => {
            format!("page {page}: {rows} row(s) via {}", stage.label())
        }
        Event::StageSkipped {
            page,
            stage,
            reason,
        } => format!("page {page}: {} skipped: {reason}", stage.label()),
        Event::PageEmpty { page } => format!("page {page}: no rows recovered"),
        Event::PageFailed { page, reason } => format!("page {page} failed: {reason}"),
        Event::ColumnUnmapped { label } => {
            format!("source column '{label}' matched no known field and was dropped")
        }
        Event::ColumnMissing { field } => {
            format!("no source column mapped to '{}'", field.name())
        }
        Event::DateUnparsed { raw } => format!("date '{raw}' left as-is (no format matched)"),
        Event::AmountUnparsed { raw } => format!("amount '{raw}' unparseable, wrote 0.0"),
        Event::Exported { path, rows } => {
            format!("wrote {rows} record(s) to {}", path.display())
        }
    }
}
