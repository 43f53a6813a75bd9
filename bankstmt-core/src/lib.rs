//! bankstmt-core: canonical record types, schema normalization, and the
//! collaborator contracts the extraction pipeline is built against.

pub mod normalize;
pub mod report;
pub mod schema;
pub mod source;
pub mod types;

pub use normalize::{normalize_amount, normalize_date};
pub use report::{Event, NullReporter, Reporter, Severity, Stage};
pub use schema::normalize_rows;
pub use source::{OcrEngine, PageAccess, RuleSegment, TableGrid};
pub use types::{Field, RawRow, Record};
