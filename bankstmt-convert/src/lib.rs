//! bankstmt-convert: the document-to-records pipeline.
//!
//! Wires the extraction cascade to real collaborators (pdf-extract text
//! backend, poppler rasterizer, tesseract OCR) and writes the normalized
//! record set to xlsx or csv.

pub mod export;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod scan;

pub use export::{write_records, OutputFormat};
pub use ocr::TesseractOcr;
pub use pdf::{PdfDocument, PdfPage};
pub use pipeline::{extract_ocr_texts, extract_text_pages, Converter};
pub use scan::{classify, Classification};
