//! Rasterization and OCR bridges: poppler for page images, tesseract for
//! recognition, with a binarization pass in between.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use bankstmt_core::OcrEngine;

/// Subprocess-backed OCR engine.
///
/// Pages are rendered with `pdftoppm`, binarized (grayscale, fixed threshold)
/// to make the text stand out for recognition, then read with `tesseract`.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    work_dir: PathBuf,
    dpi: u32,
    threshold: u8,
    lang: String,
}

impl TesseractOcr {
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            dpi: 200,
            threshold: 150,
            lang: "eng".to_string(),
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    fn page_count(&self, pdf_path: &Path) -> Result<usize> {
        let output = Command::new("pdfinfo")
            .arg(pdf_path)
            .output()
            .with_context(|| format!("failed to invoke pdfinfo on {}", pdf_path.display()))?;

        if !output.status.success() {
            anyhow::bail!("pdfinfo failed with status: {}", output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            if let Some(rest) = line.strip_prefix("Pages:") {
                let count = rest.trim();
                return count
                    .parse()
                    .with_context(|| format!("unparseable 'Pages:' value: {count}"));
            }
        }

        anyhow::bail!(
            "pdfinfo output had no 'Pages:' line for {}",
            pdf_path.display()
        );
    }

    /// Render one page to PNG. pdftoppm's `-singlefile` keeps the output at
    /// exactly `<prefix>.png` regardless of page-number padding.
    fn render_page(&self, pdf_path: &Path, page_number: usize) -> Result<PathBuf> {
        let prefix = self.work_dir.join(format!("page_{page_number:03}"));
        let prefix_str = prefix
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("non-UTF8 work dir not supported"))?;

        let status = Command::new("pdftoppm")
            .arg("-png")
            .arg("-singlefile")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg(pdf_path)
            .arg(prefix_str)
            .status()
            .with_context(|| "failed to invoke pdftoppm; is poppler-utils installed?")?;

        if !status.success() {
            anyhow::bail!("pdftoppm failed with status: {status}");
        }

        let image_path = prefix.with_extension("png");
        if !image_path.exists() {
            anyhow::bail!("expected rendered image not found: {}", image_path.display());
        }
        Ok(image_path)
    }

    /// Grayscale + fixed-threshold binarization before recognition.
    fn preprocess(&self, image_path: &Path) -> Result<PathBuf> {
        let mut gray = image::open(image_path)
            .with_context(|| format!("decoding {}", image_path.display()))?
            .into_luma8();

        for pixel in gray.pixels_mut() {
            pixel.0[0] = if pixel.0[0] > self.threshold { 255 } else { 0 };
        }

        let out_path = image_path.with_extension("bin.png");
        gray.save(&out_path)
            .with_context(|| format!("writing {}", out_path.display()))?;
        Ok(out_path)
    }

    fn recognize(&self, image_path: &Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .with_context(|| "failed to invoke tesseract; is it installed?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractOcr {
    fn page_texts(&self, document: &Path) -> Result<Vec<String>> {
        fs::create_dir_all(&self.work_dir)
            .with_context(|| format!("creating {}", self.work_dir.display()))?;

        let page_count = self.page_count(document)?;
        let mut texts = Vec::with_capacity(page_count);

        // pdftoppm and pdfinfo are 1-based.
        for page_number in 1..=page_count {
            let rendered = self.render_page(document, page_number)?;
            let prepared = self.preprocess(&rendered)?;
            texts.push(self.recognize(&prepared)?);
        }

        Ok(texts)
    }
}
