//! Text extraction from scans using pdftotext and Tesseract.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tempfile::TempDir;

use super::OcrError;

/// OCR result for a single uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOcr {
    pub name: String,
    pub text: String,
}

/// OCR result for one rasterized PDF page.
#[derive(Debug, Clone, Serialize)]
pub struct PageOcr {
    pub index: usize,
    pub text: String,
}

/// OCR result for a whole PDF: per-page texts plus the combined text.
#[derive(Debug, Clone, Serialize)]
pub struct PdfOcr {
    pub name: String,
    pub pages: Vec<PageOcr>,
    pub text: String,
}

/// Text extractor that shells out to Tesseract and Poppler.
pub struct TextExtractor {
    /// Tesseract language code, e.g. "pol", "eng", or combined "pol+eng".
    language: String,
    /// Rendering DPI for PDF rasterization.
    dpi: u32,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            language: "pol".to_string(),
            dpi: 300,
        }
    }
}

impl TextExtractor {
    /// Create a new text extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }

    /// Set the rasterization DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Check that Tesseract and its language data are usable.
    pub fn ensure_available(&self) -> Result<(), OcrError> {
        if which::which("tesseract").is_err() {
            return Err(OcrError::ToolNotFound(
                "tesseract (install tesseract-ocr)".to_string(),
            ));
        }

        let output = Command::new("tesseract").arg("--list-langs").output()?;
        let listing = String::from_utf8_lossy(&output.stdout).to_string()
            + &String::from_utf8_lossy(&output.stderr);
        let missing = missing_languages(&self.language, &listing);
        if !missing.is_empty() {
            return Err(OcrError::MissingLanguage(missing.join(", ")));
        }
        Ok(())
    }

    /// OCR a single uploaded image.
    pub fn ocr_image_bytes(&self, name: &str, bytes: &[u8]) -> Result<ImageOcr, OcrError> {
        self.ensure_available()?;

        let temp_dir = TempDir::new()?;
        let extension = infer::get(bytes)
            .map(|kind| kind.extension())
            .unwrap_or("png");
        let image_path = temp_dir.path().join(format!("upload.{}", extension));
        std::fs::write(&image_path, bytes)?;

        let text = self.run_tesseract(&image_path)?;
        Ok(ImageOcr {
            name: name.to_string(),
            text,
        })
    }

    /// OCR a multi-page scanned PDF: rasterize every page, OCR each.
    pub fn ocr_pdf_bytes(&self, name: &str, bytes: &[u8]) -> Result<PdfOcr, OcrError> {
        self.ensure_available()?;

        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("upload.pdf");
        std::fs::write(&pdf_path, bytes)?;

        let images = self.rasterize(&pdf_path, temp_dir.path())?;
        if images.is_empty() {
            return Err(OcrError::EmptyPdf);
        }

        let mut pages = Vec::with_capacity(images.len());
        for (index, image_path) in images.iter().enumerate() {
            let text = self.run_tesseract(image_path)?;
            pages.push(PageOcr { index, text });
        }

        let text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(PdfOcr {
            name: name.to_string(),
            pages,
            text,
        })
    }

    /// Extract text from a PDF, per page: keep pdftotext output unless OCR
    /// yields significantly more content.
    pub fn extract_pdf_text(&self, bytes: &[u8]) -> Result<String, OcrError> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("upload.pdf");
        std::fs::write(&pdf_path, bytes)?;

        let images = self.rasterize(&pdf_path, temp_dir.path())?;
        if images.is_empty() {
            return Err(OcrError::EmptyPdf);
        }

        let mut page_texts: Vec<String> = Vec::with_capacity(images.len());
        for (index, image_path) in images.iter().enumerate() {
            let pdf_text = self
                .extract_pdf_page_text(&pdf_path, index as u32 + 1)
                .unwrap_or_default();
            let pdf_chars = nonspace_chars(&pdf_text);

            let mut final_text = pdf_text;
            if let Ok(ocr_text) = self.run_tesseract(image_path) {
                // Use OCR if it has significantly more content (>20% more chars)
                let ocr_chars = nonspace_chars(&ocr_text);
                if ocr_chars > pdf_chars + (pdf_chars / 5) {
                    final_text = ocr_text;
                }
            }
            page_texts.push(final_text);
        }

        Ok(page_texts.join("\n\n"))
    }

    /// Run Tesseract on an image file.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::Failed(format!("tesseract failed: {}", stderr)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::ToolNotFound(
                "tesseract (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }

    /// Rasterize all PDF pages to PNG; returns image paths in page order.
    fn rasterize(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &self.dpi.to_string()])
            .arg(pdf_path)
            .arg(output_dir.join("page"))
            .status();

        match status {
            Ok(s) if s.success() => {}
            Ok(_) => {
                return Err(OcrError::Failed(
                    "pdftoppm failed to convert PDF pages".to_string(),
                ))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::ToolNotFound(
                    "pdftoppm (install poppler-utils)".to_string(),
                ))
            }
            Err(e) => return Err(OcrError::Io(e)),
        }

        let mut images = Vec::new();
        for page in 1u32.. {
            match find_page_image(output_dir, page) {
                Some(path) => images.push(path),
                None => break,
            }
        }
        Ok(images)
    }

    /// Run pdftotext on a single page of a PDF file.
    fn extract_pdf_page_text(&self, pdf_path: &Path, page: u32) -> Result<String, OcrError> {
        let page_str = page.to_string();
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg("-")
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::Failed(format!("pdftotext failed: {}", stderr)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::ToolNotFound(
                "pdftotext (install poppler-utils)".to_string(),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

/// Find the image file for a specific page number.
///
/// pdftoppm names files page-01.png, page-02.png; documents with many
/// pages use more digits.
fn find_page_image(dir: &Path, page: u32) -> Option<PathBuf> {
    for digits in [1, 2, 3, 4] {
        let filename = format!("page-{:0width$}.png", page, width = digits);
        let path = dir.join(&filename);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Requested languages absent from `tesseract --list-langs` output.
fn missing_languages(requested: &str, listing: &str) -> Vec<String> {
    let available: Vec<&str> = listing
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.contains(' '))
        .collect();

    requested
        .split('+')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|l| !available.contains(l))
        .map(|l| l.to_string())
        .collect()
}

fn nonspace_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_languages() {
        let listing = "List of available languages (3):\neng\nosd\npol\n";
        assert!(missing_languages("pol", listing).is_empty());
        assert!(missing_languages("pol+eng", listing).is_empty());
        assert_eq!(missing_languages("deu", listing), vec!["deu"]);
        assert_eq!(missing_languages("pol+deu", listing), vec!["deu"]);
    }

    #[test]
    fn test_find_page_image_naming() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("page-03.png"), b"x").unwrap();
        std::fs::write(dir.path().join("page-012.png"), b"x").unwrap();

        assert_eq!(
            find_page_image(dir.path(), 3).unwrap().file_name().unwrap(),
            "page-03.png"
        );
        assert_eq!(
            find_page_image(dir.path(), 12)
                .unwrap()
                .file_name()
                .unwrap(),
            "page-012.png"
        );
        assert!(find_page_image(dir.path(), 4).is_none());
    }

    #[test]
    fn test_nonspace_chars() {
        assert_eq!(nonspace_chars("a b\nc\t"), 3);
        assert_eq!(nonspace_chars("   "), 0);
    }
}
