use std::path::Path;
use std::pin::Pin;

use unicode_general_category::{GeneralCategory, get_general_category};

use super::checked_file;
use crate::{DEFAULT_MAX_FILE_SIZE, Document, DocumentError, DocumentLoader, DocumentMetadata};

const MIN_READABLE_CHARS: usize = 10;
const MIN_PRINTABLE_RATIO: f64 = 0.7;
const MAX_BASE64_RATIO: f64 = 0.9;
const BASE64_SPACE_WINDOW: usize = 100;

pub struct PdfLoader {
    pub max_file_size: u64,
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl PdfLoader {
    async fn load_file(&self, path: &Path) -> Result<Vec<Document>, DocumentError> {
        let (path, file_size) = checked_file(path, self.max_file_size).await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DocumentError::from_io(&path, e))?;

        let pages = tokio::task::spawn_blocking(move || extract_pages(&bytes))
            .await
            .map_err(|e| DocumentError::Pdf(format!("text extraction aborted: {e}")))??;

        let content = assemble_pages(&pages);
        if content.trim().is_empty() {
            return Err(DocumentError::NoReadableText(path));
        }

        tracing::debug!(path = %path.display(), pages = pages.len(), file_size, "PDF loaded");

        Ok(vec![Document {
            metadata: DocumentMetadata::Pdf {
                file_path: path,
                page_count: pages.len(),
                file_size,
            },
            content,
        }])
    }
}

impl DocumentLoader for PdfLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        Box::pin(async move { self.load_file(&path).await })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }
}

/// Extract text per page. When whole-document extraction fails, retry page
/// by page so a single broken page only loses that page.
fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    match pdf_extract::extract_text_from_mem_by_pages(bytes) {
        Ok(pages) => Ok(pages),
        Err(e) => {
            tracing::warn!("PDF text extraction failed ({e}), retrying page by page");
            let doc = lopdf::Document::load_mem(bytes)
                .map_err(|e| DocumentError::Pdf(e.to_string()))?;
            let numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
            Ok(collect_pages(&numbers, |n| doc.extract_text(&[n])))
        }
    }
}

/// A page that fails to extract becomes an empty page, which
/// `assemble_pages` later skips.
fn collect_pages<E: std::fmt::Display>(
    numbers: &[u32],
    mut extract: impl FnMut(u32) -> Result<String, E>,
) -> Vec<String> {
    numbers
        .iter()
        .map(|&number| {
            extract(number).unwrap_or_else(|e| {
                tracing::warn!(page = number, "could not extract text from PDF page: {e}");
                String::new()
            })
        })
        .collect()
}

/// Join the readable pages, each preceded by a `--- Page N ---` marker.
/// Blank and unreadable pages are skipped but keep their page number.
fn assemble_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for (i, page) in pages.iter().enumerate() {
        let number = i + 1;
        if page.trim().is_empty() {
            tracing::debug!(page = number, "skipping blank PDF page");
            continue;
        }

        let cleaned: String = page
            .chars()
            .filter(|c| *c != '\0' && *c != char::REPLACEMENT_CHARACTER)
            .collect();
        if !is_readable(&cleaned) {
            tracing::warn!(page = number, "PDF page contains unreadable text, skipping");
            continue;
        }

        text.push_str(&format!("\n--- Page {number} ---\n"));
        text.push_str(&cleaned);
        text.push('\n');
    }
    text
}

/// Rejects short fragments, control-character noise and base64-like blobs.
#[allow(clippy::cast_precision_loss)]
fn is_readable(text: &str) -> bool {
    let total = text.chars().count();
    if total < MIN_READABLE_CHARS {
        return false;
    }

    let base64_like = text
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '+' | '/' | '='))
        .count();
    let spaced_early = text.chars().take(BASE64_SPACE_WINDOW).any(|c| c == ' ');
    if base64_like as f64 / total as f64 > MAX_BASE64_RATIO && !spaced_early {
        return false;
    }

    let printable = text
        .chars()
        .filter(|c| is_printable(*c) || c.is_whitespace())
        .count();
    printable as f64 / total as f64 >= MIN_PRINTABLE_RATIO
}

/// Everything except control, format, private-use, surrogate, unassigned
/// and separator characters. The ASCII space is the one printable separator.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}
