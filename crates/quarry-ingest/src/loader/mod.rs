mod directory;
#[cfg(feature = "pdf")]
mod pdf;
mod text;
mod transcript;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quarry_transcript::TranscriptProvider;
use serde::{Deserialize, Serialize};

pub use directory::DirectoryLoader;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;
pub use text::TextLoader;
pub use transcript::TranscriptLoader;

use crate::source::SourceRef;
use crate::{DEFAULT_MAX_FILE_SIZE, Document, DocumentError, DocumentLoader};

fn default_encoding() -> String {
    "utf-8".into()
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// WHATWG encoding label used for text files.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            max_file_size: default_max_file_size(),
        }
    }
}

/// Canonicalize `path` and stat it, rejecting files over `max_size`.
async fn checked_file(path: &Path, max_size: u64) -> Result<(PathBuf, u64), DocumentError> {
    let canonical = tokio::fs::canonicalize(path)
        .await
        .map_err(|e| DocumentError::from_io(path, e))?;
    let meta = tokio::fs::metadata(&canonical)
        .await
        .map_err(|e| DocumentError::from_io(path, e))?;
    if meta.len() > max_size {
        return Err(DocumentError::FileTooLarge(meta.len()));
    }
    Ok((canonical, meta.len()))
}

/// Single entry point: classifies a path or URL and hands it to the matching
/// loader.
pub struct SourceLoader {
    text: TextLoader,
    directory: DirectoryLoader,
    #[cfg(feature = "pdf")]
    pdf: PdfLoader,
    transcripts: Option<TranscriptLoader>,
}

impl SourceLoader {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configured encoding label is unknown.
    pub fn new(config: &LoaderConfig) -> Result<Self, DocumentError> {
        let text = TextLoader::with_encoding(&config.encoding, config.max_file_size)?;
        Ok(Self {
            directory: DirectoryLoader::new(text.clone()),
            text,
            #[cfg(feature = "pdf")]
            pdf: PdfLoader {
                max_file_size: config.max_file_size,
            },
            transcripts: None,
        })
    }

    #[must_use]
    pub fn with_transcripts(mut self, provider: Arc<dyn TranscriptProvider>) -> Self {
        self.transcripts = Some(TranscriptLoader::new(provider));
        self
    }

    #[must_use]
    pub fn has_transcripts(&self) -> bool {
        self.transcripts.is_some()
    }

    /// Classify `reference` and load it.
    ///
    /// # Errors
    ///
    /// Returns the error of the loader the reference dispatches to, or
    /// `UnsupportedType` if it matches no known shape.
    pub async fn load(&self, reference: &str) -> Result<Vec<Document>, DocumentError> {
        let source = SourceRef::classify(reference);
        tracing::debug!(%source, "classified input");
        self.load_source(&source).await
    }

    /// # Errors
    ///
    /// See [`SourceLoader::load`].
    pub async fn load_source(&self, source: &SourceRef) -> Result<Vec<Document>, DocumentError> {
        let documents = match source {
            SourceRef::TextFile(path) => self.text.load(path).await?,
            SourceRef::Directory(path) => self.directory.load(path).await?,
            #[cfg(feature = "pdf")]
            SourceRef::PdfFile(path) => self.pdf.load(path).await?,
            #[cfg(not(feature = "pdf"))]
            SourceRef::PdfFile(path) => {
                return Err(DocumentError::UnsupportedType(format!(
                    "{} (built without PDF support)",
                    path.display()
                )));
            }
            SourceRef::VideoUrl(url) => {
                let Some(transcripts) = &self.transcripts else {
                    return Err(DocumentError::InvalidConfiguration(
                        "no transcript service configured".into(),
                    ));
                };
                transcripts.load_url(url).await?
            }
            SourceRef::Unsupported(reference) => {
                return Err(DocumentError::UnsupportedType(reference.clone()));
            }
        };

        tracing::info!(%source, documents = documents.len(), "loaded");
        Ok(documents)
    }
}
