use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::types::{Chunk, Document};

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SplitterConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl SplitterConfig {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` unless `chunk_size > chunk_overlap`.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.chunk_overlap >= self.chunk_size {
            return Err(DocumentError::InvalidConfiguration(format!(
                "chunk_size ({}) must be greater than chunk_overlap ({})",
                self.chunk_size, self.chunk_overlap
            )));
        }
        Ok(())
    }

    /// Offset advance between consecutive chunks.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }
}

/// Cuts text into fixed-size windows that overlap by `chunk_overlap`
/// characters. Offsets count chars, so a window never splits a code point.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `chunk_overlap >= chunk_size`.
    pub fn new(config: SplitterConfig) -> Result<Self, DocumentError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // byte offset of every char start, plus the end of the text
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_len = bounds.len() - 1;

        (0..char_len)
            .step_by(self.config.stride())
            .map(|start| {
                let end = (start + self.config.chunk_size).min(char_len);
                text[bounds[start]..bounds[end]].to_owned()
            })
            .collect()
    }

    /// Split every text in order and concatenate the results.
    #[must_use]
    pub fn split_many<I, S>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.split(text.as_ref()))
            .collect()
    }

    /// Split a document, tagging each chunk with the document's metadata and
    /// its position within the document.
    #[must_use]
    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.content)
            .into_iter()
            .enumerate()
            .map(|(i, content)| Chunk {
                metadata: document.metadata.clone(),
                chunk_index: i,
                content,
            })
            .collect()
    }
}
