use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Txt,
    Pdf,
    Youtube,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Youtube => "youtube",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-document provenance, tagged by `source_kind` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source_kind", rename_all = "lowercase")]
pub enum DocumentMetadata {
    Txt {
        file_path: PathBuf,
        encoding: String,
        file_size: u64,
    },
    Pdf {
        file_path: PathBuf,
        page_count: usize,
        file_size: u64,
    },
    Youtube {
        video_id: String,
        url: String,
        entry_count: usize,
    },
}

impl DocumentMetadata {
    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        match self {
            Self::Txt { .. } => SourceKind::Txt,
            Self::Pdf { .. } => SourceKind::Pdf,
            Self::Youtube { .. } => SourceKind::Youtube,
        }
    }

    /// File path or URL the document came from.
    #[must_use]
    pub fn source(&self) -> Cow<'_, str> {
        match self {
            Self::Txt { file_path, .. } | Self::Pdf { file_path, .. } => {
                file_path.to_string_lossy()
            }
            Self::Youtube { url, .. } => Cow::Borrowed(url),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub metadata: DocumentMetadata,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    #[serde(flatten)]
    pub metadata: DocumentMetadata,
    pub chunk_index: usize,
    pub content: String,
}
