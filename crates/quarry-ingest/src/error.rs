use std::path::{Path, PathBuf};

use quarry_transcript::TranscriptError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported input: {0}")]
    UnsupportedType(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid video reference: {0}")]
    InvalidReference(String),

    #[error("transcript service failed: {0}")]
    ExternalService(#[from] TranscriptError),

    #[error("no readable text could be extracted from {}", .0.display())]
    NoReadableText(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("file too large: {0} bytes")]
    FileTooLarge(u64),

    #[error("{} is not valid {encoding}", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Map a filesystem error on `path`, keeping "not found" distinguishable.
    pub(crate) fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.to_path_buf())
        } else {
            Self::Io(err)
        }
    }
}
