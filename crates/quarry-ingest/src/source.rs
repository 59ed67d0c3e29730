use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::DocumentError;

const VIDEO_URL_MARKERS: [&str; 4] = [
    "youtube.com/watch?v=",
    "youtu.be/",
    "youtube.com/embed/",
    "youtube.com/v/",
];

static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"youtube\.com/watch\?v=([^&]+)",
        r"youtu\.be/([^?]+)",
        r"youtube\.com/embed/([^?]+)",
        r"youtube\.com/v/([^?]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// An input reference, classified once at entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    TextFile(PathBuf),
    PdfFile(PathBuf),
    Directory(PathBuf),
    VideoUrl(String),
    Unsupported(String),
}

impl SourceRef {
    /// Resolve a path or URL into its source variant.
    ///
    /// Video URLs win over everything else, then existing directories, then
    /// the `.pdf` / `.txt` suffix (case-insensitive). Suffix classification
    /// does not touch the filesystem, so missing files still classify.
    #[must_use]
    pub fn classify(reference: &str) -> Self {
        if is_video_url(reference) {
            return Self::VideoUrl(reference.to_owned());
        }

        let path = Path::new(reference);
        if path.is_dir() {
            return Self::Directory(path.to_path_buf());
        }

        let lower = reference.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Self::PdfFile(path.to_path_buf())
        } else if lower.ends_with(".txt") {
            Self::TextFile(path.to_path_buf())
        } else {
            Self::Unsupported(reference.to_owned())
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::TextFile(_) => "text file",
            Self::PdfFile(_) => "pdf file",
            Self::Directory(_) => "directory",
            Self::VideoUrl(_) => "video url",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextFile(p) | Self::PdfFile(p) | Self::Directory(p) => {
                write!(f, "{}: {}", self.kind_name(), p.display())
            }
            Self::VideoUrl(s) | Self::Unsupported(s) => write!(f, "{}: {s}", self.kind_name()),
        }
    }
}

#[must_use]
pub fn is_video_url(reference: &str) -> bool {
    VIDEO_URL_MARKERS.iter().any(|m| reference.contains(m))
}

/// Pull the platform video identifier out of a video URL.
///
/// # Errors
///
/// Returns `InvalidReference` when none of the known URL shapes yields an id.
pub fn extract_video_id(url: &str) -> Result<String, DocumentError> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| DocumentError::InvalidReference(url.to_owned()))
}
