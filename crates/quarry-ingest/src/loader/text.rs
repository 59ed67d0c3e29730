use std::path::Path;
use std::pin::Pin;

use encoding_rs::{Encoding, UTF_8};

use super::checked_file;
use crate::{DEFAULT_MAX_FILE_SIZE, Document, DocumentError, DocumentLoader, DocumentMetadata};

#[derive(Debug, Clone)]
pub struct TextLoader {
    pub max_file_size: u64,
    encoding: &'static Encoding,
}

impl Default for TextLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            encoding: UTF_8,
        }
    }
}

impl TextLoader {
    /// Build a loader that decodes files with the encoding named by `label`
    /// (`utf-8`, `latin1`, `utf-16le`, ...).
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `label` names no known encoding.
    pub fn with_encoding(label: &str, max_file_size: u64) -> Result<Self, DocumentError> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            DocumentError::InvalidConfiguration(format!("unknown text encoding: {label}"))
        })?;
        Ok(Self {
            max_file_size,
            encoding,
        })
    }

    #[must_use]
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    async fn load_file(&self, path: &Path) -> Result<Vec<Document>, DocumentError> {
        let (path, file_size) = checked_file(path, self.max_file_size).await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DocumentError::from_io(&path, e))?;

        // verbatim: a BOM stays in the text, malformed input is an error
        let content = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(&bytes)
            .ok_or_else(|| DocumentError::Decode {
                path: path.clone(),
                encoding: self.encoding.name(),
            })?
            .into_owned();

        tracing::debug!(path = %path.display(), file_size, "text file loaded");

        Ok(vec![Document {
            metadata: DocumentMetadata::Txt {
                file_path: path,
                encoding: self.encoding.name().to_owned(),
                file_size,
            },
            content,
        }])
    }
}

impl DocumentLoader for TextLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        Box::pin(async move { self.load_file(&path).await })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "hello world").unwrap();

        let docs = TextLoader::default().load(&file).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "hello world");
        match &docs[0].metadata {
            DocumentMetadata::Txt {
                encoding,
                file_size,
                ..
            } => {
                assert_eq!(encoding, "UTF-8");
                assert_eq!(*file_size, 11);
            }
            other => panic!("expected txt metadata, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_nonexistent_file() {
        let result = TextLoader::default()
            .load(Path::new("/nonexistent/file.txt"))
            .await;
        assert!(matches!(result, Err(DocumentError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.txt");
        std::fs::write(&file, "").unwrap();

        let docs = TextLoader::default().load(&file).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.is_empty());
    }

    #[tokio::test]
    async fn content_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bom.txt");
        std::fs::write(&file, "\u{feff}line one\r\nline two\n").unwrap();

        let docs = TextLoader::default().load(&file).await.unwrap();
        assert_eq!(docs[0].content, "\u{feff}line one\r\nline two\n");
    }

    #[tokio::test]
    async fn latin1_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("latin.txt");
        std::fs::write(&file, [b'c', b'a', b'f', 0xE9]).unwrap();

        let loader = TextLoader::with_encoding("latin1", DEFAULT_MAX_FILE_SIZE).unwrap();
        let docs = loader.load(&file).await.unwrap();
        assert_eq!(docs[0].content, "café");
        assert!(matches!(
            &docs[0].metadata,
            DocumentMetadata::Txt { encoding, .. } if encoding == "windows-1252"
        ));
    }

    #[tokio::test]
    async fn invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.txt");
        std::fs::write(&file, [b'o', b'k', 0xFF, 0xFE, b'!']).unwrap();

        let result = TextLoader::default().load(&file).await;
        assert!(matches!(
            result,
            Err(DocumentError::Decode {
                encoding: "UTF-8",
                ..
            })
        ));
    }

    #[test]
    fn unknown_encoding_label() {
        let result = TextLoader::with_encoding("not-an-encoding", DEFAULT_MAX_FILE_SIZE);
        assert!(matches!(result, Err(DocumentError::InvalidConfiguration(_))));
    }

    #[test]
    fn encoding_label_is_normalized() {
        let loader = TextLoader::with_encoding(" UTF8 ", DEFAULT_MAX_FILE_SIZE).unwrap();
        assert_eq!(loader.encoding(), "UTF-8");
    }

    #[tokio::test]
    async fn metadata_path_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "data").unwrap();

        let docs = TextLoader::default().load(&file).await.unwrap();
        let canonical = std::fs::canonicalize(&file).unwrap();
        assert_eq!(docs[0].metadata.source(), canonical.display().to_string());
    }

    #[tokio::test]
    async fn file_too_large_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.txt");
        std::fs::write(&file, "x").unwrap();

        let loader = TextLoader {
            max_file_size: 0,
            ..TextLoader::default()
        };
        let result = loader.load(&file).await;
        assert!(matches!(result, Err(DocumentError::FileTooLarge(1))));
    }

    #[test]
    fn supported_extensions_list() {
        assert_eq!(TextLoader::default().supported_extensions(), &["txt"]);
    }
}
