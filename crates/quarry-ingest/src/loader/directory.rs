use std::path::{Path, PathBuf};
use std::pin::Pin;

use super::TextLoader;
use crate::{Document, DocumentError, DocumentLoader};

/// Loads every `.txt` file below a directory, one document per file.
///
/// Files are visited depth-first in file-name order. Hidden files and ignore
/// files get no special treatment. The first file that fails to load aborts
/// the whole directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLoader {
    text: TextLoader,
}

impl DirectoryLoader {
    #[must_use]
    pub fn new(text: TextLoader) -> Self {
        Self { text }
    }

    /// Text files below `root`, in load order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory tree cannot be walked.
    pub fn text_files(&self, root: &Path) -> Result<Vec<PathBuf>, DocumentError> {
        let mut files = Vec::new();
        let walker = ignore::WalkBuilder::new(root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_some_and(|ft| ft.is_file())
                && self.is_supported(entry.path())
            {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(ext))
            })
    }

    async fn load_dir(&self, root: &Path) -> Result<Vec<Document>, DocumentError> {
        let meta = tokio::fs::metadata(root)
            .await
            .map_err(|e| DocumentError::from_io(root, e))?;
        if !meta.is_dir() {
            return Err(DocumentError::UnsupportedType(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let files = self.text_files(root)?;
        tracing::debug!(root = %root.display(), files = files.len(), "walking directory");

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            documents.extend(self.text.load(file).await?);
        }
        Ok(documents)
    }
}

impl DocumentLoader for DirectoryLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        Box::pin(async move { self.load_dir(&path).await })
    }

    fn supported_extensions(&self) -> &[&str] {
        self.text.supported_extensions()
    }
}
