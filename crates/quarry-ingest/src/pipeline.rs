use super::{Chunk, Document, DocumentError, SourceLoader, TextSplitter};

/// Load one or more references and cut the resulting documents into chunks.
pub struct IngestionPipeline {
    loader: SourceLoader,
    splitter: TextSplitter,
}

impl IngestionPipeline {
    #[must_use]
    pub fn new(loader: SourceLoader, splitter: TextSplitter) -> Self {
        Self { loader, splitter }
    }

    #[must_use]
    pub fn loader(&self) -> &SourceLoader {
        &self.loader
    }

    #[must_use]
    pub fn splitter(&self) -> &TextSplitter {
        &self.splitter
    }

    /// # Errors
    ///
    /// Returns an error if any reference fails to load.
    pub async fn load_all<S: AsRef<str>>(
        &self,
        references: &[S],
    ) -> Result<Vec<Document>, DocumentError> {
        let mut documents = Vec::new();
        for reference in references {
            documents.extend(self.loader.load(reference.as_ref()).await?);
        }
        Ok(documents)
    }

    /// Load a reference and split it. Chunk indices restart at zero for every
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub async fn ingest(&self, reference: &str) -> Result<Vec<Chunk>, DocumentError> {
        let documents = self.loader.load(reference).await?;
        let chunks: Vec<Chunk> = documents
            .iter()
            .flat_map(|doc| self.splitter.split_document(doc))
            .collect();
        tracing::info!(reference, documents = documents.len(), chunks = chunks.len(), "ingested");
        Ok(chunks)
    }

    /// Load every reference in order and return the flat chunk text sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if any reference fails to load.
    pub async fn split_all<S: AsRef<str>>(
        &self,
        references: &[S],
    ) -> Result<Vec<String>, DocumentError> {
        let documents = self.load_all(references).await?;
        Ok(self
            .splitter
            .split_many(documents.iter().map(|d| d.content.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoaderConfig, SplitterConfig};

    fn pipeline(chunk_size: usize, chunk_overlap: usize) -> IngestionPipeline {
        IngestionPipeline::new(
            SourceLoader::new(&LoaderConfig::default()).unwrap(),
            TextSplitter::new(SplitterConfig {
                chunk_size,
                chunk_overlap,
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn ingest_numbers_chunks_per_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "abcdefghij").unwrap();
        std::fs::write(dir.path().join("b.txt"), "xyz").unwrap();

        let chunks = pipeline(4, 1)
            .ingest(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let summary: Vec<_> = chunks
            .iter()
            .map(|c| (c.chunk_index, c.content.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(0, "abcd"), (1, "defg"), (2, "ghij"), (3, "j"), (0, "xyz")]
        );
    }

    #[tokio::test]
    async fn split_all_keeps_reference_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("z.txt");
        let second = dir.path().join("a.txt");
        std::fs::write(&first, "first").unwrap();
        std::fs::write(&second, "second").unwrap();

        let refs = [first.to_str().unwrap(), second.to_str().unwrap()];
        let chunks = pipeline(100, 0).split_all(&refs).await.unwrap();
        assert_eq!(chunks, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn failing_reference_aborts() {
        let refs = ["/nonexistent/one.txt"];
        let result = pipeline(10, 0).split_all(&refs).await;
        assert!(matches!(result, Err(DocumentError::FileNotFound(_))));
    }
}
