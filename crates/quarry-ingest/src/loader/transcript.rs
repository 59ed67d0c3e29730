use std::sync::Arc;

use quarry_transcript::TranscriptProvider;

use crate::source::extract_video_id;
use crate::{Document, DocumentError, DocumentMetadata};

/// Turns a video URL into a single document holding its transcript.
#[derive(Clone)]
pub struct TranscriptLoader {
    provider: Arc<dyn TranscriptProvider>,
}

impl TranscriptLoader {
    #[must_use]
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// # Errors
    ///
    /// Returns `InvalidReference` if no video id can be extracted from `url`,
    /// or `ExternalService` if the transcript fetch fails.
    pub async fn load_url(&self, url: &str) -> Result<Vec<Document>, DocumentError> {
        let video_id = extract_video_id(url)?;
        let entries = self.provider.fetch(&video_id).await?;

        let content = entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(
            video_id = %video_id,
            entries = entries.len(),
            provider = self.provider.name(),
            "transcript loaded"
        );

        Ok(vec![Document {
            metadata: DocumentMetadata::Youtube {
                video_id,
                url: url.to_owned(),
                entry_count: entries.len(),
            },
            content,
        }])
    }
}
