//! Test-only mock transcript provider.

use std::sync::{Arc, Mutex};

use crate::error::TranscriptError;
use crate::provider::{TranscriptFuture, TranscriptProvider};
use crate::types::TranscriptEntry;

#[derive(Debug, Clone, Default)]
pub struct MockTranscriptProvider {
    pub entries: Vec<TranscriptEntry>,
    pub fail: bool,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockTranscriptProvider {
    #[must_use]
    pub fn with_entries(entries: Vec<TranscriptEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Build a provider from plain lines, one second apart.
    #[must_use]
    pub fn with_lines(lines: &[&str]) -> Self {
        let entries = (0u32..)
            .zip(lines)
            .map(|(i, line)| TranscriptEntry::new(*line, f64::from(i), 1.0))
            .collect();
        Self::with_entries(entries)
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Video ids passed to `fetch`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl TranscriptProvider for MockTranscriptProvider {
    fn fetch<'a>(&'a self, video_id: &'a str) -> TranscriptFuture<'a> {
        Box::pin(async move {
            self.requested.lock().unwrap().push(video_id.to_owned());
            if self.fail {
                return Err(TranscriptError::Other("mock transcript failure".into()));
            }
            Ok(self.entries.clone())
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
