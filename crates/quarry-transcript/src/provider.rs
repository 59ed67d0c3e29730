use std::future::Future;
use std::pin::Pin;

use crate::error::TranscriptError;
use crate::types::TranscriptEntry;

pub type TranscriptFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<TranscriptEntry>, TranscriptError>> + Send + 'a>>;

/// Source of video transcripts.
///
/// Implementations are plain handles: construct one, pass it to whatever needs
/// transcripts, drop it when done.
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the ordered transcript entries of a video.
    fn fetch<'a>(&'a self, video_id: &'a str) -> TranscriptFuture<'a>;

    fn name(&self) -> &'static str;
}
