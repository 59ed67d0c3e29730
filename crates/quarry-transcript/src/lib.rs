//! Client side of the external video transcript service.

pub mod error;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod provider;
pub mod types;

pub use error::TranscriptError;
pub use http::{HttpTranscriptProvider, TranscriptConfig};
pub use provider::{TranscriptFuture, TranscriptProvider};
pub use types::TranscriptEntry;
