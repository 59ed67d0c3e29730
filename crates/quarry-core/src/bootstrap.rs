//! Builds loader, splitter and transcript handles from a validated `Config`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use quarry_ingest::{IngestionPipeline, SourceLoader, TextSplitter};
use quarry_transcript::{HttpTranscriptProvider, TranscriptProvider};

use crate::config::Config;

/// Priority: explicit path > `QUARRY_CONFIG` env > `config/default.toml`.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("QUARRY_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

/// # Errors
///
/// Returns an error if the splitter settings are invalid.
pub fn build_splitter(config: &Config) -> anyhow::Result<TextSplitter> {
    TextSplitter::new(config.splitter.clone()).context("failed to build text splitter")
}

/// `None` when the transcript service is disabled.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built from the settings.
pub fn build_transcript_provider(
    config: &Config,
) -> anyhow::Result<Option<Arc<dyn TranscriptProvider>>> {
    if !config.transcript.enabled {
        tracing::debug!("transcript service disabled");
        return Ok(None);
    }
    let provider = HttpTranscriptProvider::new(&config.transcript)
        .context("failed to build transcript client")?;
    Ok(Some(Arc::new(provider)))
}

/// # Errors
///
/// Returns an error if the loader or transcript settings are invalid.
pub fn build_loader(config: &Config) -> anyhow::Result<SourceLoader> {
    let loader = SourceLoader::new(&config.loader).context("failed to build document loader")?;
    Ok(match build_transcript_provider(config)? {
        Some(provider) => loader.with_transcripts(provider),
        None => loader,
    })
}

/// # Errors
///
/// Returns an error if any component cannot be built.
pub fn build_pipeline(config: &Config) -> anyhow::Result<IngestionPipeline> {
    Ok(IngestionPipeline::new(
        build_loader(config)?,
        build_splitter(config)?,
    ))
}
