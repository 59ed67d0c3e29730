mod env;


use std::path::Path;

use anyhow::{Context, bail};
use quarry_ingest::{LoaderConfig, SplitterConfig, TextLoader};
use quarry_transcript::TranscriptConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub splitter: SplitterConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.splitter
            .validate()
            .context("invalid [splitter] settings")?;
        TextLoader::with_encoding(&self.loader.encoding, self.loader.max_file_size)
            .context("invalid [loader] settings")?;

        if self.transcript.enabled {
            let url = url::Url::parse(&self.transcript.base_url)
                .with_context(|| format!("invalid transcript.base_url: {}", self.transcript.base_url))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("transcript.base_url must be http or https, got {}", url.scheme());
            }
            if self.transcript.timeout == 0 {
                bail!("transcript.timeout must be greater than 0");
            }
        }
        Ok(())
    }
}
