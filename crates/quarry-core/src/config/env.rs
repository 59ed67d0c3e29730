use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_loader();
        self.apply_env_overrides_transcript();
    }

    fn apply_env_overrides_loader(&mut self) {
        if let Ok(v) = std::env::var("QUARRY_LOADER_ENCODING") {
            self.loader.encoding = v;
        }
        if let Ok(v) = std::env::var("QUARRY_LOADER_MAX_FILE_SIZE") {
            if let Ok(bytes) = v.parse::<u64>() {
                self.loader.max_file_size = bytes;
            } else {
                tracing::warn!("ignoring invalid QUARRY_LOADER_MAX_FILE_SIZE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("QUARRY_SPLITTER_CHUNK_SIZE") {
            if let Ok(size) = v.parse::<usize>() {
                self.splitter.chunk_size = size;
            } else {
                tracing::warn!("ignoring invalid QUARRY_SPLITTER_CHUNK_SIZE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("QUARRY_SPLITTER_CHUNK_OVERLAP") {
            if let Ok(overlap) = v.parse::<usize>() {
                self.splitter.chunk_overlap = overlap;
            } else {
                tracing::warn!("ignoring invalid QUARRY_SPLITTER_CHUNK_OVERLAP value: {v}");
            }
        }
    }

    fn apply_env_overrides_transcript(&mut self) {
        if let Ok(v) = std::env::var("QUARRY_TRANSCRIPT_ENABLED") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.transcript.enabled = enabled;
            } else {
                tracing::warn!("ignoring invalid QUARRY_TRANSCRIPT_ENABLED value: {v}");
            }
        }
        if let Ok(v) = std::env::var("QUARRY_TRANSCRIPT_URL") {
            self.transcript.base_url = v;
        }
        if let Ok(v) = std::env::var("QUARRY_TRANSCRIPT_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>() {
                self.transcript.timeout = secs;
            } else {
                tracing::warn!("ignoring invalid QUARRY_TRANSCRIPT_TIMEOUT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("QUARRY_TRANSCRIPT_LANGUAGES") {
            self.transcript.languages = v
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = std::env::var("QUARRY_TRANSCRIPT_TOKEN") {
            self.transcript.auth_token = Some(v);
        }
    }
}
