use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TranscriptError;
use crate::provider::{TranscriptFuture, TranscriptProvider};
use crate::types::TranscriptEntry;

const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
const ERROR_BODY_LIMIT: usize = 1024;

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8090".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_languages() -> Vec<String> {
    vec!["en".into()]
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Preferred transcript languages, most preferred first.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout: default_timeout(),
            languages: default_languages(),
            max_response_bytes: default_max_response_bytes(),
            auth_token: None,
        }
    }
}

/// Transcript provider backed by an HTTP JSON endpoint.
///
/// `GET {base_url}/transcripts/{video_id}?lang=en,de` must answer with a JSON
/// array of `{text, start, duration}` objects.
pub struct HttpTranscriptProvider {
    client: reqwest::Client,
    base_url: Url,
    languages: Vec<String>,
    max_response_bytes: usize,
    auth_token: Option<String>,
}

impl HttpTranscriptProvider {
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid base URL or the HTTP
    /// client cannot be built.
    pub fn new(config: &TranscriptConfig) -> Result<Self, TranscriptError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TranscriptError::Other(format!(
                "transcript URL cannot be a base: {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("quarry/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            languages: config.languages.clone(),
            max_response_bytes: config.max_response_bytes,
            auth_token: config.auth_token.clone(),
        })
    }

    fn transcript_url(&self, video_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["transcripts", video_id]);
        }
        if !self.languages.is_empty() {
            url.query_pairs_mut()
                .append_pair("lang", &self.languages.join(","));
        }
        url
    }

    async fn fetch_entries(&self, video_id: &str) -> Result<Vec<TranscriptEntry>, TranscriptError> {
        let url = self.transcript_url(video_id);
        tracing::debug!(%url, "fetching transcript");

        let mut req = self
            .client
            .get(url)
            .header("Accept", "application/json");
        if let Some(token) = &self.auth_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TranscriptError::NotFound(video_id.to_owned()));
        }
        if !status.is_success() {
            let limit = ERROR_BODY_LIMIT.min(self.max_response_bytes);
            let body = read_error_body(resp, limit).await;
            return Err(TranscriptError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if let Some(len) = resp.content_length()
            && usize::try_from(len).map_or(true, |len| len > self.max_response_bytes)
        {
            return Err(TranscriptError::TooLarge(
                usize::try_from(len).unwrap_or(usize::MAX),
            ));
        }

        let bytes = resp.bytes().await?;
        if bytes.len() > self.max_response_bytes {
            return Err(TranscriptError::TooLarge(bytes.len()));
        }

        let entries: Vec<TranscriptEntry> = serde_json::from_slice(&bytes)?;
        tracing::debug!(video_id, entries = entries.len(), "transcript fetched");
        Ok(entries)
    }
}

/// Read at most `limit` bytes of an error response, lossily decoded.
async fn read_error_body(mut resp: reqwest::Response, limit: usize) -> String {
    let mut body = Vec::new();
    while body.len() < limit {
        match resp.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("failed to read error body: {e}");
                break;
            }
        }
    }
    body.truncate(limit);
    String::from_utf8_lossy(&body).into_owned()
}

impl TranscriptProvider for HttpTranscriptProvider {
    fn fetch<'a>(&'a self, video_id: &'a str) -> TranscriptFuture<'a> {
        Box::pin(self.fetch_entries(video_id))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider_for(server: &MockServer) -> HttpTranscriptProvider {
        let config = TranscriptConfig {
            base_url: server.uri(),
            ..TranscriptConfig::default()
        };
        HttpTranscriptProvider::new(&config).unwrap()
    }

    #[test]
    fn transcript_url_appends_segments_and_languages() {
        let config = TranscriptConfig {
            base_url: "http://svc.local/api/".into(),
            languages: vec!["en".into(), "de".into()],
            ..TranscriptConfig::default()
        };
        let provider = HttpTranscriptProvider::new(&config).unwrap();
        assert_eq!(
            provider.transcript_url("abc123").as_str(),
            "http://svc.local/api/transcripts/abc123?lang=en%2Cde"
        );
    }

    #[test]
    fn transcript_url_without_languages_has_no_query() {
        let config = TranscriptConfig {
            base_url: "http://svc.local".into(),
            languages: Vec::new(),
            ..TranscriptConfig::default()
        };
        let provider = HttpTranscriptProvider::new(&config).unwrap();
        assert_eq!(
            provider.transcript_url("abc").as_str(),
            "http://svc.local/transcripts/abc"
        );
    }

    #[test]
    fn invalid_base_url_rejected() {
        let config = TranscriptConfig {
            base_url: "not a url".into(),
            ..TranscriptConfig::default()
        };
        assert!(matches!(
            HttpTranscriptProvider::new(&config),
            Err(TranscriptError::Url(_))
        ));
    }

    #[test]
    fn non_base_url_rejected() {
        let config = TranscriptConfig {
            base_url: "mailto:someone@example.com".into(),
            ..TranscriptConfig::default()
        };
        assert!(matches!(
            HttpTranscriptProvider::new(&config),
            Err(TranscriptError::Other(_))
        ));
    }

    #[tokio::test]
    async fn fetch_returns_entries_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcripts/abc123"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"text": "never gonna", "start": 0.0, "duration": 1.2},
                {"text": "give you up", "start": 1.2, "duration": 1.4}
            ])))
            .mount(&server)
            .await;

        let entries = provider_for(&server).fetch("abc123").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "never gonna");
        assert_eq!(entries[1].text, "give you up");
    }

    #[tokio::test]
    async fn fetch_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcripts/vid"))
            .and(header("Authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let config = TranscriptConfig {
            base_url: server.uri(),
            auth_token: Some("s3cret".into()),
            ..TranscriptConfig::default()
        };
        let provider = HttpTranscriptProvider::new(&config).unwrap();
        let entries = provider.fetch("vid").await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn fetch_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch("missing").await.unwrap_err();
        assert!(matches!(err, TranscriptError::NotFound(ref id) if id == "missing"));
    }

    #[tokio::test]
    async fn error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("e".repeat(5000)))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch("vid").await.unwrap_err();
        match err {
            TranscriptError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), ERROR_BODY_LIMIT);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch("vid").await.unwrap_err();
        match err {
            TranscriptError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_malformed_body_maps_to_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch("vid").await.unwrap_err();
        assert!(matches!(err, TranscriptError::Json(_)));
    }

    #[tokio::test]
    async fn fetch_oversized_body_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&server)
            .await;

        let config = TranscriptConfig {
            base_url: server.uri(),
            max_response_bytes: 16,
            ..TranscriptConfig::default()
        };
        let provider = HttpTranscriptProvider::new(&config).unwrap();
        let err = provider.fetch("vid").await.unwrap_err();
        assert!(matches!(err, TranscriptError::TooLarge(64)));
    }

    #[test]
    fn config_defaults() {
        let config = TranscriptConfig::default();
        assert!(config.enabled);
        assert_eq!(config.base_url, "http://localhost:8090");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.languages, vec!["en".to_owned()]);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn config_token_never_serialized() {
        let config = TranscriptConfig {
            auth_token: Some("hidden".into()),
            ..TranscriptConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hidden"));
    }
}
