use serde::{Deserialize, Serialize};

/// One timed line of a video transcript. `start` and `duration` are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptEntry {
    #[must_use]
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_entry() {
        let entry: TranscriptEntry =
            serde_json::from_str(r#"{"text":"hello","start":1.5,"duration":2.0}"#).unwrap();
        assert_eq!(entry, TranscriptEntry::new("hello", 1.5, 2.0));
    }

    #[test]
    fn timing_defaults_to_zero() {
        let entry: TranscriptEntry = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(entry.text, "hi");
        assert!(entry.start.abs() < f64::EPSILON);
        assert!(entry.duration.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_text_is_rejected() {
        let result = serde_json::from_str::<TranscriptEntry>(r#"{"start":0.0}"#);
        assert!(result.is_err());
    }
}
