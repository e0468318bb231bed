use crate::api::RequestError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EMPTY_SITUATION: &str = "Please describe a situation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    #[serde(rename = "cartoon/animation")]
    Cartoon,
    #[serde(rename = "realistic")]
    Realistic,
    #[serde(rename = "meme-style")]
    MemeStyle,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Cartoon, Style::Realistic, Style::MemeStyle];

    pub fn label(self) -> &'static str {
        match self {
            Style::Cartoon => "Cartoon/Animation",
            Style::Realistic => "Realistic",
            Style::MemeStyle => "Meme Style",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Funny,
    Sarcastic,
    Dramatic,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Funny, Mood::Sarcastic, Mood::Dramatic];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Funny => "Funny",
            Mood::Sarcastic => "Sarcastic",
            Mood::Dramatic => "Dramatic",
        }
    }
}

/// Body of `POST /api/generate`.
///
/// Only constructible through [`GenerationRequest::new`], so a value always
/// carries a non-blank situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    situation: String,
    style: Style,
    mood: Mood,
}

impl GenerationRequest {
    pub fn new(situation: &str, style: Style, mood: Mood) -> Result<Self, RequestError> {
        let situation = situation.trim();
        if situation.is_empty() {
            return Err(RequestError::Validation(EMPTY_SITUATION));
        }
        Ok(Self {
            situation: situation.to_string(),
            style,
            mood,
        })
    }

    pub fn situation(&self) -> &str {
        &self.situation
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub image_path: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub filename: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Generated(GenerationResult),
    Failed { error: String, situation: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct BatchOutcome {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub generated: usize,
    #[serde(default)]
    pub results: Vec<BatchEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Checking,
    Connected,
    Disconnected,
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectivityStatus::Checking => "Checking...",
            ConnectivityStatus::Connected => "Connected",
            ConnectivityStatus::Disconnected => "Backend offline",
        };
        f.write_str(label)
    }
}

/// Rewrites Windows separators to `/`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Joins `origin` and a server-relative path with exactly one `/`.
pub fn asset_url(origin: &str, path: &str) -> String {
    let path = normalize_path(path);
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{} B", bytes)
    } else if value < KB * KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_rejects_blank_situation() {
        let err = GenerationRequest::new("   \n\t", Style::Cartoon, Mood::Funny).unwrap_err();
        assert!(matches!(err, RequestError::Validation(EMPTY_SITUATION)));
    }

    #[test]
    fn request_serializes_wire_values() {
        let request = GenerationRequest::new(
            "  When you fix a bug but create three new ones ",
            Style::Cartoon,
            Mood::Funny,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "situation": "When you fix a bug but create three new ones",
                "style": "cartoon/animation",
                "mood": "funny",
            })
        );

        let request = GenerationRequest::new("x", Style::MemeStyle, Mood::Sarcastic).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["style"], "meme-style");
        assert_eq!(value["mood"], "sarcastic");
    }

    #[test]
    fn asset_url_normalizes_backslashes() {
        assert_eq!(
            asset_url("http://localhost:5000", "output\\meme1.png"),
            "http://localhost:5000/output/meme1.png"
        );
    }

    #[test]
    fn asset_url_uses_single_separator() {
        assert_eq!(
            asset_url("http://localhost:5000/", "/static/generated/a.png"),
            "http://localhost:5000/static/generated/a.png"
        );
    }

    #[test]
    fn result_tolerates_missing_text() {
        let result: GenerationResult =
            serde_json::from_value(json!({"image_path": "static\\generated\\x.png"})).unwrap();
        assert_eq!(result.text, "");
        assert_eq!(normalize_path(&result.image_path), "static/generated/x.png");
    }

    #[test]
    fn batch_outcome_mixes_results_and_failures() {
        let outcome: BatchOutcome = serde_json::from_value(json!({
            "total": 2,
            "generated": 1,
            "results": [
                {"image_path": "a.png", "text": "ok", "situation": "one"},
                {"error": "quota exceeded", "situation": "two"},
            ]
        }))
        .unwrap();
        assert_eq!(outcome.total, 2);
        assert!(matches!(outcome.results[0], BatchEntry::Generated(_)));
        assert_eq!(
            outcome.results[1],
            BatchEntry::Failed {
                error: "quota exceeded".to_string(),
                situation: "two".to_string(),
            }
        );
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
