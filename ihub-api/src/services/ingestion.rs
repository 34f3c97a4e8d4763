//! Influencer Data Ingestion
//!
//! Validation and normalization for externally sourced influencer rows.
//! The MVP path is CSV upload; API sync and self-reported data reuse the
//! same normalized shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("hard-coded pattern is valid"));

/// Ingestion validation errors
#[derive(Debug, Error, PartialEq)]
pub enum IngestionError {
    #[error("Missing handle")]
    MissingHandle,

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Invalid profile URL: {0}")]
    InvalidUrl(String),
}

/// Social platform the row was sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Youtube,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Linkedin => "linkedin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "instagram" => Some(Platform::Instagram),
            "youtube" => Some(Platform::Youtube),
            "linkedin" => Some(Platform::Linkedin),
            _ => None,
        }
    }
}

/// One row of an MVP CSV upload, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct CsvIngestionRow {
    pub handle: String,
    pub platform: String,
    pub followers: u64,
    pub url: String,
    /// Comma-separated niche tags, split and trimmed during normalization
    pub niche_tags: String,
}

/// Unified shape after processing raw data from any source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedInfluencerData {
    pub username: String,
    pub platform: Platform,
    /// External id (e.g. YouTube channel id); the handle for CSV uploads
    pub platform_id: String,
    pub display_name: Option<String>,
    pub follower_count: u64,
    /// 0.0 to 1.0 (0.05 = 5%), unknown for CSV uploads
    pub engagement_rate: Option<f64>,
    pub profile_url: String,
    pub tags: Vec<String>,
    /// Raw metrics snapshot kept for historical tracking
    pub raw_metrics_snapshot: serde_json::Value,
}

/// Split a comma-separated tag list, trimming whitespace and dropping
/// empty entries
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

impl CsvIngestionRow {
    /// Validate the row and convert it to the normalized shape
    pub fn normalize(&self) -> Result<NormalizedInfluencerData, IngestionError> {
        let handle = self.handle.trim();
        if handle.is_empty() {
            return Err(IngestionError::MissingHandle);
        }

        let platform = Platform::parse(&self.platform)
            .ok_or_else(|| IngestionError::UnknownPlatform(self.platform.clone()))?;

        if !URL_PATTERN.is_match(&self.url) {
            return Err(IngestionError::InvalidUrl(self.url.clone()));
        }

        Ok(NormalizedInfluencerData {
            username: handle.to_string(),
            platform,
            platform_id: handle.to_string(),
            display_name: None,
            follower_count: self.followers,
            engagement_rate: None,
            profile_url: self.url.clone(),
            tags: split_tags(&self.niche_tags),
            raw_metrics_snapshot: serde_json::json!({
                "followers": self.followers,
                "source": "manual_csv",
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> CsvIngestionRow {
        CsvIngestionRow {
            handle: "fit_jane".to_string(),
            platform: "Instagram".to_string(),
            followers: 12_500,
            url: "https://instagram.com/fit_jane".to_string(),
            niche_tags: "fitness, yoga , nutrition".to_string(),
        }
    }

    #[test]
    fn test_normalize_valid_row() {
        let data = sample_row().normalize().expect("row should normalize");
        assert_eq!(data.username, "fit_jane");
        assert_eq!(data.platform, Platform::Instagram);
        assert_eq!(data.follower_count, 12_500);
        assert_eq!(data.tags, vec!["fitness", "yoga", "nutrition"]);
        assert_eq!(data.raw_metrics_snapshot["source"], "manual_csv");
    }

    #[test]
    fn test_blank_handle_rejected() {
        let mut row = sample_row();
        row.handle = "   ".to_string();
        assert_eq!(row.normalize().unwrap_err(), IngestionError::MissingHandle);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let mut row = sample_row();
        row.platform = "myspace".to_string();
        assert!(matches!(
            row.normalize().unwrap_err(),
            IngestionError::UnknownPlatform(_)
        ));
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut row = sample_row();
        row.url = "instagram.com/fit_jane".to_string();
        assert!(matches!(
            row.normalize().unwrap_err(),
            IngestionError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_split_tags_handles_empties() {
        assert_eq!(split_tags("a,, b ,"), vec!["a", "b"]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn test_platform_round_trip() {
        for platform in [Platform::Instagram, Platform::Youtube, Platform::Linkedin] {
            assert_eq!(Platform::parse(platform.as_str()), Some(platform));
        }
    }
}
