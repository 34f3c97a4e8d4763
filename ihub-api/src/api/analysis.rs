//! Text analysis endpoints
//!
//! Synchronous invocation surface over the rule-based analysis services.
//! Every operation is total: empty text and empty brand lists are valid
//! inputs that produce empty or neutral results, never errors.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::services::{bio_categorizer, brand_mentions, sentiment};

#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    pub categories: Vec<String>,
}

/// POST /api/v1/analysis/categorize
pub async fn categorize(Json(payload): Json<CategorizeRequest>) -> Json<CategorizeResponse> {
    Json(CategorizeResponse {
        categories: bio_categorizer::categorize(&payload.text),
    })
}

#[derive(Debug, Deserialize)]
pub struct BrandMentionsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub brand_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BrandMentionsResponse {
    pub mentions: Vec<String>,
}

/// POST /api/v1/analysis/brand-mentions
pub async fn detect_brand_mentions(
    Json(payload): Json<BrandMentionsRequest>,
) -> Json<BrandMentionsResponse> {
    Json(BrandMentionsResponse {
        mentions: brand_mentions::detect(&payload.text, &payload.brand_names),
    })
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SentimentResponse {
    pub score: f64,
}

/// POST /api/v1/analysis/sentiment
pub async fn analyze_sentiment(
    Json(payload): Json<SentimentRequest>,
) -> Json<SentimentResponse> {
    Json(SentimentResponse {
        score: sentiment::score(&payload.text),
    })
}
