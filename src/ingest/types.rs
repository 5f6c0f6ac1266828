// src/ingest/types.rs
//! Wire shapes of the analysis service response. Every post field is optional
//! here; `ingest::normalize_posts` decides what is required.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct WirePost {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub top_emotion: Option<String>,
    #[serde(default)]
    pub top_confidence: Option<f64>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct WireResults {
    #[serde(default)]
    pub reddit: Vec<WirePost>,
    #[serde(default)]
    pub mastodon: Vec<WirePost>,
    #[serde(default)]
    pub youtube: Vec<WirePost>,
    /// Full analyzed set; the per-source lists are subsets of it when present.
    #[serde(default)]
    pub all_posts: Option<Vec<WirePost>>,
}

/// `POST /analyze` response body of the analysis service (fields we consume).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub results: WireResults,
}
