// src/lib.rs
// Public library surface for the server binary and integration tests.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;

// Core: post model → aggregation → chart projection
pub mod aggregate;
pub mod dashboard;
pub mod grouping;
pub mod post;
pub mod projector;

// Ingestion boundary & server-side ranking
pub mod ingest;
pub mod ranking;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{
    average_confidence_by_emotion, average_likes_by_source, dominant_emotion, total_count,
    weighted_emotion_distribution, weighted_emotion_distribution_with, EmotionConfidence,
    EmotionSlice, OtherBucketPolicy, SliceName, SourceAverages,
};
pub use crate::api::router;
pub use crate::dashboard::{Dashboard, DashboardOptions};
pub use crate::post::{AnalysisResultSet, EmotionKey, Post, Source};
