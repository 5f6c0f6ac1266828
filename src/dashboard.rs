//! # Dashboard snapshot
//! Runs every aggregate and projection over one result set and bundles the
//! output the browser renders: stats card, confidence bars, weighted pie.
//! Recomputed from scratch per request; nothing is cached between sets.

use serde::Serialize;

use crate::aggregate::{
    self, EmotionConfidence, EmotionSlice, OtherBucketPolicy, SourceAverages, SourceCounts,
};
use crate::config::DashboardConfig;
use crate::post::{AnalysisResultSet, EmotionKey};
use crate::projector::{self, BarSeries, PieSeries, StatsCard, NO_DATA};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    pub other_policy: OtherBucketPolicy,
    pub no_data_label: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            other_policy: OtherBucketPolicy::default(),
            no_data_label: NO_DATA.to_string(),
        }
    }
}

impl From<&DashboardConfig> for DashboardOptions {
    fn from(cfg: &DashboardConfig) -> Self {
        Self {
            other_policy: cfg.other_policy(),
            no_data_label: cfg.no_data_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub has_results: bool,
    pub stats: StatsCard,
    pub total_count: usize,
    pub dominant_emotion: Option<EmotionKey>,
    pub average_likes_by_source: SourceAverages,
    pub source_counts: SourceCounts,
    pub confidence_by_emotion: Vec<EmotionConfidence>,
    pub distribution: Vec<EmotionSlice>,
    pub bar: BarSeries,
    pub pie: PieSeries,
    /// Pie labels, index-aligned with `pie.slices`.
    pub pie_labels: Vec<String>,
}

impl Dashboard {
    pub fn build(set: &AnalysisResultSet, opts: &DashboardOptions) -> Self {
        let posts = set.all_posts.as_slice();

        let confidence_by_emotion = aggregate::average_confidence_by_emotion(posts);
        let distribution = aggregate::weighted_emotion_distribution_with(posts, &opts.other_policy);
        let pie = projector::pie_series(&distribution);
        let pie_labels = distribution
            .iter()
            .map(|s| projector::format_slice_label(s, pie.total))
            .collect();

        Self {
            has_results: !set.is_empty(),
            stats: projector::stats_card(posts, &opts.no_data_label),
            total_count: aggregate::total_count(posts),
            dominant_emotion: aggregate::dominant_emotion(posts),
            average_likes_by_source: aggregate::average_likes_by_source(posts),
            source_counts: aggregate::source_counts(posts),
            bar: projector::bar_series(&confidence_by_emotion),
            confidence_by_emotion,
            distribution,
            pie,
            pie_labels,
        }
    }
}
