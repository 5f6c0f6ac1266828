//! # Chart-Data Projector
//! Maps aggregation outputs into display-ready series. Everything here is a
//! plain data transform; rendering belongs to whatever consumes the JSON.

use serde::Serialize;

use crate::aggregate::{
    self, round_half_up, EmotionConfidence, EmotionSlice, SliceName, SourceAverages, SourceCounts,
};
use crate::post::{EmotionKey, Post, Source};

/// Fixed value axis for confidence bars.
pub const CONFIDENCE_AXIS: [f64; 2] = [0.0, 1.0];

/// Marker shown when there is no dominant emotion.
pub const NO_DATA: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub category: EmotionKey,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub points: Vec<BarPoint>,
    pub y_domain: [f64; 2],
}

pub fn bar_series(stats: &[EmotionConfidence]) -> BarSeries {
    BarSeries {
        points: stats
            .iter()
            .map(|s| BarPoint {
                category: s.emotion.clone(),
                value: s.avg_confidence,
            })
            .collect(),
        y_domain: CONFIDENCE_AXIS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: SliceName,
    pub value: u64,
    /// Share of the total in [0,1].
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub total: u64,
    pub slices: Vec<PieSlice>,
}

pub fn pie_series(slices: &[EmotionSlice]) -> PieSeries {
    let total = aggregate::distribution_total(slices);
    PieSeries {
        total,
        slices: slices
            .iter()
            .map(|s| PieSlice {
                label: s.name.clone(),
                value: s.value,
                percent_of_total: share(s.value, total),
            })
            .collect(),
    }
}

/// `"<name>: <value> (<percent>%)"`, percent as a whole number.
pub fn format_slice_label(slice: &EmotionSlice, total: u64) -> String {
    let pct = round_half_up(share(slice.value, total) * 100.0, 0);
    format!("{}: {} ({:.0}%)", slice.name, slice.value, pct)
}

fn share(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 / total as f64
    }
}

/// Human-facing text for the dominant emotion card.
pub fn dominant_label(dominant: Option<&EmotionKey>, no_data: &str) -> String {
    dominant.map_or_else(|| no_data.to_string(), |k| k.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReaction {
    pub source: Source,
    pub label: String,
    /// One decimal, or "0" when the source contributed no posts.
    pub average: String,
}

/// Summary card: total, most common emotion, per-source average reactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsCard {
    pub total_posts: usize,
    pub most_common_emotion: String,
    pub average_reactions: Vec<SourceReaction>,
}

pub fn stats_card(posts: &[Post], no_data: &str) -> StatsCard {
    let averages = aggregate::average_likes_by_source(posts);
    let counts = aggregate::source_counts(posts);
    StatsCard {
        total_posts: aggregate::total_count(posts),
        most_common_emotion: dominant_label(aggregate::dominant_emotion(posts).as_ref(), no_data),
        average_reactions: Source::NAMED
            .iter()
            .map(|s| SourceReaction {
                source: s.clone(),
                label: s.display_name().to_string(),
                average: format_average(s, &averages, &counts),
            })
            .collect(),
    }
}

fn format_average(source: &Source, averages: &SourceAverages, counts: &SourceCounts) -> String {
    let n = match source {
        Source::Reddit => counts.reddit,
        Source::Mastodon => counts.mastodon,
        Source::Youtube => counts.youtube,
        Source::Unknown(_) => counts.unknown,
    };
    match averages.get(source) {
        Some(avg) if n > 0 => format!("{:.1}", round_half_up(avg, 1)),
        _ => "0".to_string(),
    }
}
