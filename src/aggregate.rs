//! # Aggregation Engine
//! Pure functions that turn an ordered slice of posts into dashboard statistics.
//! No I/O, no hidden state: the same input always yields the same output, and
//! an empty slice always yields a defined "empty" value rather than an error.
//!
//! Ordering policy: every per-emotion result lists groups in first-occurrence
//! order of the emotion in the input (see `grouping::OrderedGroups`).

use serde::Serialize;
use std::fmt;

use crate::grouping::OrderedGroups;
use crate::post::{EmotionKey, Post, Source};

/// Default share of the total weight below which a slice folds into "Other".
pub const DEFAULT_OTHER_THRESHOLD: f64 = 0.05;

/// Number of posts.
pub fn total_count(posts: &[Post]) -> usize {
    posts.len()
}

/// Most frequent emotion; ties go to the label seen first. `None` on empty input.
pub fn dominant_emotion(posts: &[Post]) -> Option<EmotionKey> {
    let counts = OrderedGroups::group_by(
        posts,
        |p| p.emotion_key(),
        || 0usize,
        |n: &mut usize, _| *n += 1,
    );

    let mut best: Option<(EmotionKey, usize)> = None;
    for (key, n) in counts {
        // strict `>` keeps the earlier group on ties
        if best.as_ref().map_or(true, |(_, b)| n > *b) {
            best = Some((key, n));
        }
    }
    best.map(|(key, _)| key)
}

/// Mean likes for each named source; 0.0 where a source has no posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SourceAverages {
    pub reddit: f64,
    pub mastodon: f64,
    pub youtube: f64,
}

impl SourceAverages {
    /// `None` for unknown sources; they have no named bucket.
    pub fn get(&self, source: &Source) -> Option<f64> {
        match source {
            Source::Reddit => Some(self.reddit),
            Source::Mastodon => Some(self.mastodon),
            Source::Youtube => Some(self.youtube),
            Source::Unknown(_) => None,
        }
    }
}

pub fn average_likes_by_source(posts: &[Post]) -> SourceAverages {
    // (sum, count) per named source
    let mut acc = [(0u128, 0u64); 3];
    for p in posts {
        let slot = match p.source {
            Source::Reddit => 0,
            Source::Mastodon => 1,
            Source::Youtube => 2,
            Source::Unknown(_) => continue,
        };
        acc[slot].0 += u128::from(p.likes);
        acc[slot].1 += 1;
    }
    let mean = |(sum, n): (u128, u64)| if n > 0 { sum as f64 / n as f64 } else { 0.0 };
    SourceAverages {
        reddit: mean(acc[0]),
        mastodon: mean(acc[1]),
        youtube: mean(acc[2]),
    }
}

/// Post counts per source, unknown sources included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub reddit: usize,
    pub mastodon: usize,
    pub youtube: usize,
    pub unknown: usize,
}

impl SourceCounts {
    pub fn total(&self) -> usize {
        self.reddit + self.mastodon + self.youtube + self.unknown
    }
}

pub fn source_counts(posts: &[Post]) -> SourceCounts {
    let mut c = SourceCounts::default();
    for p in posts {
        match p.source {
            Source::Reddit => c.reddit += 1,
            Source::Mastodon => c.mastodon += 1,
            Source::Youtube => c.youtube += 1,
            Source::Unknown(_) => c.unknown += 1,
        }
    }
    c
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionConfidence {
    pub emotion: EmotionKey,
    pub avg_confidence: f64,
}

/// Mean `top_confidence` per emotion, rounded half-up to 2 decimals.
pub fn average_confidence_by_emotion(posts: &[Post]) -> Vec<EmotionConfidence> {
    OrderedGroups::group_by(
        posts,
        |p| p.emotion_key(),
        || (0.0f64, 0usize),
        |acc: &mut (f64, usize), p| {
            acc.0 += p.top_confidence;
            acc.1 += 1;
        },
    )
    .into_iter()
    .map(|(emotion, (sum, n))| EmotionConfidence {
        emotion,
        avg_confidence: round_half_up(sum / n as f64, 2),
    })
    .collect()
}

/// Relative-size cut-off for the "Other" bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OtherBucketPolicy {
    threshold: f64,
}

impl OtherBucketPolicy {
    /// `threshold` is a fraction of the total weight, clamped to [0,1].
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_OTHER_THRESHOLD
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Groups strictly below the cut-off fold; a group exactly at it stays.
    pub fn folds(&self, weight: u64, total: u64) -> bool {
        (weight as f64) < total as f64 * self.threshold
    }
}

impl Default for OtherBucketPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_OTHER_THRESHOLD)
    }
}

/// Pie slice name: an emotion group or the synthetic tail bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceName {
    Emotion(EmotionKey),
    Other,
}

impl SliceName {
    pub const OTHER_TEXT: &'static str = "Other";

    pub fn as_str(&self) -> &str {
        match self {
            SliceName::Emotion(k) => k.as_str(),
            SliceName::Other => Self::OTHER_TEXT,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, SliceName::Other)
    }
}

impl fmt::Display for SliceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SliceName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSlice {
    pub name: SliceName,
    /// Sum of `likes + 1` over the posts in this slice.
    pub value: u64,
}

/// Weighted emotion distribution with the default 5% "Other" cut-off.
pub fn weighted_emotion_distribution(posts: &[Post]) -> Vec<EmotionSlice> {
    weighted_emotion_distribution_with(posts, &OtherBucketPolicy::default())
}

pub fn weighted_emotion_distribution_with(
    posts: &[Post],
    policy: &OtherBucketPolicy,
) -> Vec<EmotionSlice> {
    let groups = OrderedGroups::group_by(
        posts,
        |p| p.emotion_key(),
        || 0u64,
        |w: &mut u64, p| *w = w.saturating_add(p.weight()),
    );
    let total = groups.iter().fold(0u64, |acc, (_, w)| acc.saturating_add(*w));
    if total == 0 {
        return Vec::new();
    }

    let mut slices = Vec::with_capacity(groups.len() + 1);
    let mut other = 0u64;
    for (key, weight) in groups {
        if policy.folds(weight, total) {
            other = other.saturating_add(weight);
        } else {
            slices.push(EmotionSlice {
                name: SliceName::Emotion(key),
                value: weight,
            });
        }
    }
    // always last, whatever its size
    if other > 0 {
        slices.push(EmotionSlice {
            name: SliceName::Other,
            value: other,
        });
    }
    slices
}

/// Sum of slice values (equals the total post weight).
pub fn distribution_total(slices: &[EmotionSlice]) -> u64 {
    slices.iter().fold(0u64, |acc, s| acc.saturating_add(s.value))
}

/// Round half-up at `decimals` places (`floor(x * 10^d + 0.5) / 10^d`).
pub(crate) fn round_half_up(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f + 0.5).floor() / f
}
