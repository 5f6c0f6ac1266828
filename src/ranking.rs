//! # Ranking & server-side summary
//! Post selection and the response-level statistics the analysis service
//! attaches to a topic: dedup + sampling, weighted scores, top posts per
//! source, normalized emotion shares, and reaction totals.
//!
//! Like `aggregate`, everything here is pure and order-preserving.

use serde::Serialize;
use std::collections::HashSet;

use crate::aggregate::round_half_up;
use crate::grouping::OrderedGroups;
use crate::post::{EmotionKey, Post, Source};

/// Keep posts whose trimmed text is longer than `min_chars` characters (first
/// occurrence per text wins), then take the `max` strongest by
/// `likes + chars / 100`. Ties keep input order.
pub fn dedup_and_sample(posts: Vec<Post>, min_chars: usize, max: usize) -> Vec<Post> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<Post> = posts
        .into_iter()
        .filter(|p| {
            let t = p.text.trim();
            t.chars().count() > min_chars && seen.insert(t.to_string())
        })
        .collect();

    // stable sort, descending
    unique.sort_by(|a, b| sample_key(b).total_cmp(&sample_key(a)));
    unique.truncate(max);
    unique
}

fn sample_key(p: &Post) -> f64 {
    p.likes as f64 + p.text.chars().count() as f64 / 100.0
}

/// `conf * (1 + ln(likes + 2)) * (0.5 + similarity)`, rounded to 3 decimals.
pub fn score_weighted(p: &Post) -> f64 {
    let sim = p.similarity.unwrap_or(0.0);
    let raw = p.top_confidence * (1.0 + reaction_log(p.likes)) * (0.5 + sim);
    round_half_up(raw, 3)
}

fn reaction_log(likes: u64) -> f64 {
    (likes as f64 + 2.0).ln()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPost {
    #[serde(flatten)]
    pub post: Post,
    pub score_weighted: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopPosts {
    pub reddit: Vec<RankedPost>,
    pub mastodon: Vec<RankedPost>,
    pub youtube: Vec<RankedPost>,
}

/// Best `limit / 3` posts per named source by `score_weighted`.
pub fn top_per_source(posts: &[Post], limit: usize) -> TopPosts {
    let per_source = limit / 3;
    let mut ranked: Vec<RankedPost> = posts
        .iter()
        .map(|p| RankedPost {
            score_weighted: score_weighted(p),
            post: p.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score_weighted.total_cmp(&a.score_weighted));

    let mut top = TopPosts::default();
    for r in ranked {
        let bucket = match r.post.source {
            Source::Reddit => &mut top.reddit,
            Source::Mastodon => &mut top.mastodon,
            Source::Youtube => &mut top.youtube,
            Source::Unknown(_) => continue,
        };
        if bucket.len() < per_source {
            bucket.push(r);
        }
    }
    top
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionShare {
    pub emotion: EmotionKey,
    pub share: f64,
}

/// Emotion shares weighted by `conf * ln(likes + 2)`, rounded to 3 decimals.
pub fn emotion_summary(posts: &[Post]) -> Vec<EmotionShare> {
    let groups = OrderedGroups::group_by(
        posts,
        |p| p.emotion_key(),
        || 0.0f64,
        |w: &mut f64, p| *w += p.top_confidence * reaction_log(p.likes),
    );
    let total: f64 = groups.iter().map(|(_, w)| *w).sum();
    let total = if total == 0.0 { 1.0 } else { total };
    groups
        .into_iter()
        .map(|(emotion, w)| EmotionShare {
            emotion,
            share: round_half_up(w / total, 3),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReactionStats {
    pub total_likes: u64,
    pub avg_likes: f64,
}

pub fn reaction_stats(posts: &[Post]) -> ReactionStats {
    let total_likes = posts.iter().fold(0u64, |acc, p| acc.saturating_add(p.likes));
    let avg_likes = if posts.is_empty() {
        0.0
    } else {
        round_half_up(total_likes as f64 / posts.len() as f64, 2)
    };
    ReactionStats {
        total_likes,
        avg_likes,
    }
}

/// Knobs for `summarize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub min_text_chars: usize,
    pub max_posts: usize,
    pub result_limit: usize,
}

/// Response-level summary of one analyzed topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_posts_analyzed: usize,
    pub emotion_summary: Vec<EmotionShare>,
    pub reaction_stats: ReactionStats,
    pub top_posts: TopPosts,
    pub all_posts: Vec<Post>,
}

pub fn summarize(posts: Vec<Post>, opts: &SummaryOptions) -> AnalysisSummary {
    let sampled = dedup_and_sample(posts, opts.min_text_chars, opts.max_posts);
    AnalysisSummary {
        total_posts_analyzed: sampled.len(),
        emotion_summary: emotion_summary(&sampled),
        reaction_stats: reaction_stats(&sampled),
        top_posts: top_per_source(&sampled, opts.result_limit),
        all_posts: sampled,
    }
}
