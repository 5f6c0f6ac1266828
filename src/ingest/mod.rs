// src/ingest/mod.rs
//! Ingestion boundary: analysis-service JSON → validated `Post`s.
//!
//! This is the only place posts are checked. Missing `likes`, `source` or
//! `top_confidence` rejects the payload; negative likes are clamped to zero.
//! Aggregation downstream assumes well-formed posts and never re-validates.

pub mod error;
pub mod types;

pub use crate::ingest::error::IngestError;
use crate::ingest::types::{AnalysisResponse, WirePost};
use crate::post::{AnalysisResultSet, Post, Source};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_malformed_total",
            "Payloads rejected because a post missed a required field."
        );
        describe_counter!(
            "ingest_sanitized_likes_total",
            "Posts whose negative like count was clamped to zero."
        );
        describe_counter!(
            "ingest_confidence_out_of_range_total",
            "Posts whose top_confidence fell outside [0,1]."
        );
    });
}

/// Normalize an HTML fragment (Mastodon status): strip tags, then decode
/// entities, then collapse whitespace. Escaped text like `&lt;b&gt;` survives.
pub fn normalize_text(s: &str) -> String {
    // 1) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| {
        regex::Regex::new(r"(?is)</?[a-z][^>]*>").expect("static tag regex")
    });
    let stripped = re_tags.replace_all(s, " ");

    // 2) HTML entity decode + collapse whitespace
    normalize_plain_text(&stripped)
}

/// Normalize plain text (Reddit, YouTube, unknown): decode entities and
/// collapse whitespace. Angle brackets are kept as written.
pub fn normalize_plain_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").expect("static ws regex"));
    re_ws.replace_all(&decoded, " ").trim().to_string()
}

/// Only Mastodon delivers HTML bodies.
fn normalize_post_text(source: &Source, text: &str) -> String {
    match source {
        Source::Mastodon => normalize_text(text),
        _ => normalize_plain_text(text),
    }
}

/// Parse a raw response body into a result set.
pub fn parse_analysis_response(body: &str) -> Result<AnalysisResultSet, IngestError> {
    let resp: AnalysisResponse = serde_json::from_str(body)?;
    result_set_from_response(resp)
}

/// Build the result set from a decoded response.
///
/// `all_posts`, when present, is authoritative and gets partitioned by source;
/// otherwise the per-source lists are concatenated.
pub fn result_set_from_response(resp: AnalysisResponse) -> Result<AnalysisResultSet, IngestError> {
    let results = resp.results;
    let set = match results.all_posts {
        Some(all) => AnalysisResultSet::from_posts(normalize_posts("results.all_posts", all)?),
        None => {
            let reddit = normalize_posts("results.reddit", results.reddit)?;
            let mastodon = normalize_posts("results.mastodon", results.mastodon)?;
            let youtube = normalize_posts("results.youtube", results.youtube)?;
            // per-source lists may still carry mislabelled posts; re-partition
            AnalysisResultSet::from_posts(reddit.into_iter().chain(mastodon).chain(youtube))
        }
    };
    tracing::debug!(
        topic = resp.topic.as_deref().unwrap_or(""),
        reddit = set.reddit.len(),
        mastodon = set.mastodon.len(),
        youtube = set.youtube.len(),
        unknown = set.unknown.len(),
        "ingested analysis response"
    );
    Ok(set)
}

/// Validate and normalize one list of wire posts, preserving order.
pub fn normalize_posts(list: &str, raw: Vec<WirePost>) -> Result<Vec<Post>, IngestError> {
    ensure_metrics_described();
    raw.into_iter()
        .enumerate()
        .map(|(i, w)| normalize_post(list, i, w))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| {
            tracing::warn!(error = %e, "rejecting analysis payload");
            counter!("ingest_malformed_total").increment(1);
        })
}

fn normalize_post(list: &str, index: usize, w: WirePost) -> Result<Post, IngestError> {
    let source = w
        .source
        .as_deref()
        .map(Source::parse)
        .ok_or_else(|| IngestError::missing(list, index, "source"))?;
    let raw_likes = w
        .likes
        .ok_or_else(|| IngestError::missing(list, index, "likes"))?;
    let top_confidence = w
        .top_confidence
        .ok_or_else(|| IngestError::missing(list, index, "top_confidence"))?;

    let likes = if raw_likes < 0 {
        tracing::warn!(list, index, likes = raw_likes, "negative likes clamped to 0");
        counter!("ingest_sanitized_likes_total").increment(1);
        0
    } else {
        raw_likes as u64
    };

    // upstream contract violation; reported, not corrected
    if !(0.0..=1.0).contains(&top_confidence) {
        tracing::warn!(list, index, top_confidence, "top_confidence outside [0,1]");
        counter!("ingest_confidence_out_of_range_total").increment(1);
    }

    Ok(Post {
        text: w
            .text
            .as_deref()
            .map(|t| normalize_post_text(&source, t))
            .unwrap_or_default(),
        url: w.url.filter(|u| !u.trim().is_empty()),
        source,
        likes,
        top_emotion: w.top_emotion,
        top_confidence,
        similarity: w.similarity,
    })
}
