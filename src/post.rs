//! # Post Record Model
//! Normalized shape of one analyzed social-media post plus the per-request
//! result set that groups posts by source.
//!
//! Posts are produced by the ingestion boundary (see `ingest`) and are never
//! mutated afterwards; every aggregate is re-derived from them on demand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a post was fetched from.
///
/// Anything other than the three crawled networks is kept as `Unknown` with
/// the raw name, so per-source breakdowns can degrade instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Reddit,
    Mastodon,
    Youtube,
    Unknown(String),
}

impl Source {
    /// Named sources in display (and concatenation) order.
    pub const NAMED: [Source; 3] = [Source::Reddit, Source::Mastodon, Source::Youtube];

    /// Case-insensitive parse; never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reddit" => Source::Reddit,
            "mastodon" => Source::Mastodon,
            "youtube" => Source::Youtube,
            _ => Source::Unknown(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Source::Reddit => "reddit",
            Source::Mastodon => "mastodon",
            Source::Youtube => "youtube",
            Source::Unknown(raw) => raw,
        }
    }

    /// Capitalized name used on the stats card.
    pub fn display_name(&self) -> &str {
        match self {
            Source::Reddit => "Reddit",
            Source::Mastodon => "Mastodon",
            Source::Youtube => "YouTube",
            Source::Unknown(_) => "unknown",
        }
    }

    pub fn is_named(&self) -> bool {
        !matches!(self, Source::Unknown(_))
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::parse(&s)
    }
}

impl From<Source> for String {
    fn from(s: Source) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping key for emotion-based aggregates.
///
/// A post without a label lands in `Undefined`; it is a distinct key, not the
/// string "undefined", so a classifier that emits that literal label still
/// groups separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmotionKey {
    Label(String),
    Undefined,
}

impl EmotionKey {
    pub const UNDEFINED_TEXT: &'static str = "undefined";

    pub fn as_str(&self) -> &str {
        match self {
            EmotionKey::Label(l) => l,
            EmotionKey::Undefined => Self::UNDEFINED_TEXT,
        }
    }
}

impl From<Option<&str>> for EmotionKey {
    fn from(label: Option<&str>) -> Self {
        match label {
            Some(l) => EmotionKey::Label(l.to_string()),
            None => EmotionKey::Undefined,
        }
    }
}

impl fmt::Display for EmotionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EmotionKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One classified post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub source: Source,
    /// Upvotes / favourites / likes, already normalized per source.
    pub likes: u64,
    #[serde(default)]
    pub top_emotion: Option<String>,
    /// Classifier confidence for `top_emotion`, expected in [0,1].
    pub top_confidence: f64,
    /// Topic similarity reported by the classifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl Post {
    pub fn new(source: Source, likes: u64, emotion: &str, confidence: f64) -> Self {
        Self {
            text: String::new(),
            url: None,
            source,
            likes,
            top_emotion: Some(emotion.to_string()),
            top_confidence: confidence,
            similarity: None,
        }
    }

    /// Builder-style text setter (handy in tests and demos).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_similarity(mut self, sim: f64) -> Self {
        self.similarity = Some(sim);
        self
    }

    /// Group key for every emotion aggregate.
    pub fn emotion_key(&self) -> EmotionKey {
        EmotionKey::from(self.top_emotion.as_deref())
    }

    /// Pie-chart weight: reactions plus one so no post weighs zero.
    pub fn weight(&self) -> u64 {
        self.likes.saturating_add(1)
    }
}

/// All posts of one analysis request, grouped by source.
///
/// `all_posts` is always the concatenation reddit, mastodon, youtube, unknown,
/// so its length equals the sum of the per-source collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResultSet {
    pub reddit: Vec<Post>,
    pub mastodon: Vec<Post>,
    pub youtube: Vec<Post>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<Post>,
    pub all_posts: Vec<Post>,
}

impl AnalysisResultSet {
    /// Partition a flat list by source, keeping relative order inside each source.
    pub fn from_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let mut reddit = Vec::new();
        let mut mastodon = Vec::new();
        let mut youtube = Vec::new();
        let mut unknown = Vec::new();
        for p in posts {
            match p.source {
                Source::Reddit => reddit.push(p),
                Source::Mastodon => mastodon.push(p),
                Source::Youtube => youtube.push(p),
                Source::Unknown(_) => unknown.push(p),
            }
        }
        Self::from_sources(reddit, mastodon, youtube, unknown)
    }

    /// Build from already-grouped collections.
    pub fn from_sources(
        reddit: Vec<Post>,
        mastodon: Vec<Post>,
        youtube: Vec<Post>,
        unknown: Vec<Post>,
    ) -> Self {
        let mut all_posts =
            Vec::with_capacity(reddit.len() + mastodon.len() + youtube.len() + unknown.len());
        all_posts.extend(reddit.iter().cloned());
        all_posts.extend(mastodon.iter().cloned());
        all_posts.extend(youtube.iter().cloned());
        all_posts.extend(unknown.iter().cloned());
        Self {
            reddit,
            mastodon,
            youtube,
            unknown,
            all_posts,
        }
    }

    pub fn len(&self) -> usize {
        self.all_posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parse_is_case_insensitive_and_keeps_unknown_raw() {
        assert_eq!(Source::parse(" Reddit "), Source::Reddit);
        assert_eq!(Source::parse("YOUTUBE"), Source::Youtube);
        assert_eq!(
            Source::parse("bluesky"),
            Source::Unknown("bluesky".to_string())
        );
        assert!(!Source::parse("bluesky").is_named());
    }

    #[test]
    fn source_serde_roundtrips_as_plain_string() {
        let s: Source = serde_json::from_str("\"Mastodon\"").unwrap();
        assert_eq!(s, Source::Mastodon);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"mastodon\"");
    }

    #[test]
    fn missing_emotion_groups_under_undefined() {
        let mut p = Post::new(Source::Reddit, 0, "joy", 0.5);
        p.top_emotion = None;
        assert_eq!(p.emotion_key(), EmotionKey::Undefined);
        assert_eq!(p.emotion_key().to_string(), "undefined");
        assert_ne!(
            EmotionKey::Undefined,
            EmotionKey::Label("undefined".to_string())
        );
    }

    #[test]
    fn result_set_concatenates_in_source_order() {
        let posts = vec![
            Post::new(Source::Youtube, 1, "joy", 0.5),
            Post::new(Source::parse("lemmy"), 2, "joy", 0.5),
            Post::new(Source::Reddit, 3, "anger", 0.5),
            Post::new(Source::Mastodon, 4, "fear", 0.5),
            Post::new(Source::Reddit, 5, "joy", 0.5),
        ];
        let set = AnalysisResultSet::from_posts(posts);
        let likes: Vec<u64> = set.all_posts.iter().map(|p| p.likes).collect();
        assert_eq!(likes, vec![3, 5, 4, 1, 2]);
        assert_eq!(
            set.len(),
            set.reddit.len() + set.mastodon.len() + set.youtube.len() + set.unknown.len()
        );
    }

    #[test]
    fn weight_never_overflows() {
        let p = Post::new(Source::Reddit, u64::MAX, "joy", 0.5);
        assert_eq!(p.weight(), u64::MAX);
    }
}
