// tests/ingest_normalize.rs
use social_mood_dashboard::ingest::{normalize_text, parse_analysis_response, IngestError};
use social_mood_dashboard::{Dashboard, DashboardOptions, Source};

#[test]
fn mastodon_html_is_cleaned() {
    let s = "<p>Rust 1.90 is out! <a href=\"https://x\" class=\"mention\">@rustlang</a></p><p>&quot;Finally&quot;</p>";
    assert_eq!(normalize_text(s), "Rust 1.90 is out! @rustlang \"Finally\"");
}

#[test]
fn unknown_sources_land_in_their_own_bucket() {
    let body = r#"{"results":{"all_posts":[
        {"source":"bluesky","likes":3,"top_emotion":"joy","top_confidence":0.4},
        {"source":"reddit","likes":1,"top_emotion":"joy","top_confidence":0.4}
    ]}}"#;
    let set = parse_analysis_response(body).unwrap();
    assert_eq!(set.unknown.len(), 1);
    assert_eq!(set.unknown[0].source, Source::Unknown("bluesky".into()));
    // concatenation order: named sources first, unknown last
    assert_eq!(set.all_posts[0].source, Source::Reddit);
}

#[test]
fn missing_confidence_is_rejected() {
    let body = r#"{"results":{"youtube":[
        {"source":"youtube","likes":3,"top_emotion":"joy"}
    ]}}"#;
    match parse_analysis_response(body) {
        Err(IngestError::MalformedPost { location, field }) => {
            assert_eq!(location, "results.youtube[0]");
            assert_eq!(field, "top_confidence");
        }
        other => panic!("expected MalformedPost, got {other:?}"),
    }
}

#[test]
fn missing_emotion_flows_into_undefined_group() {
    let body = r#"{"results":{"all_posts":[
        {"source":"reddit","likes":0,"top_confidence":0.2},
        {"source":"reddit","likes":0,"top_confidence":0.4},
        {"source":"reddit","likes":0,"top_emotion":"joy","top_confidence":0.9}
    ]}}"#;
    let set = parse_analysis_response(body).unwrap();
    let d = Dashboard::build(&set, &DashboardOptions::default());
    assert_eq!(d.stats.most_common_emotion, "undefined");
    assert_eq!(d.confidence_by_emotion[0].emotion.as_str(), "undefined");
    assert_eq!(d.confidence_by_emotion[0].avg_confidence, 0.3);
}

#[test]
fn only_mastodon_text_is_treated_as_html() {
    let body = r#"{"results":{"all_posts":[
        {"source":"reddit","text":"Use Vec<u8> and Option<String> for this","likes":1,"top_emotion":"joy","top_confidence":0.5},
        {"source":"youtube","text":"I <3 this and x<y or a<b>c","likes":1,"top_emotion":"joy","top_confidence":0.5},
        {"source":"mastodon","text":"<p>Use &lt;Vec&gt; <b>now</b></p>","likes":1,"top_emotion":"joy","top_confidence":0.5}
    ]}}"#;
    let set = parse_analysis_response(body).unwrap();
    assert_eq!(set.reddit[0].text, "Use Vec<u8> and Option<String> for this");
    assert_eq!(set.youtube[0].text, "I <3 this and x<y or a<b>c");
    assert_eq!(set.mastodon[0].text, "Use <Vec> now");
}
