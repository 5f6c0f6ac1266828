// tests/aggregate_properties.rs
//
// Randomized invariants over generated post sets (seeded, so reproducible).

use rand::{rngs::StdRng, Rng, SeedableRng};

use social_mood_dashboard::aggregate::{
    average_confidence_by_emotion, average_likes_by_source, distribution_total, dominant_emotion,
    source_counts, total_count, weighted_emotion_distribution,
};
use social_mood_dashboard::{Post, Source};

const EMOTIONS: [&str; 7] = [
    "joy", "anger", "fear", "sadness", "surprise", "disgust", "neutral",
];

fn random_posts(rng: &mut StdRng, n: usize) -> Vec<Post> {
    (0..n)
        .map(|_| {
            let source = match rng.random_range(0..4) {
                0 => Source::Reddit,
                1 => Source::Mastodon,
                2 => Source::Youtube,
                _ => Source::parse("lemmy"),
            };
            let mut p = Post::new(
                source,
                rng.random_range(0..500u64),
                EMOTIONS[rng.random_range(0..EMOTIONS.len())],
                rng.random_range(0.0..=1.0),
            );
            if rng.random_range(0..10) == 0 {
                p.top_emotion = None;
            }
            p
        })
        .collect()
}

#[test]
fn totals_match_source_memberships() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [1, 5, 40, 200] {
        let posts = random_posts(&mut rng, n);
        assert_eq!(total_count(&posts), n);
        assert_eq!(source_counts(&posts).total(), n);
    }
}

#[test]
fn distribution_sums_to_total_weight() {
    let mut rng = StdRng::seed_from_u64(23);
    for n in [1, 3, 17, 120] {
        let posts = random_posts(&mut rng, n);
        let expected: u64 = posts.iter().map(|p| p.likes + 1).sum();
        let d = weighted_emotion_distribution(&posts);
        assert_eq!(distribution_total(&d), expected);
        // Other, if any, is last and appears once
        let others = d.iter().filter(|s| s.name.is_other()).count();
        assert!(others <= 1);
        if others == 1 {
            assert!(d.last().unwrap().name.is_other());
        }
    }
}

#[test]
fn confidences_stay_in_unit_range() {
    let mut rng = StdRng::seed_from_u64(5);
    let posts = random_posts(&mut rng, 300);
    for e in average_confidence_by_emotion(&posts) {
        assert!((0.0..=1.0).contains(&e.avg_confidence), "{e:?}");
    }
}

#[test]
fn every_function_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    let posts = random_posts(&mut rng, 150);
    let snapshot = posts.clone();

    assert_eq!(dominant_emotion(&posts), dominant_emotion(&posts));
    assert_eq!(average_likes_by_source(&posts), average_likes_by_source(&posts));

    let a = average_confidence_by_emotion(&posts);
    let b = average_confidence_by_emotion(&posts);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.emotion, y.emotion);
        assert_eq!(x.avg_confidence.to_bits(), y.avg_confidence.to_bits());
    }

    assert_eq!(
        weighted_emotion_distribution(&posts),
        weighted_emotion_distribution(&posts)
    );
    // input untouched
    assert_eq!(posts, snapshot);
}

#[test]
fn safe_to_call_from_many_threads() {
    let mut rng = StdRng::seed_from_u64(42);
    let posts = std::sync::Arc::new(random_posts(&mut rng, 100));
    let expected = weighted_emotion_distribution(&posts);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = posts.clone();
            std::thread::spawn(move || weighted_emotion_distribution(&p))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
