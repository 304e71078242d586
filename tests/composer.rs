// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use helpers::labels;
use postcheck::domain::{
    Effect, MediaType, SafetyFindings, SafetyFlag, Severity, Stage, TextFeatures, UrlTrust,
    UrlVerdict,
};
use postcheck::services::composer::{AnalyzeOptions, ScoreComposer};

/// Mid-length, 20% caps: no quality penalty and no engagement boost.
fn plain(length: usize) -> TextFeatures {
    TextFeatures {
        length,
        letter_count: 10,
        upper_count: 2,
        caps_ratio: 0.2,
        ..Default::default()
    }
}

fn flagged(flags: &[SafetyFlag]) -> SafetyFindings {
    SafetyFindings {
        toxicity_score: 0.9,
        spam_score: 0.9,
        nsfw_score: 0.9,
        triggered_flags: flags.to_vec(),
        ..Default::default()
    }
}

fn compose(features: &TextFeatures, findings: &SafetyFindings) -> postcheck::domain::ScoreBreakdown {
    ScoreComposer::compose(features, findings, &AnalyzeOptions::default())
}

// ─── Quality ─────────────────────────────────────────────────────────────────

#[test]
fn too_short_below_ten_chars() {
    let b = compose(&plain(9), &SafetyFindings::default());
    assert!(b.has_penalty("TOO_SHORT"));
    assert!(!b.has_penalty("BELOW_OPTIMAL"));
    assert_eq!(b.quality_score, 70.0);
}

#[test]
fn below_optimal_between_ten_and_fifty() {
    for length in [10, 49] {
        let b = compose(&plain(length), &SafetyFindings::default());
        assert!(b.has_penalty("BELOW_OPTIMAL"), "length {length}");
        assert_eq!(b.quality_score, 90.0);
    }
    let b = compose(&plain(50), &SafetyFindings::default());
    assert!(b.penalties.is_empty());
    assert_eq!(b.quality_score, 100.0);
}

#[test]
fn caps_tiers_are_exclusive() {
    let mut f = plain(60);

    f.caps_ratio = 0.3;
    assert!(compose(&f, &SafetyFindings::default()).penalties.is_empty());

    f.caps_ratio = 0.31;
    let b = compose(&f, &SafetyFindings::default());
    assert_eq!(labels(&b.penalties), vec!["HIGH_CAPS"]);
    assert_eq!(b.quality_score, 85.0);

    f.caps_ratio = 0.9;
    let b = compose(&f, &SafetyFindings::default());
    assert_eq!(labels(&b.penalties), vec!["EXCESSIVE_CAPS"]);
    assert_eq!(b.quality_score, 60.0);
}

#[test]
fn newline_and_hashtag_limits() {
    let mut f = plain(60);
    f.newline_count = 10;
    f.hashtag_count = 5;
    assert!(compose(&f, &SafetyFindings::default()).penalties.is_empty());

    f.newline_count = 11;
    f.hashtag_count = 6;
    let b = compose(&f, &SafetyFindings::default());
    assert_eq!(labels(&b.penalties), vec!["EXCESSIVE_NEWLINES", "HASHTAG_SPAM"]);
    assert_eq!(b.quality_score, 55.0);
}

#[test]
fn quality_floors_at_zero() {
    let f = TextFeatures {
        length: 5,
        caps_ratio: 0.9,
        newline_count: 20,
        hashtag_count: 10,
        ..Default::default()
    };
    let b = compose(&f, &SafetyFindings::default());
    assert_eq!(b.quality_score, 0.0);
    assert_eq!(b.penalties.len(), 4);
}

// ─── Engagement ──────────────────────────────────────────────────────────────

#[test]
fn engagement_baseline_without_signals() {
    let b = compose(&plain(60), &SafetyFindings::default());
    assert_eq!(b.engagement_score, 50.0);
    assert!(b.boosts.is_empty());
}

#[test]
fn media_boosts_are_ranked() {
    let score = |media| {
        let mut f = plain(60);
        f.media_type = media;
        compose(&f, &SafetyFindings::default()).engagement_score
    };
    assert_eq!(score(MediaType::Video), 80.0);
    assert_eq!(score(MediaType::Image), 75.0);
    assert_eq!(score(MediaType::Gif), 70.0);
    assert_eq!(score(MediaType::None), 50.0);
}

#[test]
fn engagement_caps_at_hundred() {
    let f = TextFeatures {
        length: 150,
        has_question: true,
        question_count: 1,
        media_type: MediaType::Video,
        ..Default::default()
    };
    let b = compose(&f, &SafetyFindings::default());
    assert_eq!(
        labels(&b.boosts),
        vec!["VIDEO_MEDIA", "HAS_QUESTION", "OPTIMAL_LENGTH", "GOOD_FORMATTING"]
    );
    assert_eq!(b.engagement_score, 100.0);
}

#[test]
fn optimal_length_window_is_inclusive() {
    for length in [100, 200] {
        assert!(compose(&plain(length), &SafetyFindings::default()).has_boost("OPTIMAL_LENGTH"));
    }
    for length in [99, 201] {
        assert!(!compose(&plain(length), &SafetyFindings::default()).has_boost("OPTIMAL_LENGTH"));
    }
}

#[test]
fn shouting_punctuation_loses_formatting_boost() {
    let mut f = plain(60);
    f.caps_ratio = 0.0;
    f.max_punctuation_run = 2;
    assert!(compose(&f, &SafetyFindings::default()).has_boost("GOOD_FORMATTING"));

    f.max_punctuation_run = 3;
    assert!(!compose(&f, &SafetyFindings::default()).has_boost("GOOD_FORMATTING"));
}

// ─── Safety ──────────────────────────────────────────────────────────────────

#[test]
fn hard_flags_apply_fixed_penalties() {
    let b = compose(
        &plain(60),
        &flagged(&[SafetyFlag::HighToxicity, SafetyFlag::UntrustedUrl]),
    );
    assert_eq!(b.safety_score, 15.0);

    let toxicity = &b.penalties[0];
    assert_eq!(toxicity.label, "HIGH_TOXICITY");
    assert_eq!(toxicity.stage, Stage::Safety);
    assert_eq!(toxicity.effect, Effect::Points(-45.0));
    assert_eq!(toxicity.severity, Severity::Critical);
    assert_eq!(toxicity.impact(), "-45%");
}

#[test]
fn safety_floors_at_zero() {
    let b = compose(
        &plain(60),
        &flagged(&[
            SafetyFlag::HighToxicity,
            SafetyFlag::HighSpammyContent,
            SafetyFlag::NsfwContent,
            SafetyFlag::UntrustedUrl,
        ]),
    );
    assert_eq!(b.safety_score, 0.0);
}

#[test]
fn elevated_scores_shave_points_proportionally() {
    let findings = SafetyFindings {
        spam_score: 0.5,
        triggered_flags: vec![SafetyFlag::ElevatedSpam],
        ..Default::default()
    };
    let b = compose(&plain(60), &findings);
    assert!((b.safety_score - 70.0).abs() < 1e-9);
    assert_eq!(b.penalties[0].label, "ELEVATED_SPAM");
    assert_eq!(b.penalties[0].severity, Severity::Medium);
    assert!(!b.has_penalty("SPAM_FILTER"));
}

#[test]
fn untrusted_url_description_lists_links() {
    let findings = SafetyFindings {
        urls: vec![
            UrlVerdict {
                url: "bit.ly/a".into(),
                trust: UrlTrust::Untrusted,
            },
            UrlVerdict {
                url: "github.com/x".into(),
                trust: UrlTrust::Trusted,
            },
        ],
        untrusted_url_detected: true,
        triggered_flags: vec![SafetyFlag::UntrustedUrl],
        ..Default::default()
    };
    let b = compose(&plain(60), &findings);
    assert_eq!(b.penalties[0].description, "Suspicious or shortened links (1): bit.ly/a");
}

// ─── Overall ─────────────────────────────────────────────────────────────────

#[test]
fn clean_weighted_sum() {
    let b = compose(&plain(60), &SafetyFindings::default());
    // 100 * 0.4 + 100 * 0.3 + 50 * 0.3
    assert_eq!(b.overall_score, 85);
}

#[test]
fn abusive_downrank_applies_once() {
    let b = compose(
        &plain(60),
        &flagged(&[SafetyFlag::HighToxicity, SafetyFlag::UntrustedUrl]),
    );
    let downranks = b
        .penalties
        .iter()
        .filter(|p| p.label == "ABUSIVE_QUALITY_DOWNRANK")
        .count();
    assert_eq!(downranks, 1);
    // (15 * 0.4 + 30 + 15) * 0.6
    assert_eq!(b.overall_score, 31);
}

#[test]
fn hard_filters_halve_the_score() {
    let b = compose(&plain(120), &flagged(&[SafetyFlag::HighSpammyContent]));
    let filter = b
        .penalties
        .iter()
        .find(|p| p.label == "SPAM_FILTER")
        .expect("spam filter multiplier");
    assert_eq!(filter.stage, Stage::Overall);
    assert_eq!(filter.effect, Effect::Scale(0.5));
    assert_eq!(filter.impact(), "-50%");
    // (30 * 0.4 + 30 + 18) * 0.5
    assert_eq!(b.overall_score, 30);
}

#[test]
fn penalties_are_ordered_by_stage() {
    let mut f = plain(20);
    f.caps_ratio = 0.9;
    let b = compose(&f, &flagged(&[SafetyFlag::HighToxicity]));
    let stages: Vec<Stage> = b.penalties.iter().map(|p| p.stage).collect();
    assert_eq!(
        stages,
        vec![Stage::Safety, Stage::Quality, Stage::Quality, Stage::Overall]
    );
}

#[test]
fn out_of_network_is_opt_in() {
    let features = plain(60);
    let findings = SafetyFindings::default();
    let off = ScoreComposer::compose(&features, &findings, &AnalyzeOptions::default());
    let on = ScoreComposer::compose(
        &features,
        &findings,
        &AnalyzeOptions { simulate_oon: true },
    );
    assert!(!off.has_penalty("OUT_OF_NETWORK"));
    assert!(on.has_penalty("OUT_OF_NETWORK"));
    // 85 * 0.85
    assert_eq!(on.overall_score, 72);
}
