// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Adjustment, Effect, MediaType, SafetyFindings, SafetyFlag, ScoreBreakdown, Severity, Stage,
    TextFeatures,
};

// Component weights for the overall score
pub const SAFETY_WEIGHT: f64 = 0.40;
pub const QUALITY_WEIGHT: f64 = 0.30;
pub const ENGAGEMENT_WEIGHT: f64 = 0.30;

// Safety: fixed penalties for hard flags, proportional ones for elevated scores
pub const HIGH_TOXICITY_PENALTY: f64 = 45.0;
pub const HIGH_SPAM_PENALTY: f64 = 70.0;
pub const NSFW_PENALTY: f64 = 50.0;
pub const UNTRUSTED_URL_PENALTY: f64 = 40.0;
pub const ELEVATED_TOXICITY_WEIGHT: f64 = 50.0;
pub const ELEVATED_SPAM_WEIGHT: f64 = 60.0;
pub const ELEVATED_NSFW_WEIGHT: f64 = 50.0;

// Quality
pub const TOO_SHORT_LENGTH: usize = 10;
pub const TOO_SHORT_PENALTY: f64 = 30.0;
pub const OPTIMAL_LENGTH_MIN: usize = 50;
pub const OPTIMAL_LENGTH_MAX: usize = 280;
pub const BELOW_OPTIMAL_PENALTY: f64 = 10.0;
pub const EXCESSIVE_CAPS_RATIO: f64 = 0.5;
pub const EXCESSIVE_CAPS_PENALTY: f64 = 40.0;
pub const MAX_CAPS_RATIO: f64 = 0.3;
pub const HIGH_CAPS_PENALTY: f64 = 15.0;
pub const MAX_NEWLINES: usize = 10;
pub const EXCESSIVE_NEWLINES_PENALTY: f64 = 20.0;
pub const MAX_HASHTAGS: usize = 5;
pub const HASHTAG_SPAM_PENALTY: f64 = 25.0;

// Engagement
pub const ENGAGEMENT_BASELINE: f64 = 50.0;
pub const VIDEO_BOOST: f64 = 30.0;
pub const IMAGE_BOOST: f64 = 25.0;
pub const GIF_BOOST: f64 = 20.0;
pub const QUESTION_BOOST: f64 = 15.0;
pub const SWEET_SPOT_MIN: usize = 100;
pub const SWEET_SPOT_MAX: usize = 200;
pub const OPTIMAL_LENGTH_BOOST: f64 = 10.0;
pub const RECOMMENDED_CAPS_RATIO: f64 = 0.1;
/// A run of this many `!` or `?` counts as excessive punctuation
pub const PUNCTUATION_RUN_LIMIT: usize = 3;
pub const GOOD_FORMATTING_BOOST: f64 = 5.0;

// Global multipliers applied to the weighted sum
pub const SPAM_FILTER_MULTIPLIER: f64 = 0.5;
pub const NSFW_FILTER_MULTIPLIER: f64 = 0.5;
pub const ABUSIVE_QUALITY_MULTIPLIER: f64 = 0.6;
/// Simulated out-of-network reduction. Deliberately milder than the 0.75
/// documented for the real pipeline.
pub const OON_MULTIPLIER: f64 = 0.85;

/// Caller-controlled signals that can't be derived from the text itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Apply the simulated out-of-network multiplier
    #[serde(default)]
    pub simulate_oon: bool,
}

/// Running score plus the adjustments that produced it.
struct Tally {
    score: f64,
    stage: Stage,
    entries: Vec<Adjustment>,
}

impl Tally {
    fn new(start: f64, stage: Stage) -> Self {
        Self {
            score: start,
            stage,
            entries: Vec::new(),
        }
    }

    fn push(
        &mut self,
        label: &str,
        points: f64,
        severity: Severity,
        description: impl Into<String>,
    ) {
        self.score += points;
        self.entries.push(Adjustment::new(
            label,
            self.stage,
            Effect::Points(points),
            severity,
            description,
        ));
    }

    fn finish(self) -> (f64, Vec<Adjustment>) {
        (self.score.clamp(0.0, 100.0), self.entries)
    }
}

pub struct ScoreComposer;

impl ScoreComposer {
    pub fn compose(
        features: &TextFeatures,
        findings: &SafetyFindings,
        options: &AnalyzeOptions,
    ) -> ScoreBreakdown {
        let (safety_score, mut penalties) = Self::safety(findings).finish();
        let (quality_score, quality_penalties) = Self::quality(features).finish();
        let (engagement_score, boosts) = Self::engagement(features).finish();
        penalties.extend(quality_penalties);

        let weighted = safety_score * SAFETY_WEIGHT
            + quality_score * QUALITY_WEIGHT
            + engagement_score * ENGAGEMENT_WEIGHT;

        let mut overall = weighted;
        for adjustment in Self::global_multipliers(findings, options) {
            if let Effect::Scale(m) = adjustment.effect {
                overall *= m;
            }
            penalties.push(adjustment);
        }

        let overall_score = overall.clamp(0.0, 100.0).round() as u8;

        debug!(
            safety = safety_score,
            quality = quality_score,
            engagement = engagement_score,
            weighted,
            overall = overall_score,
            "scores composed"
        );

        ScoreBreakdown {
            safety_score,
            quality_score,
            engagement_score,
            penalties,
            boosts,
            overall_score,
        }
    }

    fn safety(findings: &SafetyFindings) -> Tally {
        let mut tally = Tally::new(100.0, Stage::Safety);

        for flag in &findings.triggered_flags {
            let label = flag.as_str();
            match flag {
                SafetyFlag::HighToxicity => tally.push(
                    label,
                    -HIGH_TOXICITY_PENALTY,
                    Severity::Critical,
                    format!(
                        "Toxic language detected ({} match(es)): {}",
                        findings.toxic_terms.len(),
                        preview_terms(&findings.toxic_terms)
                    ),
                ),
                SafetyFlag::ElevatedToxicity => tally.push(
                    label,
                    -(findings.toxicity_score * ELEVATED_TOXICITY_WEIGHT),
                    Severity::Medium,
                    format!(
                        "Hostile wording: {}",
                        preview_terms(&findings.toxic_terms)
                    ),
                ),
                SafetyFlag::HighSpammyContent => tally.push(
                    label,
                    -HIGH_SPAM_PENALTY,
                    Severity::Critical,
                    format!(
                        "Spam indicators detected ({} match(es)): {}",
                        findings.spam_terms.len(),
                        preview_terms(&findings.spam_terms)
                    ),
                ),
                SafetyFlag::ElevatedSpam => tally.push(
                    label,
                    -(findings.spam_score * ELEVATED_SPAM_WEIGHT),
                    Severity::Medium,
                    format!("Spam-like phrasing: {}", preview_terms(&findings.spam_terms)),
                ),
                SafetyFlag::NsfwContent => tally.push(
                    label,
                    -NSFW_PENALTY,
                    Severity::Critical,
                    format!(
                        "NSFW content detected: {}",
                        preview_terms(&findings.nsfw_terms)
                    ),
                ),
                SafetyFlag::ElevatedNsfw => tally.push(
                    label,
                    -(findings.nsfw_score * ELEVATED_NSFW_WEIGHT),
                    Severity::Medium,
                    format!("Suggestive wording: {}", preview_terms(&findings.nsfw_terms)),
                ),
                SafetyFlag::UntrustedUrl => {
                    let urls: Vec<&str> = findings.untrusted_urls().collect();
                    tally.push(
                        label,
                        -UNTRUSTED_URL_PENALTY,
                        Severity::High,
                        format!(
                            "Suspicious or shortened links ({}): {}",
                            urls.len(),
                            urls.iter().take(2).copied().collect::<Vec<_>>().join(", ")
                        ),
                    );
                }
            }
        }

        tally
    }

    fn quality(features: &TextFeatures) -> Tally {
        let mut tally = Tally::new(100.0, Stage::Quality);
        let length = features.length;

        if length < TOO_SHORT_LENGTH {
            tally.push(
                "TOO_SHORT",
                -TOO_SHORT_PENALTY,
                Severity::Medium,
                format!("Post too short ({length} chars)"),
            );
        } else if length < OPTIMAL_LENGTH_MIN {
            tally.push(
                "BELOW_OPTIMAL",
                -BELOW_OPTIMAL_PENALTY,
                Severity::Low,
                format!(
                    "Below optimal length ({length} chars, aim for {OPTIMAL_LENGTH_MIN}-{OPTIMAL_LENGTH_MAX})"
                ),
            );
        }

        let caps = features.caps_ratio;
        if caps > EXCESSIVE_CAPS_RATIO {
            tally.push(
                "EXCESSIVE_CAPS",
                -EXCESSIVE_CAPS_PENALTY,
                Severity::High,
                format!("Excessive capitalization ({:.1}%)", caps * 100.0),
            );
        } else if caps > MAX_CAPS_RATIO {
            tally.push(
                "HIGH_CAPS",
                -HIGH_CAPS_PENALTY,
                Severity::Medium,
                format!("High capitalization ({:.1}%)", caps * 100.0),
            );
        }

        if features.newline_count > MAX_NEWLINES {
            tally.push(
                "EXCESSIVE_NEWLINES",
                -EXCESSIVE_NEWLINES_PENALTY,
                Severity::Medium,
                format!("Excessive newlines ({})", features.newline_count),
            );
        }

        if features.hashtag_count > MAX_HASHTAGS {
            tally.push(
                "HASHTAG_SPAM",
                -HASHTAG_SPAM_PENALTY,
                Severity::Medium,
                format!("Too many hashtags ({})", features.hashtag_count),
            );
        }

        tally
    }

    fn engagement(features: &TextFeatures) -> Tally {
        let mut tally = Tally::new(ENGAGEMENT_BASELINE, Stage::Engagement);

        match features.media_type {
            MediaType::Video => {
                tally.push("VIDEO_MEDIA", VIDEO_BOOST, Severity::Low, "Video content")
            }
            MediaType::Image => {
                tally.push("IMAGE_MEDIA", IMAGE_BOOST, Severity::Low, "Image content")
            }
            MediaType::Gif => tally.push("GIF_MEDIA", GIF_BOOST, Severity::Low, "GIF content"),
            MediaType::None => {}
        }

        if features.has_question {
            tally.push(
                "HAS_QUESTION",
                QUESTION_BOOST,
                Severity::Low,
                "Question detected, invites replies",
            );
        }

        if (SWEET_SPOT_MIN..=SWEET_SPOT_MAX).contains(&features.length) {
            tally.push(
                "OPTIMAL_LENGTH",
                OPTIMAL_LENGTH_BOOST,
                Severity::Low,
                format!("Optimal length ({} chars)", features.length),
            );
        }

        if features.caps_ratio <= RECOMMENDED_CAPS_RATIO
            && features.max_punctuation_run < PUNCTUATION_RUN_LIMIT
        {
            tally.push(
                "GOOD_FORMATTING",
                GOOD_FORMATTING_BOOST,
                Severity::Low,
                "Clean formatting",
            );
        }

        tally
    }

    fn global_multipliers(findings: &SafetyFindings, options: &AnalyzeOptions) -> Vec<Adjustment> {
        let mut out = Vec::new();

        if findings.has(SafetyFlag::HighSpammyContent) {
            out.push(Adjustment::new(
                "SPAM_FILTER",
                Stage::Overall,
                Effect::Scale(SPAM_FILTER_MULTIPLIER),
                Severity::Critical,
                "Likely removed by the spam hard filter",
            ));
        }
        if findings.has(SafetyFlag::NsfwContent) {
            out.push(Adjustment::new(
                "NSFW_FILTER",
                Stage::Overall,
                Effect::Scale(NSFW_FILTER_MULTIPLIER),
                Severity::Critical,
                "Likely removed by the NSFW hard filter",
            ));
        }
        if findings.has(SafetyFlag::HighToxicity) || findings.has(SafetyFlag::UntrustedUrl) {
            out.push(Adjustment::new(
                "ABUSIVE_QUALITY_DOWNRANK",
                Stage::Overall,
                Effect::Scale(ABUSIVE_QUALITY_MULTIPLIER),
                Severity::High,
                "Likely moved to the abusive-quality section",
            ));
        }
        if options.simulate_oon {
            out.push(Adjustment::new(
                "OUT_OF_NETWORK",
                Stage::Overall,
                Effect::Scale(OON_MULTIPLIER),
                Severity::Low,
                "Simulated out-of-network reduction",
            ));
        }

        out
    }
}

fn preview_terms(terms: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for term in terms {
        if !unique.contains(&term.as_str()) {
            unique.push(term);
        }
    }
    let shown: Vec<&str> = unique.iter().take(3).copied().collect();
    if unique.len() > shown.len() {
        format!("{}, ...", shown.join(", "))
    } else {
        shown.join(", ")
    }
}
