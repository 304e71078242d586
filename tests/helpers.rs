// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use postcheck::domain::{MediaType, SafetyFindings, TextFeatures};
use postcheck::services::extractor::FeatureExtractor;
use postcheck::services::safety::{SafetyEvaluator, UrlPolicy};
use postcheck::{Analysis, AnalyzeOptions, Analyzer};

/// Shouty spam with a shortened link, 48 chars.
#[allow(dead_code)]
pub const SPAM_POST: &str = "CLICK HERE NOW!!! BUY BITCOIN ... bit.ly/scam123";

/// Three insults, no links or media, 61 chars.
#[allow(dead_code)]
pub const TOXIC_POST: &str = "You are the worst, this is garbage, and your fans are idiots.";

/// Friendly question in the 100-200 char sweet spot (147 chars).
#[allow(dead_code)]
pub const CLEAN_QUESTION_POST: &str = "What is your favorite way to start a slow weekend morning? I like a long walk, fresh coffee, and a good book on the porch before the day gets busy.";

/// 90% uppercase letters (45 of 50), 59 chars.
#[allow(dead_code)]
pub fn shouting_post() -> String {
    format!("{}there", "HELLO ".repeat(9))
}

#[allow(dead_code)]
pub fn features(text: &str) -> TextFeatures {
    FeatureExtractor::extract(text, MediaType::None)
}

/// Extract and evaluate with the built-in link lists.
#[allow(dead_code)]
pub fn findings(text: &str) -> SafetyFindings {
    let features = features(text);
    SafetyEvaluator::evaluate(&features, text, &UrlPolicy::default())
}

#[allow(dead_code)]
pub fn analyze(text: &str, media: MediaType) -> Analysis {
    Analyzer::default().analyze(text, media, &AnalyzeOptions::default())
}

#[allow(dead_code)]
pub fn labels(entries: &[postcheck::domain::Adjustment]) -> Vec<&str> {
    entries.iter().map(|a| a.label.as_str()).collect()
}
