// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{SafetyFindings, SafetyFlag, TextFeatures, UrlTrust, UrlVerdict};

// Heuristic confidences, not model probabilities. These values are part of
// the scoring contract; changing one changes every downstream score.
pub const TOXICITY_THRESHOLD: f64 = 0.75;
pub const SPAM_THRESHOLD: f64 = 0.70;
pub const NSFW_THRESHOLD: f64 = 0.60;
/// Below the trigger thresholds, scores at or above this still shave points
pub const INFORMATIONAL_THRESHOLD: f64 = 0.25;

/// Confidence contributed by each individual match. A single match stays
/// below every trigger threshold.
pub const TOXICITY_MATCH_WEIGHT: f64 = 0.4;
pub const SPAM_MATCH_WEIGHT: f64 = 0.5;
pub const NSFW_MATCH_WEIGHT: f64 = 0.4;

pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "shorturl.at",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "cutt.ly",
    "rb.gy",
    "tiny.cc",
    "rebrand.ly",
    "s.id",
];

/// Host fragments common in spam landing pages
pub const SUSPICIOUS_HOST_KEYWORDS: &[&str] = &["click", "offer", "promo", "deals"];

pub const TRUSTED_DOMAINS: &[&str] = &[
    "x.com",
    "twitter.com",
    "github.com",
    "wikipedia.org",
    "youtube.com",
    "youtu.be",
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "bbc.co.uk",
    "nytimes.com",
    "arxiv.org",
];

static TOXIC_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "Insult",
            Regex::new(r"(?i)\b(?:hate|stupid|idiots?|dumb|trash|garbage|worst|morons?|losers?|pathetic|disgusting|horrible)\b").unwrap(),
        ),
        (
            "Threat",
            Regex::new(r"(?i)\b(?:kill|die|death|hurt)\s+(?:you|yourself|them)\b").unwrap(),
        ),
        (
            "Directed Profanity",
            Regex::new(r"(?i)\b(?:f\*ck|sh\*t|damn|hell)\s+(?:you|off)\b").unwrap(),
        ),
    ]
});

static SPAM_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "Engagement Bait",
            Regex::new(r"(?i)\b(?:click here|follow for follow|f4f|l4l)\b").unwrap(),
        ),
        (
            "Urgency",
            Regex::new(
                r"(?i)\b(?:buy now|buy (?:bitcoin|crypto|nfts?)|limited time|act now|offer expires)\b",
            )
            .unwrap(),
        ),
        (
            "Income Claim",
            Regex::new(
                r"(?i)\bmake \$\d[\d,]*|\b(?:earn money fast|work(?:ing)? from home|get rich (?:quick|fast))\b",
            )
            .unwrap(),
        ),
        (
            "Crypto Promise",
            Regex::new(r"(?i)\b(?:crypto|bitcoin|nfts?)\b.*?\b(?:guaranteed|profits?|returns)\b")
                .unwrap(),
        ),
        (
            "Paid Contact",
            Regex::new(r"(?i)\b(?:dm for|check bio|link in bio)\b.*?(?:\$|\b(?:money|cash|paid)\b)")
                .unwrap(),
        ),
    ]
});

static NSFW_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "Explicit Term",
            Regex::new(r"(?i)\b(?:sex|porn|xxx|nsfw|nude|naked)\b").unwrap(),
        ),
        (
            "Adult Phrase",
            Regex::new(r"(?i)\b(?:sexual|adult content|explicit (?:content|photos|pics|videos?))\b")
                .unwrap(),
        ),
    ]
});

/// How to treat a link whose host is neither allow-listed nor known-bad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownUrlPolicy {
    #[default]
    Neutral,
    Untrusted,
}

impl std::fmt::Display for UnknownUrlPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neutral => write!(f, "neutral"),
            Self::Untrusted => write!(f, "untrusted"),
        }
    }
}

/// Domain lists used to classify links. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPolicy {
    pub trusted: Vec<String>,
    pub shorteners: Vec<String>,
    pub unknown: UnknownUrlPolicy,
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self {
            trusted: TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            shorteners: SHORTENER_DOMAINS.iter().map(|d| d.to_string()).collect(),
            unknown: UnknownUrlPolicy::default(),
        }
    }
}

impl UrlPolicy {
    /// Built-in lists extended with caller-supplied domains.
    pub fn extended(trusted: &[String], shorteners: &[String], unknown: UnknownUrlPolicy) -> Self {
        let mut policy = Self {
            unknown,
            ..Self::default()
        };
        policy
            .trusted
            .extend(trusted.iter().map(|d| d.trim().to_ascii_lowercase()));
        policy
            .shorteners
            .extend(shorteners.iter().map(|d| d.trim().to_ascii_lowercase()));
        policy
    }

    pub fn classify(&self, raw: &str) -> UrlTrust {
        let lower = raw.to_ascii_lowercase();
        let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
            raw.to_string()
        } else {
            format!("http://{raw}")
        };

        // Malformed links are treated like obfuscated ones
        let Ok(parsed) = Url::parse(&candidate) else {
            return UrlTrust::Untrusted;
        };
        let Some(host) = parsed.host_str() else {
            return UrlTrust::Untrusted;
        };
        let host = host.to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);

        if self.shorteners.iter().any(|d| domain_matches(host, d)) {
            return UrlTrust::Untrusted;
        }
        if SUSPICIOUS_HOST_KEYWORDS.iter().any(|k| host.contains(k)) {
            return UrlTrust::Untrusted;
        }
        if self.trusted.iter().any(|d| domain_matches(host, d)) {
            return UrlTrust::Trusted;
        }

        match self.unknown {
            UnknownUrlPolicy::Neutral => UrlTrust::Neutral,
            UnknownUrlPolicy::Untrusted => UrlTrust::Untrusted,
        }
    }
}

fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Diminishing-returns accumulation: one match already counts, more
/// matches saturate toward 1.0.
pub fn confidence(matches: usize, weight: f64) -> f64 {
    if matches == 0 {
        return 0.0;
    }
    let n = matches.min(64) as i32;
    (1.0 - (1.0 - weight).powi(n)).clamp(0.0, 1.0)
}

fn collect_matches(text: &str, patterns: &[(&str, Regex)]) -> Vec<String> {
    let mut found = Vec::new();
    for (_, pattern) in patterns {
        for m in pattern.find_iter(text) {
            found.push(m.as_str().to_lowercase());
        }
    }
    found
}

fn classify_score(
    score: f64,
    threshold: f64,
    high: SafetyFlag,
    elevated: SafetyFlag,
    flags: &mut Vec<SafetyFlag>,
) {
    if score >= threshold {
        flags.push(high);
    } else if score >= INFORMATIONAL_THRESHOLD {
        flags.push(elevated);
    }
}

pub struct SafetyEvaluator;

impl SafetyEvaluator {
    /// Run the toxicity, spam, NSFW and link checks over a post.
    pub fn evaluate(features: &TextFeatures, text: &str, policy: &UrlPolicy) -> SafetyFindings {
        let toxic_terms = collect_matches(text, &TOXIC_PATTERNS);
        let spam_terms = collect_matches(text, &SPAM_PATTERNS);
        let nsfw_terms = collect_matches(text, &NSFW_PATTERNS);

        let toxicity_score = confidence(toxic_terms.len(), TOXICITY_MATCH_WEIGHT);
        let spam_score = confidence(spam_terms.len(), SPAM_MATCH_WEIGHT);
        let nsfw_score = confidence(nsfw_terms.len(), NSFW_MATCH_WEIGHT);

        let urls: Vec<UrlVerdict> = features
            .urls
            .iter()
            .map(|url| UrlVerdict {
                url: url.clone(),
                trust: policy.classify(url),
            })
            .collect();
        let untrusted_url_detected = urls.iter().any(|v| v.trust == UrlTrust::Untrusted);

        let mut triggered_flags = Vec::new();
        classify_score(
            toxicity_score,
            TOXICITY_THRESHOLD,
            SafetyFlag::HighToxicity,
            SafetyFlag::ElevatedToxicity,
            &mut triggered_flags,
        );
        classify_score(
            spam_score,
            SPAM_THRESHOLD,
            SafetyFlag::HighSpammyContent,
            SafetyFlag::ElevatedSpam,
            &mut triggered_flags,
        );
        classify_score(
            nsfw_score,
            NSFW_THRESHOLD,
            SafetyFlag::NsfwContent,
            SafetyFlag::ElevatedNsfw,
            &mut triggered_flags,
        );
        if untrusted_url_detected {
            triggered_flags.push(SafetyFlag::UntrustedUrl);
        }

        debug!(
            toxicity = toxicity_score,
            spam = spam_score,
            nsfw = nsfw_score,
            flags = triggered_flags.len(),
            "safety evaluated"
        );

        SafetyFindings {
            toxicity_score,
            spam_score,
            nsfw_score,
            toxic_terms,
            spam_terms,
            nsfw_terms,
            urls,
            untrusted_url_detected,
            triggered_flags,
        }
    }
}
