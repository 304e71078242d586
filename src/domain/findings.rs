// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use serde::Serialize;

/// Named safety rules. Every flag carries a score effect, so each one that
/// fires shows up in the penalties under the same label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyFlag {
    HighToxicity,
    ElevatedToxicity,
    HighSpammyContent,
    ElevatedSpam,
    NsfwContent,
    ElevatedNsfw,
    UntrustedUrl,
}

impl SafetyFlag {
    pub const ALL: &'static [SafetyFlag] = &[
        Self::HighToxicity,
        Self::ElevatedToxicity,
        Self::HighSpammyContent,
        Self::ElevatedSpam,
        Self::NsfwContent,
        Self::ElevatedNsfw,
        Self::UntrustedUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighToxicity => "HIGH_TOXICITY",
            Self::ElevatedToxicity => "ELEVATED_TOXICITY",
            Self::HighSpammyContent => "HIGH_SPAMMY_CONTENT",
            Self::ElevatedSpam => "ELEVATED_SPAM",
            Self::NsfwContent => "NSFW_CONTENT",
            Self::ElevatedNsfw => "ELEVATED_NSFW",
            Self::UntrustedUrl => "UNTRUSTED_URL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == s)
    }

    /// True for flags that mirror a hard filter or downranking rule,
    /// as opposed to the informational `ELEVATED_*` tier.
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            Self::HighToxicity | Self::HighSpammyContent | Self::NsfwContent | Self::UntrustedUrl
        )
    }
}

impl std::fmt::Display for SafetyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlTrust {
    Trusted,
    Neutral,
    Untrusted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlVerdict {
    pub url: String,
    pub trust: UrlTrust,
}

/// Output of the safety evaluator: heuristic confidences in [0, 1] plus the
/// rules they tripped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SafetyFindings {
    pub toxicity_score: f64,
    pub spam_score: f64,
    pub nsfw_score: f64,
    pub toxic_terms: Vec<String>,
    pub spam_terms: Vec<String>,
    pub nsfw_terms: Vec<String>,
    pub urls: Vec<UrlVerdict>,
    pub untrusted_url_detected: bool,
    pub triggered_flags: Vec<SafetyFlag>,
}

impl SafetyFindings {
    pub fn has(&self, flag: SafetyFlag) -> bool {
        self.triggered_flags.contains(&flag)
    }

    pub fn untrusted_urls(&self) -> impl Iterator<Item = &str> {
        self.urls
            .iter()
            .filter(|v| v.trust == UrlTrust::Untrusted)
            .map(|v| v.url.as_str())
    }
}
