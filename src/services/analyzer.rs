// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::domain::{MediaType, RiskTier, SafetyFindings, ScoreBreakdown, TextFeatures};
use crate::services::composer::{AnalyzeOptions, ScoreComposer};
use crate::services::extractor::FeatureExtractor;
use crate::services::reporter::Report;
use crate::services::safety::{SafetyEvaluator, UrlPolicy};

static DEFAULT_ANALYZER: LazyLock<Analyzer> = LazyLock::new(Analyzer::default);

/// Everything the engine derived from one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub features: TextFeatures,
    pub findings: SafetyFindings,
    pub breakdown: ScoreBreakdown,
}

impl Analysis {
    pub fn overall_score(&self) -> u8 {
        self.breakdown.overall_score
    }

    pub fn risk_tier(&self) -> RiskTier {
        self.breakdown.risk_tier()
    }

    pub fn report(&self) -> Report {
        Report::from_analysis(self)
    }
}

/// A candidate post for batch analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub text: String,
    pub media: MediaType,
}

impl Post {
    pub fn new(text: impl Into<String>, media: MediaType) -> Self {
        Self {
            text: text.into(),
            media,
        }
    }
}

/// Runs extractor → safety → composer. Holds only read-only configuration,
/// so one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    policy: UrlPolicy,
}

impl Analyzer {
    pub fn new(policy: UrlPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UrlPolicy {
        &self.policy
    }

    pub fn analyze(&self, text: &str, media: MediaType, options: &AnalyzeOptions) -> Analysis {
        let features = FeatureExtractor::extract(text, media);
        let findings = SafetyEvaluator::evaluate(&features, text, &self.policy);
        let breakdown = ScoreComposer::compose(&features, &findings, options);

        debug!(
            length = features.length,
            media = %media,
            flags = findings.triggered_flags.len(),
            overall = breakdown.overall_score,
            tier = %breakdown.risk_tier(),
            "post analyzed"
        );

        Analysis {
            features,
            findings,
            breakdown,
        }
    }

    /// Analyze posts in parallel. Results keep the input order.
    pub fn analyze_batch(&self, posts: &[Post], options: &AnalyzeOptions) -> Vec<Analysis> {
        posts
            .par_iter()
            .map(|post| self.analyze(&post.text, post.media, options))
            .collect()
    }
}

/// Analyze one post with the built-in URL policy.
pub fn analyze(text: &str, media: MediaType, options: &AnalyzeOptions) -> Analysis {
    DEFAULT_ANALYZER.analyze(text, media, options)
}
