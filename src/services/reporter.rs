// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Adjustment, RiskTier, SafetyFlag, Severity, Stage, TextFeatures};
use crate::error::{Error, Result};
use crate::services::analyzer::Analysis;
use crate::services::composer::{MAX_CAPS_RATIO, OPTIMAL_LENGTH_MIN, SWEET_SPOT_MAX, SWEET_SPOT_MIN};

/// Above this many hashtags a trim is recommended, before any penalty applies
const RECOMMENDED_MAX_HASHTAGS: usize = 3;
const RECOMMENDED_MAX_NEWLINES: usize = 5;

pub const LOOKS_GOOD: &str = "Looks good! This post should perform well.";

/// A penalty or boost as presented to the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub stage: Stage,
    pub severity: Severity,
    /// Signed percentage-equivalent effect, e.g. `-45%`
    pub impact: String,
    pub percent: f64,
    pub description: String,
}

impl From<&Adjustment> for ReportEntry {
    fn from(a: &Adjustment) -> Self {
        Self {
            label: a.label.clone(),
            stage: a.stage,
            severity: a.severity,
            impact: a.impact(),
            percent: round1(a.percent()),
            description: a.description.clone(),
        }
    }
}

/// Serializable projection of an [`Analysis`]. Holds no scoring logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub overall_score: u8,
    pub risk_tier: RiskTier,
    pub safety_score: f64,
    pub quality_score: f64,
    pub engagement_score: f64,
    pub triggered_flags: Vec<SafetyFlag>,
    pub penalties: Vec<ReportEntry>,
    pub boosts: Vec<ReportEntry>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub features: TextFeatures,
}

/// Wrapper so a list of reports can be exported as TOML, which has no
/// top-level arrays.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub reports: Vec<Report>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let breakdown = &analysis.breakdown;

        let warnings = breakdown
            .penalties
            .iter()
            .filter(|p| warrants_warning(p))
            .map(|p| format!("{} {}: {} ({})", p.severity.as_str(), p.label, p.description, p.impact()))
            .collect();

        Self {
            overall_score: breakdown.overall_score,
            risk_tier: RiskTier::from_score(breakdown.overall_score),
            safety_score: round1(breakdown.safety_score),
            quality_score: round1(breakdown.quality_score),
            engagement_score: round1(breakdown.engagement_score),
            triggered_flags: analysis.findings.triggered_flags.clone(),
            penalties: breakdown.penalties.iter().map(ReportEntry::from).collect(),
            boosts: breakdown.boosts.iter().map(ReportEntry::from).collect(),
            warnings,
            recommendations: Self::recommendations(analysis),
            features: analysis.features.clone(),
        }
    }

    fn recommendations(analysis: &Analysis) -> Vec<String> {
        let features = &analysis.features;
        let findings = &analysis.findings;
        let breakdown = &analysis.breakdown;
        let mut out: Vec<String> = Vec::new();

        if findings.has(SafetyFlag::HighToxicity) || findings.has(SafetyFlag::ElevatedToxicity) {
            out.push("Rephrase hostile or insulting language to avoid abusive-quality downranking".into());
        }
        if findings.has(SafetyFlag::HighSpammyContent) || findings.has(SafetyFlag::ElevatedSpam) {
            out.push("Remove spam phrasing (click, buy, follow-for-follow) to avoid the spam filter".into());
        }
        if findings.has(SafetyFlag::NsfwContent) || findings.has(SafetyFlag::ElevatedNsfw) {
            out.push("Remove explicit language to avoid the NSFW filter".into());
        }
        if findings.has(SafetyFlag::UntrustedUrl) {
            out.push("Replace shortened or suspicious links with direct links".into());
        }

        if features.length < OPTIMAL_LENGTH_MIN {
            out.push(format!("Expand the post to {OPTIMAL_LENGTH_MIN}+ characters"));
        }
        if features.caps_ratio > MAX_CAPS_RATIO {
            out.push("Reduce capitalization and use sentence case".into());
        }
        if features.hashtag_count > RECOMMENDED_MAX_HASHTAGS {
            out.push(format!(
                "Reduce hashtags to 1-{RECOMMENDED_MAX_HASHTAGS} (currently {})",
                features.hashtag_count
            ));
        }
        if features.newline_count > RECOMMENDED_MAX_NEWLINES {
            out.push("Reduce excessive line breaks".into());
        }

        if !breakdown.has_boost("HAS_QUESTION") && features.length > OPTIMAL_LENGTH_MIN {
            out.push("Add a question to invite replies".into());
        }
        if !features.media_type.is_present() {
            out.push("Add an image or video for a +20-30% engagement boost".into());
        }
        if (OPTIMAL_LENGTH_MIN..SWEET_SPOT_MIN).contains(&features.length) {
            out.push(format!(
                "Aim for {SWEET_SPOT_MIN}-{SWEET_SPOT_MAX} characters for maximum reach"
            ));
        }

        if out.is_empty() {
            out.push(LOOKS_GOOD.into());
        }
        out
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        render(self, format)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Toml,
}

impl ExportFormat {
    /// Infer the format from a `.json` or `.toml` extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

pub fn render<T: Serialize>(value: &T, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        ExportFormat::Toml => toml::to_string_pretty(value).map_err(|e| Error::Export(e.to_string())),
    }
}

/// Write an already-computed result to `path`.
pub fn export<T: Serialize>(value: &T, path: &Path, format: ExportFormat) -> Result<()> {
    let mut content = render(value, format)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

/// Every safety penalty warns. Quality penalties warn unless they are mere
/// nudges, and overall multipliers only when they stem from a filter or downrank.
fn warrants_warning(p: &Adjustment) -> bool {
    match p.stage {
        Stage::Safety => true,
        Stage::Quality => p.severity > Severity::Low,
        Stage::Overall => p.severity >= Severity::High,
        Stage::Engagement => false,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
