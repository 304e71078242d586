// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use serde::Serialize;

/// Which score an adjustment was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Safety,
    Quality,
    Engagement,
    Overall,
}

/// Flat point change on a component score, or a multiplier on the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Effect {
    Points(f64),
    Scale(f64),
}

impl Effect {
    /// Percentage-equivalent effect: `-45` for `Points(-45)`, `-40` for `Scale(0.6)`.
    pub fn percent(&self) -> f64 {
        match *self {
            Self::Points(p) => p,
            Self::Scale(m) => (m - 1.0) * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// A single penalty or boost, recorded in the order it was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub label: String,
    pub stage: Stage,
    pub effect: Effect,
    pub severity: Severity,
    pub description: String,
}

impl Adjustment {
    pub fn new(
        label: impl Into<String>,
        stage: Stage,
        effect: Effect,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            stage,
            effect,
            severity,
            description: description.into(),
        }
    }

    pub fn percent(&self) -> f64 {
        self.effect.percent()
    }

    /// Signed impact string, e.g. `-45%` or `+25%`.
    pub fn impact(&self) -> String {
        let pct = self.percent();
        if pct >= 0.0 {
            format!("+{}%", format_amount(pct))
        } else {
            format!("-{}%", format_amount(-pct))
        }
    }
}

fn format_amount(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Coarse label derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub const LOW_CUTOFF: u8 = 80;
    pub const MEDIUM_CUTOFF: u8 = 60;
    pub const HIGH_CUTOFF: u8 = 40;

    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= Self::LOW_CUTOFF => Self::Low,
            s if s >= Self::MEDIUM_CUTOFF => Self::Medium,
            s if s >= Self::HIGH_CUTOFF => Self::High,
            _ => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub safety_score: f64,
    pub quality_score: f64,
    pub engagement_score: f64,
    /// Safety, then quality, then overall-stage multipliers
    pub penalties: Vec<Adjustment>,
    pub boosts: Vec<Adjustment>,
    pub overall_score: u8,
}

impl ScoreBreakdown {
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.overall_score)
    }

    pub fn has_penalty(&self, label: &str) -> bool {
        self.penalties.iter().any(|p| p.label == label)
    }

    pub fn has_boost(&self, label: &str) -> bool {
        self.boosts.iter().any(|b| b.label == label)
    }
}
