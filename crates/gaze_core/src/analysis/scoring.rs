//! # Anxiety Indicator Scoring
//!
//! Composite score over one session's gaze metrics.
//!
//! ## Scoring Breakdown
//! - **Blink behavior (up to 6 points)**: rate, duration, rhythm
//! - **Eye movement (up to 3 points)**: saccade rate, scan velocity
//! - **Gaze avoidance (up to 5 points)**: center avoidance, edge fixation
//!
//! Each rule contributes a fixed number of points when its threshold is
//! crossed; the thresholds live in [`ScoringConfig`]. The result is a
//! screening signal, not a diagnosis.

use serde::{Deserialize, Serialize};

use crate::analysis::stats::SessionMetrics;
use crate::config::ScoringConfig;

/// Score ceiling reported alongside every assessment. Mutually
/// exclusive rules keep the practical maximum slightly below this.
pub const MAX_SCORE: u32 = 15;

/// Severity band for the cumulative score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Score < 2: nothing noteworthy
    None,
    /// Score 2-4: mild indicators
    Mild,
    /// Score 5-7: moderate indicators
    Moderate,
    /// Score >= 8: strong indicators
    High,
}

impl Severity {
    /// Determine the band from a cumulative score.
    pub fn from_score(score: u32) -> Self {
        if score >= 8 {
            Severity::High
        } else if score >= 5 {
            Severity::Moderate
        } else if score >= 2 {
            Severity::Mild
        } else {
            Severity::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Mild => "MILD",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
        }
    }

    /// One-line assessment text for reports.
    pub fn describe(&self) -> &'static str {
        match self {
            Severity::None => "No significant anxiety indicators",
            Severity::Mild => "MILD anxiety indicators detected",
            Severity::Moderate => "MODERATE anxiety indicators detected",
            Severity::High => "HIGH anxiety indicators detected",
        }
    }
}

/// Behavior family an indicator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorCategory {
    Blink,
    Movement,
    Avoidance,
}

/// One triggered rule with its point contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub category: IndicatorCategory,
    pub points: u32,
    pub description: String,
}

impl Indicator {
    pub fn new(category: IndicatorCategory, points: u32, description: impl Into<String>) -> Self {
        Self {
            category,
            points,
            description: description.into(),
        }
    }
}

/// Scoring outcome for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnxietyAssessment {
    pub score: u32,
    pub max_score: u32,
    pub severity: Severity,
    pub indicators: Vec<Indicator>,
}

impl AnxietyAssessment {
    /// Build an assessment from triggered indicators.
    pub fn new(indicators: Vec<Indicator>) -> Self {
        let score = indicators.iter().map(|i| i.points).sum();
        Self {
            score,
            max_score: MAX_SCORE,
            severity: Severity::from_score(score),
            indicators,
        }
    }

    /// Format as a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} (score: {}/{})",
            self.severity.describe(),
            self.score,
            self.max_score
        )
    }
}

/// Apply the rule set to a session's metrics.
pub fn score_metrics(metrics: &SessionMetrics, config: &ScoringConfig) -> AnxietyAssessment {
    let mut indicators: Vec<Indicator> = Vec::new();

    // ========================================================================
    // 1. BLINK BEHAVIOR
    // ========================================================================
    if metrics.blink_rate_per_min > config.high_blink_rate_per_min {
        indicators.push(Indicator::new(
            IndicatorCategory::Blink,
            3,
            format!(
                "High blink rate: {:.1}/min (normal: ~15-20/min)",
                metrics.blink_rate_per_min
            ),
        ));
    } else if metrics.blink_rate_per_min < config.low_blink_rate_per_min {
        indicators.push(Indicator::new(
            IndicatorCategory::Blink,
            1,
            format!(
                "Very low blink rate: {:.1}/min (may indicate stress)",
                metrics.blink_rate_per_min
            ),
        ));
    }

    // Duration rules only apply once at least one blink was measured
    if metrics.avg_blink_duration_secs > 0.0
        && metrics.avg_blink_duration_secs < config.rapid_blink_secs
    {
        indicators.push(Indicator::new(
            IndicatorCategory::Blink,
            2,
            format!(
                "Rapid blinking pattern: {:.3}s avg duration",
                metrics.avg_blink_duration_secs
            ),
        ));
    } else if metrics.avg_blink_duration_secs > config.prolonged_blink_secs {
        indicators.push(Indicator::new(
            IndicatorCategory::Blink,
            1,
            format!(
                "Prolonged blinks: {:.3}s avg duration",
                metrics.avg_blink_duration_secs
            ),
        ));
    }

    if metrics.blink_duration_variance > config.blink_variance_threshold {
        indicators.push(Indicator::new(
            IndicatorCategory::Blink,
            1,
            "Irregular blink patterns detected",
        ));
    }

    // ========================================================================
    // 2. EYE MOVEMENT
    // ========================================================================
    if metrics.saccade_rate_per_min > config.saccade_rate_per_min {
        indicators.push(Indicator::new(
            IndicatorCategory::Movement,
            2,
            format!(
                "Excessive eye movements: {:.1}/min",
                metrics.saccade_rate_per_min
            ),
        ));
    }

    if metrics.avg_velocity_px_s > config.rapid_scan_velocity_px_s {
        indicators.push(Indicator::new(
            IndicatorCategory::Movement,
            1,
            format!(
                "Rapid gaze scanning: {:.0} pixels/sec",
                metrics.avg_velocity_px_s
            ),
        ));
    }

    // ========================================================================
    // 3. GAZE AVOIDANCE
    // ========================================================================
    if metrics.center_ratio < config.strong_avoidance_ratio {
        indicators.push(Indicator::new(
            IndicatorCategory::Avoidance,
            3,
            format!(
                "Strong center avoidance: Only {:.1}% center focus",
                metrics.center_ratio * 100.0
            ),
        ));
    } else if metrics.center_ratio < config.moderate_avoidance_ratio {
        indicators.push(Indicator::new(
            IndicatorCategory::Avoidance,
            2,
            format!(
                "Moderate center avoidance: {:.1}% center focus",
                metrics.center_ratio * 100.0
            ),
        ));
    }

    if metrics.edge_ratio > config.edge_fixation_ratio {
        indicators.push(Indicator::new(
            IndicatorCategory::Avoidance,
            2,
            format!("High edge fixation: {:.1}% edge focus", metrics.edge_ratio * 100.0),
        ));
    }

    AnxietyAssessment::new(indicators)
}
