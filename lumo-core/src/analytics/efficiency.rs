//! Efficiency scoring.

use serde::Serialize;

use crate::types::{ErrorRateStats, SummaryStats};

/// Cost per session (USD) at which the cost dimension bottoms out.
const RADAR_COST_CEILING: f64 = 0.5;
/// Sessions per day that count as full activity.
const RADAR_DAILY_SESSIONS: f64 = 10.0;
/// Lines added plus commits that count as full output.
const RADAR_OUTPUT_TARGET: f64 = 500.0;

/// Headline efficiency figures for a time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EfficiencyScores {
    /// Cache hit percentage, passed through
    pub cache_rate: f64,
    pub cost_per_session: f64,
    /// Accepted share of code edit decisions, 0-100
    pub edit_accept_rate: f64,
}

pub fn compute_efficiency(stats: &SummaryStats) -> EfficiencyScores {
    let total_edits = stats.code_edit_accepts + stats.code_edit_rejects;
    let edit_accept_rate = if total_edits > 0 {
        stats.code_edit_accepts as f64 / total_edits as f64 * 100.0
    } else {
        0.0
    };

    EfficiencyScores {
        cache_rate: stats.cache_percentage,
        cost_per_session: cost_per_session(stats),
        edit_accept_rate,
    }
}

pub(crate) fn cost_per_session(stats: &SummaryStats) -> f64 {
    if stats.total_sessions > 0 {
        stats.total_cost / stats.total_sessions as f64
    } else {
        0.0
    }
}

/// Five 0-100 scores for the performance radar chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerformanceRadar {
    /// 100 at zero cost per session, 0 at $0.50 or more
    pub cost_efficiency: f64,
    pub cache_rate: f64,
    /// Share of requests that did not error
    pub reliability: f64,
    /// Today's sessions against a 10-session day
    pub activity: f64,
    /// Lines added plus commits against a 500 target
    pub output: f64,
}

impl PerformanceRadar {
    /// Dimensions in chart order.
    pub fn dimensions(&self) -> [(&'static str, f64); 5] {
        [
            ("Cost Efficiency", self.cost_efficiency),
            ("Cache Rate", self.cache_rate),
            ("Reliability", self.reliability),
            ("Activity", self.activity),
            ("Output", self.output),
        ]
    }
}

/// Score the radar dimensions. Missing error data counts as no errors.
pub fn compute_performance_radar(
    stats: &SummaryStats,
    errors: Option<&ErrorRateStats>,
) -> PerformanceRadar {
    let error_rate = errors.map(|e| e.error_rate).unwrap_or(0.0);
    let output = (stats.lines_of_code_added + stats.commits) as f64;

    PerformanceRadar {
        cost_efficiency: (100.0 - cost_per_session(stats) / RADAR_COST_CEILING * 100.0).max(0.0),
        cache_rate: stats.cache_percentage,
        reliability: (1.0 - error_rate) * 100.0,
        activity: (stats.today_sessions as f64 / RADAR_DAILY_SESSIONS * 100.0).min(100.0),
        output: (output / RADAR_OUTPUT_TARGET * 100.0).min(100.0),
    }
}
