//! Full insights report over one snapshot.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use super::clock::Clock;
use super::cost::{compute_cost_insights, CostInsight};
use super::efficiency::{
    compute_efficiency, compute_performance_radar, EfficiencyScores, PerformanceRadar,
};
use super::health::{compute_health_insights_in, HealthStats};
use super::patterns::{compute_session_patterns_in, SessionPatterns};
use super::rest::{compute_rest_state, RestPreferences, RestState};
use super::trends::{compute_week_over_week, WeekDelta};
use crate::snapshot::Snapshot;
use crate::types::{ModelStats, TimeRange};

/// Every derived metric for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    /// Range used for efficiency and cost figures
    pub range: TimeRange,
    pub generated_at: DateTime<Utc>,
    pub rest_preferences: RestPreferences,
    pub rest: RestState,
    pub health: HealthStats,
    pub patterns: SessionPatterns,
    pub efficiency: EfficiencyScores,
    pub radar: PerformanceRadar,
    pub cost_insights: Vec<CostInsight>,
    /// Per-model totals for the selected range
    pub models: Vec<ModelStats>,
    /// Week over week, None unless both week and month stats are present
    pub weekly: Option<[WeekDelta; 3]>,
}

impl InsightsReport {
    /// Build the report with hours of day in local time.
    pub fn build(
        snapshot: &Snapshot,
        range: TimeRange,
        prefs: &RestPreferences,
        clock: &dyn Clock,
    ) -> Self {
        Self::build_in(snapshot, range, prefs, clock, &Local)
    }

    /// Build the report with hours of day taken in `tz`.
    pub fn build_in<Tz: TimeZone>(
        snapshot: &Snapshot,
        range: TimeRange,
        prefs: &RestPreferences,
        clock: &dyn Clock,
        tz: &Tz,
    ) -> Self {
        let sessions = &snapshot.sessions;
        let summary = snapshot.summary(range);
        let range_stats = snapshot.range(range);
        let models = range_stats
            .map(|r| r.models.as_slice())
            .unwrap_or_default();
        let error_rate = range_stats.and_then(|r| r.error_rate.as_ref());

        let weekly = match (
            snapshot.range(TimeRange::Week),
            snapshot.range(TimeRange::Month),
        ) {
            (Some(week), Some(month)) => Some(compute_week_over_week(&week.summary, &month.summary)),
            _ => None,
        };

        let report = InsightsReport {
            range,
            generated_at: clock.now(),
            rest_preferences: *prefs,
            rest: compute_rest_state(sessions, prefs, clock),
            health: compute_health_insights_in(sessions, tz),
            patterns: compute_session_patterns_in(sessions, tz),
            efficiency: compute_efficiency(&summary),
            radar: compute_performance_radar(&summary, error_rate),
            cost_insights: compute_cost_insights(&summary, models),
            models: models.to_vec(),
            weekly,
        };

        tracing::debug!(
            range = range.as_str(),
            sessions = sessions.len(),
            models = models.len(),
            rest_status = ?report.rest.status,
            insights = report.health.insights.len(),
            "Built insights report"
        );

        report
    }
}
