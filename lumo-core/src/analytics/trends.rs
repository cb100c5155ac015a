//! Week-over-week comparison.
//!
//! The backend only serves fixed windows (today, week, month, all), so the
//! previous week is estimated as the month minus the current week. This
//! overcounts when the month holds more than two weeks of data; the figures
//! are a trend indicator, not an exact comparison.

use serde::Serialize;

use crate::format::{format_currency, format_duration_secs};
use crate::types::SummaryStats;

/// How a delta's values should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaFormat {
    Number,
    Currency,
    /// Seconds
    Duration,
}

impl DeltaFormat {
    /// Format a value of this kind for display.
    pub fn display(&self, value: f64) -> String {
        match self {
            DeltaFormat::Number => format!("{:.0}", value),
            DeltaFormat::Currency => format_currency(value, 2),
            DeltaFormat::Duration => format_duration_secs(value.max(0.0) as u64),
        }
    }
}

/// One row of the weekly summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDelta {
    pub label: &'static str,
    pub current: f64,
    pub previous: f64,
    pub change_percent: f64,
    pub format: DeltaFormat,
}

impl WeekDelta {
    fn new(label: &'static str, current: f64, previous: f64, format: DeltaFormat) -> Self {
        Self {
            label,
            current,
            previous,
            change_percent: calc_delta(current, previous),
            format,
        }
    }

    /// Current value formatted per [`DeltaFormat`].
    pub fn current_display(&self) -> String {
        self.format.display(self.current)
    }
}

/// Percentage change from `previous` to `current`.
///
/// Growth from zero is shown as 100%.
pub fn calc_delta(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Sessions, cost and active time compared between two windows.
pub fn compute_weekly_delta(current: &SummaryStats, previous: &SummaryStats) -> [WeekDelta; 3] {
    [
        WeekDelta::new(
            "Sessions",
            current.total_sessions as f64,
            previous.total_sessions as f64,
            DeltaFormat::Number,
        ),
        WeekDelta::new(
            "Cost",
            current.total_cost,
            previous.total_cost,
            DeltaFormat::Currency,
        ),
        WeekDelta::new(
            "Active Time",
            current.active_time_seconds as f64,
            previous.active_time_seconds as f64,
            DeltaFormat::Duration,
        ),
    ]
}

/// Estimate last week's stats from this week's and this month's.
///
/// Sessions, cost and active time are the month totals minus the current
/// week, floored at zero. Every other field is the month's value.
pub fn estimate_previous_week(current_week: &SummaryStats, month: &SummaryStats) -> SummaryStats {
    SummaryStats {
        total_sessions: month.total_sessions.saturating_sub(current_week.total_sessions),
        total_cost: (month.total_cost - current_week.total_cost).max(0.0),
        active_time_seconds: month
            .active_time_seconds
            .saturating_sub(current_week.active_time_seconds),
        ..month.clone()
    }
}

/// Weekly deltas against the estimated previous week.
pub fn compute_week_over_week(week: &SummaryStats, month: &SummaryStats) -> [WeekDelta; 3] {
    let previous = estimate_previous_week(week, month);
    compute_weekly_delta(week, &previous)
}
