//! Work-health insights.
//!
//! Looks at how late and how long the user works and turns that into a short
//! ordered list of advice.

use chrono::{Local, TimeZone, Timelike};
use serde::Serialize;

use super::patterns::average_session_minutes;
use super::rest::continuous_gap;
use crate::format::format_minutes;
use crate::types::Session;

/// How an insight should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Info,
    Warning,
    Success,
}

/// Icon category for an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightIcon {
    Moon,
    Stretch,
    Trophy,
    Clock,
}

/// One piece of advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthInsight {
    pub icon: InsightIcon,
    pub title: String,
    pub detail: String,
    pub severity: InsightSeverity,
}

impl HealthInsight {
    fn new(
        icon: InsightIcon,
        severity: InsightSeverity,
        title: &str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            icon,
            title: title.to_string(),
            detail: detail.into(),
            severity,
        }
    }
}

/// Work-health summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthStats {
    /// Latest hour of day any session ended in (not the most recent session's hour)
    pub latest_work_hour: Option<u32>,
    /// Longest run of sessions with no gap over 15 minutes
    pub longest_continuous_min: i64,
    pub insights: Vec<HealthInsight>,
}

/// Health insights using local time.
pub fn compute_health_insights(sessions: &[Session]) -> HealthStats {
    compute_health_insights_in(sessions, &Local)
}

/// Health insights with hours of day taken in `tz`.
pub fn compute_health_insights_in<Tz: TimeZone>(sessions: &[Session], tz: &Tz) -> HealthStats {
    let latest_work_hour = sessions
        .iter()
        .map(|s| s.end_time.with_timezone(tz).hour())
        .max();

    let Some(hour) = latest_work_hour else {
        return HealthStats::default();
    };

    let longest_continuous_min = longest_stretch_minutes(sessions);
    let mut insights = Vec::new();

    if hour >= 23 {
        insights.push(HealthInsight::new(
            InsightIcon::Moon,
            InsightSeverity::Warning,
            "Night owl detected",
            format!(
                "You worked as late as {}:00. Chronic late nights impact focus and health. Try wrapping up by 22:00.",
                hour
            ),
        ));
    } else if hour >= 21 {
        insights.push(HealthInsight::new(
            InsightIcon::Moon,
            InsightSeverity::Info,
            "Evening coder",
            format!(
                "Latest session ended around {}:00. Consider setting a wind-down alarm to protect your sleep.",
                hour
            ),
        ));
    }

    if longest_continuous_min >= 180 {
        insights.push(HealthInsight::new(
            InsightIcon::Stretch,
            InsightSeverity::Warning,
            "Marathon session",
            format!(
                "Your longest stretch was {}. Stand up and stretch every 45-60 min to reduce strain.",
                format_minutes(longest_continuous_min)
            ),
        ));
    } else if longest_continuous_min >= 90 {
        insights.push(HealthInsight::new(
            InsightIcon::Stretch,
            InsightSeverity::Info,
            "Long stretch",
            format!(
                "Longest continuous session: {}. A short walk between sessions boosts creativity.",
                format_minutes(longest_continuous_min)
            ),
        ));
    }

    if longest_continuous_min > 0 && longest_continuous_min < 60 {
        insights.push(HealthInsight::new(
            InsightIcon::Trophy,
            InsightSeverity::Success,
            "Healthy rhythm",
            "Your sessions are well-paced with regular breaks. Keep it up!",
        ));
    }

    if hour < 21 {
        insights.push(HealthInsight::new(
            InsightIcon::Trophy,
            InsightSeverity::Success,
            "Good work-life balance",
            "You're wrapping up before 21:00, a great habit for long-term productivity.",
        ));
    }

    let avg_duration = average_session_minutes(sessions);
    if avg_duration > 60.0 {
        insights.push(HealthInsight::new(
            InsightIcon::Clock,
            InsightSeverity::Info,
            "Consider shorter sessions",
            format!(
                "Average session is {}. Shorter, focused sessions with clear goals tend to be more productive.",
                format_minutes(avg_duration.round() as i64)
            ),
        ));
    }

    HealthStats {
        latest_work_hour,
        longest_continuous_min,
        insights,
    }
}

/// Merge sessions into stretches and return the longest, in whole minutes.
fn longest_stretch_minutes(sessions: &[Session]) -> i64 {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by_key(|s| s.start_time);

    let Some(first) = sorted.first() else {
        return 0;
    };

    let gap = continuous_gap();
    let mut stretch_start = first.start_time;
    let mut stretch_end = first.end_time;
    let mut longest = chrono::Duration::zero();

    for session in &sorted[1..] {
        if session.start_time - stretch_end <= gap {
            stretch_end = stretch_end.max(session.end_time);
        } else {
            longest = longest.max(stretch_end - stretch_start);
            stretch_start = session.start_time;
            stretch_end = session.end_time;
        }
    }
    longest = longest.max(stretch_end - stretch_start);

    (longest.num_milliseconds() as f64 / 60_000.0).round() as i64
}
