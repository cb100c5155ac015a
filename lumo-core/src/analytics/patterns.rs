//! Time-of-day session patterns.
//!
//! Buckets sessions by the local hour they started in and picks the
//! busiest hour.

use chrono::{Local, TimeZone, Timelike};
use serde::Serialize;

use crate::format::hour_label;
use crate::types::Session;

/// One hour-of-day bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyData {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Display label ("09:00")
    pub label: String,
    /// Sessions started in this hour
    pub session_count: u64,
    /// Summed session duration in minutes
    pub total_duration_min: f64,
}

impl HourlyData {
    fn empty(hour: u32) -> Self {
        Self {
            hour,
            label: hour_label(hour),
            session_count: 0,
            total_duration_min: 0.0,
        }
    }
}

/// Session patterns for the patterns view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPatterns {
    pub hourly: [HourlyData; 24],
    /// Peak hour (0-23)
    pub peak_hour: u32,
    /// Mean session duration in minutes
    pub avg_duration_min: f64,
    pub total_sessions: usize,
}

/// Bucket sessions by local start hour.
pub fn compute_hourly_distribution(sessions: &[Session]) -> [HourlyData; 24] {
    compute_hourly_distribution_in(sessions, &Local)
}

/// Bucket sessions by start hour in `tz`.
///
/// Always returns all 24 hours, including empty ones.
pub fn compute_hourly_distribution_in<Tz: TimeZone>(
    sessions: &[Session],
    tz: &Tz,
) -> [HourlyData; 24] {
    let mut hours: [HourlyData; 24] = std::array::from_fn(|i| HourlyData::empty(i as u32));

    for session in sessions {
        let hour = session.start_time.with_timezone(tz).hour() as usize;
        let bucket = &mut hours[hour];
        bucket.session_count += 1;
        bucket.total_duration_min += session.duration_minutes();
    }

    hours
}

/// Hour with the most sessions.
///
/// Ties go to the earliest hour; all-empty data yields 0.
pub fn find_peak_hour(hourly: &[HourlyData]) -> u32 {
    let mut max = 0;
    let mut peak = 0;
    for bucket in hourly {
        if bucket.session_count > max {
            max = bucket.session_count;
            peak = bucket.hour;
        }
    }
    peak
}

/// Mean session duration in minutes, 0 for no sessions.
pub fn average_session_minutes(sessions: &[Session]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    // Summed as f64: validated durations are unbounded above and an i64 total can overflow
    let total_ms: f64 = sessions.iter().map(|s| s.duration_ms as f64).sum();
    total_ms / sessions.len() as f64 / 60_000.0
}

/// Hourly distribution, peak hour and average duration in local time.
pub fn compute_session_patterns(sessions: &[Session]) -> SessionPatterns {
    compute_session_patterns_in(sessions, &Local)
}

/// Hourly distribution, peak hour and average duration in `tz`.
pub fn compute_session_patterns_in<Tz: TimeZone>(sessions: &[Session], tz: &Tz) -> SessionPatterns {
    let hourly = compute_hourly_distribution_in(sessions, tz);
    let peak_hour = find_peak_hour(&hourly);

    SessionPatterns {
        hourly,
        peak_hour,
        avg_duration_min: average_session_minutes(sessions),
        total_sessions: sessions.len(),
    }
}
