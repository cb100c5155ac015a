//! Core domain types for lumo
//!
//! These are the records the backend hands to the analytics layer. Each one
//! has a loosely-typed wire form (`Raw*`, camelCase, exactly as the backend
//! serializes it) and a validated form used by every computation.
//!
//! | Type | Definition |
//! |------|------------|
//! | **Session** | One bounded period of interactive use of the assistant |
//! | **SummaryStats** | Aggregate counters for a [`TimeRange`] |
//! | **ModelStats** | Per-model cost and token totals for a [`TimeRange`] |
//! | **ErrorRateStats** | Request/error counters for a [`TimeRange`] |
//!
//! Conversion from the wire form goes through [`TryFrom`] and fails with
//! [`Error::InvalidRecord`] when a record breaks an invariant, so nothing
//! downstream has to guard against negative counters or inverted intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================
// Time range
// ============================================

/// Time window a stats snapshot was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    Month,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Today => "today",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::All => "all",
        }
    }

    /// Get display name for this range.
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeRange::Today => "Today",
            TimeRange::Week => "This Week",
            TimeRange::Month => "This Month",
            TimeRange::All => "All Time",
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "today" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "all" => Ok(TimeRange::All),
            _ => Err(format!("unknown time range: {}", s)),
        }
    }
}

// ============================================
// Session
// ============================================

/// A session as delivered by the backend (epoch milliseconds).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    pub start_time: i64,
    pub end_time: i64,
    pub duration_ms: i64,
}

/// One usage session of the assistant.
///
/// `duration_ms` is supplied independently by the backend and need not equal
/// `end_time - start_time` (idle time inside a session is not counted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    pub duration_ms: i64,
}

impl Session {
    /// Build a session whose duration is the wall-clock span.
    pub fn spanning(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            duration_ms: (end_time - start_time).num_milliseconds(),
        }
    }

    /// Duration in fractional minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration_ms as f64 / 60_000.0
    }
}

impl TryFrom<RawSession> for Session {
    type Error = Error;

    fn try_from(raw: RawSession) -> Result<Self> {
        let start_time = DateTime::<Utc>::from_timestamp_millis(raw.start_time).ok_or_else(|| {
            Error::invalid("session", format!("startTime {} out of range", raw.start_time))
        })?;
        let end_time = DateTime::<Utc>::from_timestamp_millis(raw.end_time).ok_or_else(|| {
            Error::invalid("session", format!("endTime {} out of range", raw.end_time))
        })?;

        if end_time < start_time {
            return Err(Error::invalid(
                "session",
                format!("endTime {} precedes startTime {}", raw.end_time, raw.start_time),
            ));
        }
        if raw.duration_ms < 0 {
            return Err(Error::invalid(
                "session",
                format!("negative durationMs {}", raw.duration_ms),
            ));
        }

        Ok(Session {
            start_time,
            end_time,
            duration_ms: raw.duration_ms,
        })
    }
}

// ============================================
// Summary stats
// ============================================

/// Summary counters as delivered by the backend.
///
/// Fields the backend may omit for older data default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSummaryStats {
    pub total_sessions: i64,
    pub today_sessions: i64,
    pub total_cost: f64,
    pub total_tokens: i64,
    pub total_tools: i64,
    pub cache_percentage: f64,
    pub active_time_seconds: i64,
    pub lines_of_code_added: i64,
    pub commits: i64,
    pub code_edit_accepts: i64,
    pub code_edit_rejects: i64,
}

/// Aggregate counters for a time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_sessions: u64,
    /// Sessions started today, regardless of the window
    pub today_sessions: u64,
    /// Total cost in USD
    pub total_cost: f64,
    pub total_tokens: u64,
    pub total_tools: u64,
    /// Share of tokens served from cache, 0-100
    pub cache_percentage: f64,
    pub active_time_seconds: u64,
    pub lines_of_code_added: u64,
    pub commits: u64,
    pub code_edit_accepts: u64,
    pub code_edit_rejects: u64,
}

impl TryFrom<RawSummaryStats> for SummaryStats {
    type Error = Error;

    fn try_from(raw: RawSummaryStats) -> Result<Self> {
        let count = |name: &str, value: i64| -> Result<u64> {
            u64::try_from(value)
                .map_err(|_| Error::invalid("summary stats", format!("negative {}: {}", name, value)))
        };

        if !raw.total_cost.is_finite() || raw.total_cost < 0.0 {
            return Err(Error::invalid(
                "summary stats",
                format!("totalCost must be a non-negative amount, got {}", raw.total_cost),
            ));
        }
        if !(0.0..=100.0).contains(&raw.cache_percentage) {
            return Err(Error::invalid(
                "summary stats",
                format!("cachePercentage {} outside 0-100", raw.cache_percentage),
            ));
        }

        Ok(SummaryStats {
            total_sessions: count("totalSessions", raw.total_sessions)?,
            today_sessions: count("todaySessions", raw.today_sessions)?,
            total_cost: raw.total_cost,
            total_tokens: count("totalTokens", raw.total_tokens)?,
            total_tools: count("totalTools", raw.total_tools)?,
            cache_percentage: raw.cache_percentage,
            active_time_seconds: count("activeTimeSeconds", raw.active_time_seconds)?,
            lines_of_code_added: count("linesOfCodeAdded", raw.lines_of_code_added)?,
            commits: count("commits", raw.commits)?,
            code_edit_accepts: count("codeEditAccepts", raw.code_edit_accepts)?,
            code_edit_rejects: count("codeEditRejects", raw.code_edit_rejects)?,
        })
    }
}

// ============================================
// Model stats
// ============================================

/// Per-model aggregate as delivered by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelStats {
    #[serde(default)]
    pub model: Option<String>,
    pub display_name: String,
    pub cost: f64,
    #[serde(default)]
    pub input_tokens: i64,
    #[serde(default)]
    pub output_tokens: i64,
}

/// Per-model cost and token totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub display_name: String,
    /// Cost in USD
    pub cost: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl ModelStats {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl TryFrom<RawModelStats> for ModelStats {
    type Error = Error;

    fn try_from(raw: RawModelStats) -> Result<Self> {
        let display_name = if raw.display_name.trim().is_empty() {
            // Fall back to the model id, then give up
            raw.model
                .filter(|m| !m.trim().is_empty())
                .ok_or_else(|| Error::invalid("model stats", "missing displayName"))?
        } else {
            raw.display_name
        };

        if !raw.cost.is_finite() || raw.cost < 0.0 {
            return Err(Error::invalid(
                "model stats",
                format!("{}: cost must be a non-negative amount, got {}", display_name, raw.cost),
            ));
        }
        let tokens = |value: i64| -> Result<u64> {
            u64::try_from(value).map_err(|_| {
                Error::invalid("model stats", format!("{}: negative token count {}", display_name, value))
            })
        };

        Ok(ModelStats {
            input_tokens: tokens(raw.input_tokens)?,
            output_tokens: tokens(raw.output_tokens)?,
            display_name,
            cost: raw.cost,
        })
    }
}

// ============================================
// Error rate
// ============================================

/// Request error counters as delivered by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawErrorRateStats {
    pub total_requests: i64,
    pub total_errors: i64,
    pub error_rate: f64,
}

/// Request error counters for a time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorRateStats {
    pub total_requests: u64,
    pub total_errors: u64,
    /// Fraction of failed requests, 0-1
    pub error_rate: f64,
}

impl TryFrom<RawErrorRateStats> for ErrorRateStats {
    type Error = Error;

    fn try_from(raw: RawErrorRateStats) -> Result<Self> {
        let total_requests = u64::try_from(raw.total_requests).map_err(|_| {
            Error::invalid("error rate", format!("negative totalRequests {}", raw.total_requests))
        })?;
        let total_errors = u64::try_from(raw.total_errors).map_err(|_| {
            Error::invalid("error rate", format!("negative totalErrors {}", raw.total_errors))
        })?;
        if !(0.0..=1.0).contains(&raw.error_rate) {
            return Err(Error::invalid(
                "error rate",
                format!("errorRate {} outside 0-1", raw.error_rate),
            ));
        }

        Ok(ErrorRateStats {
            total_requests,
            total_errors,
            error_rate: raw.error_rate,
        })
    }
}
